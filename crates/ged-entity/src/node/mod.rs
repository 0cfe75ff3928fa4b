//! Files and folders in the document tree.

pub mod filter;
pub mod form;
pub mod model;
pub mod state;

pub use filter::{NodeFilters, NodeScope};
pub use form::{CreateFolder, MoveResponse, NodeUpdate};
pub use model::{Node, NodeType};
pub use state::NodeState;

use serde::{Deserialize, Deserializer};

/// Accept a string, number, or boolean where the API is loose about types.
pub(crate) fn opt_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
