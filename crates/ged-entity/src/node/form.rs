//! Forms and responses of the document tree endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use ged_core::error::AppError;
use ged_core::types::NodeId;

use super::model::Node;

/// A folder to create.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolder {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Containing folder; `None` creates it at the root.
    pub parent_id: Option<NodeId>,
}

impl CreateFolder {
    /// Build a form with the name trimmed.
    pub fn new(name: &str, parent_id: Option<NodeId>) -> Self {
        Self {
            name: name.trim().to_string(),
            parent_id,
        }
    }

    /// Validate the form before it is sent.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

/// Editable node fields; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpdate {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// New document status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New expiry date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_validade: Option<String>,
}

impl NodeUpdate {
    /// An update that only renames.
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.trim().to_string()),
            ..Self::default()
        }
    }

    /// Validate the form before it is sent.
    pub fn check(&self) -> Result<(), AppError> {
        if self == &Self::default() {
            return Err(AppError::validation("Nothing to update"));
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Name is required"));
        }
        Ok(())
    }

    /// Form fields in API naming.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("name", &self.name),
            ("comments", &self.comments),
            ("status", &self.status),
            ("data_validade", &self.data_validade),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }
}

/// Response of a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Server confirmation message.
    pub message: String,
    /// The node under its new parent.
    pub node: Node,
}
