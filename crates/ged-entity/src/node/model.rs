//! Node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use ged_core::types::time::deserialize_opt_timestamp;
use ged_core::types::{CompanyId, NodeId};

use super::opt_lenient_string;

/// Whether a node is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A document.
    File,
    /// A container of other nodes.
    Folder,
}

impl NodeType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file or folder as listed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Containing folder (`None` at the root).
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    /// Company scope the node belongs to.
    #[serde(default)]
    pub business_id: Option<CompanyId>,
    /// Human-readable size as reported by the API.
    #[serde(default, deserialize_with = "opt_lenient_string")]
    pub size: Option<String>,
    /// File extension without the dot.
    #[serde(default)]
    pub extension: Option<String>,
    /// Document status label.
    #[serde(default, deserialize_with = "opt_lenient_string")]
    pub status: Option<String>,
    /// Download URL for files.
    #[serde(default)]
    pub url: Option<String>,
    /// Free-text comments.
    #[serde(default)]
    pub comments: Option<String>,
    /// When the node was created.
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Node {
    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    /// Check if this node sits at the root of its scope.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
