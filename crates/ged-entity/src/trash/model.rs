//! Trash entry model and trash operation responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ged_core::types::time::deserialize_timestamp;
use ged_core::types::{NodeId, UserId};

use crate::node::{Node, NodeType};

/// A node that has been soft-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashEntry {
    /// The trashed node.
    #[serde(flatten)]
    pub node: Node,
    /// When the node was moved to the trash.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub deleted_at: DateTime<Utc>,
    /// Who deleted it.
    #[serde(default)]
    pub deleted_by_id: Option<UserId>,
    /// Account kind of whoever deleted it.
    #[serde(default)]
    pub deleted_by_type: Option<String>,
    /// For folders, how many descendants were trashed with it.
    #[serde(default)]
    pub children_count: u64,
}

impl TrashEntry {
    /// The node id.
    pub fn id(&self) -> NodeId {
        self.node.id
    }

    /// The node name.
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Check if this entry is a folder (and so carries a cascaded subtree).
    pub fn is_folder(&self) -> bool {
        self.node.node_type == NodeType::Folder
    }

    /// Case-insensitive substring match on the name. An empty term matches.
    pub fn matches_name(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty() || self.node.name.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Node summary returned by a restore call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoredNode {
    /// Restored node id.
    pub id: NodeId,
    /// Restored node name.
    pub name: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Parent it now lives under.
    #[serde(default)]
    pub parent_id: Option<NodeId>,
}

/// Response of a successful restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreResponse {
    /// Server confirmation message.
    pub message: String,
    /// The node as it is now.
    pub node: RestoredNode,
}

/// A bare `{ "message": ... }` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Server confirmation message.
    pub message: String,
}
