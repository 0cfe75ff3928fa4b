//! Soft-delete lifecycle of a node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a node.
///
/// `Live → Trashed` (delete), `Trashed → Live` (restore),
/// `Trashed → Purged` (permanent delete). `Purged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Visible in the document tree.
    Live,
    /// Soft-deleted, waiting for restore or purge.
    Trashed,
    /// Hard-deleted; leaves no record.
    Purged,
}

impl NodeState {
    /// Check whether moving to `next` is a legal transition.
    pub fn can_transition_to(&self, next: NodeState) -> bool {
        matches!(
            (self, next),
            (Self::Live, Self::Trashed) | (Self::Trashed, Self::Live) | (Self::Trashed, Self::Purged)
        )
    }

    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Purged)
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Trashed => "trashed",
            Self::Purged => "purged",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(NodeState::Live.can_transition_to(NodeState::Trashed));
        assert!(NodeState::Trashed.can_transition_to(NodeState::Live));
        assert!(NodeState::Trashed.can_transition_to(NodeState::Purged));
        assert!(!NodeState::Live.can_transition_to(NodeState::Purged));
        assert!(!NodeState::Purged.can_transition_to(NodeState::Live));
        assert!(!NodeState::Purged.can_transition_to(NodeState::Trashed));
    }

    #[test]
    fn test_purged_is_terminal() {
        assert!(NodeState::Purged.is_terminal());
        assert!(!NodeState::Trashed.is_terminal());
    }
}
