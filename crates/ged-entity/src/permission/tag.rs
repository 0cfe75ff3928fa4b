//! Named capability tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A capability a collaborator may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTag {
    /// Create, edit, move, and delete files and folders.
    ManageFiles,
    /// See the metrics dashboards.
    ViewMetrics,
    /// Browse documents without modifying them.
    ViewOnly,
    /// Administer collaborators and company users.
    ManageCollaborators,
    /// See documents shared with the company.
    ViewShared,
}

impl PermissionTag {
    /// Every tag, in wire order.
    pub const ALL: [PermissionTag; 5] = [
        Self::ManageFiles,
        Self::ViewMetrics,
        Self::ViewOnly,
        Self::ManageCollaborators,
        Self::ViewShared,
    ];

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageFiles => "manage_files",
            Self::ViewMetrics => "view_metrics",
            Self::ViewOnly => "view_only",
            Self::ManageCollaborators => "manage_collaborators",
            Self::ViewShared => "view_shared",
        }
    }
}

impl fmt::Display for PermissionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionTag {
    type Err = ged_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                ged_core::AppError::validation(format!(
                    "Invalid permission: '{s}'. Expected one of: manage_files, view_metrics, \
                     view_only, manage_collaborators, view_shared"
                ))
            })
    }
}
