//! Fixed set of boolean capabilities.

use serde::{Deserialize, Deserializer, Serialize};

use super::tag::PermissionTag;

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// One boolean per [`PermissionTag`].
///
/// Deserialization accepts partial objects: a missing or `null` flag is
/// `false`, and unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    /// Create, edit, move, and delete files and folders.
    #[serde(default, deserialize_with = "null_as_false")]
    pub manage_files: bool,
    /// See the metrics dashboards.
    #[serde(default, deserialize_with = "null_as_false")]
    pub view_metrics: bool,
    /// Read-only document access.
    #[serde(default, deserialize_with = "null_as_false")]
    pub view_only: bool,
    /// Administer collaborators and company users.
    #[serde(default, deserialize_with = "null_as_false")]
    pub manage_collaborators: bool,
    /// See documents shared with the company.
    #[serde(default, deserialize_with = "null_as_false")]
    pub view_shared: bool,
}

impl PermissionSet {
    /// Every flag off.
    pub fn none() -> Self {
        Self::default()
    }

    /// The permissions an account owner effectively has.
    pub fn owner_defaults() -> Self {
        Self {
            manage_files: true,
            view_metrics: true,
            view_only: false,
            manage_collaborators: true,
            view_shared: false,
        }
    }

    /// Build a set with exactly the given tags enabled.
    pub fn from_tags(tags: &[PermissionTag]) -> Self {
        let mut set = Self::none();
        for tag in tags {
            set.set(*tag, true);
        }
        set
    }

    /// Whether the tag is granted.
    pub fn get(&self, tag: PermissionTag) -> bool {
        match tag {
            PermissionTag::ManageFiles => self.manage_files,
            PermissionTag::ViewMetrics => self.view_metrics,
            PermissionTag::ViewOnly => self.view_only,
            PermissionTag::ManageCollaborators => self.manage_collaborators,
            PermissionTag::ViewShared => self.view_shared,
        }
    }

    /// Set a single flag, without touching the others.
    pub fn set(&mut self, tag: PermissionTag, value: bool) {
        let slot = match tag {
            PermissionTag::ManageFiles => &mut self.manage_files,
            PermissionTag::ViewMetrics => &mut self.view_metrics,
            PermissionTag::ViewOnly => &mut self.view_only,
            PermissionTag::ManageCollaborators => &mut self.manage_collaborators,
            PermissionTag::ViewShared => &mut self.view_shared,
        };
        *slot = value;
    }

    /// Flip a flag the way the permission editors do.
    ///
    /// `view_only` and `manage_files` are mutually exclusive: enabling one
    /// disables the other.
    pub fn toggle(&mut self, tag: PermissionTag) {
        let enabled = !self.get(tag);
        self.set(tag, enabled);
        if enabled {
            match tag {
                PermissionTag::ViewOnly => self.manage_files = false,
                PermissionTag::ManageFiles => self.view_only = false,
                _ => {}
            }
        }
    }

    /// Iterate over the granted tags.
    pub fn granted(&self) -> impl Iterator<Item = PermissionTag> + '_ {
        PermissionTag::ALL.into_iter().filter(|tag| self.get(*tag))
    }

    /// Whether no flag is granted.
    pub fn is_empty(&self) -> bool {
        self.granted().next().is_none()
    }
}
