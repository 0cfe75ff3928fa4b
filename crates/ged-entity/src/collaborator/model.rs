//! Collaborator entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ged_core::error::AppError;
use ged_core::types::time::deserialize_opt_timestamp;
use ged_core::types::{CollaboratorId, CompanyId};

use crate::permission::{PermissionSet, PermissionTag};
use crate::principal::AccountKind;

/// A login scoped to one company, with its own restricted permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Unique collaborator identifier.
    pub id: CollaboratorId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// The owning company.
    pub company_id: CompanyId,
    /// Kind of the owning company.
    pub company_type: AccountKind,
    /// Granted capabilities.
    #[serde(default)]
    pub permissions: PermissionSet,
    /// Deactivated collaborators cannot log in.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// When the collaborator was created.
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the collaborator was last updated.
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Data required to create a collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCollaborator {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    /// The owning company.
    pub company_id: CompanyId,
    /// Kind of the owning company.
    pub company_type: AccountKind,
    /// Granted capabilities.
    pub permissions: PermissionSet,
}

impl CreateCollaborator {
    /// Validate the form before it is sent.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

/// Editable collaborator fields; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCollaborator {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New permission set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

impl UpdateCollaborator {
    /// Validate the form before it is sent.
    pub fn check(&self) -> Result<(), AppError> {
        if self.name.is_none() && self.permissions.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name is required"));
            }
        }
        Ok(())
    }
}

/// A company's collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorList {
    /// The company listed.
    pub company_id: CompanyId,
    /// Kind of the company.
    pub company_type: AccountKind,
    /// Number of collaborators.
    pub total: u64,
    /// The collaborators.
    pub collaborators: Vec<Collaborator>,
}

/// Result of a server-side permission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheck {
    /// The collaborator checked.
    pub collaborator_id: CollaboratorId,
    /// The permission checked.
    pub permission: PermissionTag,
    /// Whether it is granted.
    pub has_permission: bool,
}
