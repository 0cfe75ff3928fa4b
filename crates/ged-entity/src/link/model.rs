//! User–business link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ged_core::error::AppError;
use ged_core::types::time::deserialize_opt_timestamp;
use ged_core::types::{CompanyId, LinkId, UserId};

use super::status::LinkStatus;
use crate::permission::PermissionSet;
use crate::principal::AccountKind;

/// A user account linked to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBusinessLink {
    /// Unique link identifier.
    pub id: LinkId,
    /// The linked user.
    pub user_id: UserId,
    /// Kind of the linked user.
    pub type_user: AccountKind,
    /// Email of the linked user.
    pub email: String,
    /// Name of the linked user.
    #[serde(default, alias = "name")]
    pub nome: Option<String>,
    /// The company.
    pub business_id: CompanyId,
    /// Kind of the company.
    pub business_type: AccountKind,
    /// Per-link capabilities.
    #[serde(default)]
    pub permissions: Option<PermissionSet>,
    /// Whether the link is active.
    #[serde(default)]
    pub status: LinkStatus,
    /// When the link was created.
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserBusinessLink {
    /// Permissions in effect through this link (all-false when unset).
    pub fn effective_permissions(&self) -> PermissionSet {
        self.permissions.unwrap_or_default()
    }
}

/// Body of an "add user to company by email" call.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddUserRequest {
    /// Email of the user to link.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// The company.
    pub business_id: CompanyId,
    /// Kind of the company.
    pub business_type: AccountKind,
    /// Initial status.
    pub status: LinkStatus,
    /// Initial permissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

impl AddUserRequest {
    /// Validate the form before it is sent.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

/// Partial update of a link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkUpdate {
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LinkStatus>,
    /// New permissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_link_without_permissions() {
        let link: UserBusinessLink = serde_json::from_value(serde_json::json!({
            "id": 2,
            "user_id": 40,
            "type_user": "freelancer",
            "email": "joao@freela.dev",
            "nome": "João",
            "business_id": 7,
            "business_type": "pj",
            "status": 0,
            "created_at": "2025-02-01T12:00:00"
        }))
        .unwrap();
        assert_eq!(link.status, LinkStatus::Inactive);
        assert!(link.effective_permissions().is_empty());
    }

    #[test]
    fn test_add_user_request_rejects_bad_email() {
        let mut request = AddUserRequest {
            email: "joao.freela.dev".into(),
            business_id: CompanyId(7),
            business_type: AccountKind::Organization,
            status: LinkStatus::Active,
            permissions: None,
        };
        assert!(request.check().is_err());

        request.email = "joao@freela.dev".into();
        assert!(request.check().is_ok());
    }

    #[test]
    fn test_status_only_update_body() {
        let body = serde_json::to_value(LinkUpdate {
            status: Some(LinkStatus::Active),
            permissions: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": 1 }));
    }
}
