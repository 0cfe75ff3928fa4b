//! Unified login endpoint payloads.
//!
//! One endpoint serves owners, freelancers, and collaborators; the response
//! tells them apart through `tipo` and `is_collaborator`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use ged_core::error::AppError;
use ged_core::types::CompanyId;

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// Build a request with the email trimmed.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    /// Validate the form before it is sent.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

/// Response of a successful login.
///
/// `user` and `permissions` are kept as raw JSON because their shape
/// depends on the account kind and on the server version; the session
/// layer normalises them when persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Server confirmation message.
    #[serde(default)]
    pub message: String,
    /// Registration status (`completo`, `completar_cadastro`).
    #[serde(default)]
    pub status: Option<String>,
    /// The account record.
    pub user: serde_json::Value,
    /// Company record of individual owners, when registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<serde_json::Value>,
    /// Permissions (object for collaborators, plan-code lists for owners).
    #[serde(default)]
    pub permissions: serde_json::Value,
    /// Account kind label (`PF`, `PJ`, `Freelancer`, `Colaborador`).
    pub tipo: String,
    /// Company of a collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    /// Kind of a collaborator's company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
    /// Set by the server for collaborator logins.
    #[serde(default)]
    pub is_collaborator: bool,
    /// Bearer token, when the server issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    /// Whether registration must be completed before using the GED.
    pub fn needs_registration(&self) -> bool {
        self.status.as_deref() == Some("completar_cadastro")
    }
}
