//! Principal entity model.

use serde::{Deserialize, Serialize};

use ged_core::types::UserId;

use super::kind::AccountKind;

/// A signed-in actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The account's identifier.
    pub user_id: UserId,
    /// Human-readable name.
    pub display_name: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// Kind of account (for collaborators, the kind of their company).
    pub account_kind: AccountKind,
    /// Whether this is a company-scoped collaborator sub-account.
    pub is_collaborator: bool,
}

impl Principal {
    /// Name to show, falling back to the email and then the id.
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user #{}", self.user_id))
    }
}
