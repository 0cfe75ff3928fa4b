//! Version 2 of the login payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ged_core::types::{CompanyId, CompanyScope, UserId};
use ged_entity::company::SessionContext;
use ged_entity::permission::PermissionSet;
use ged_entity::principal::{AccountKind, Principal};

/// Schema version written by this client.
pub const CURRENT_VERSION: u32 = 2;

/// The account record inside the payload.
///
/// Owners carry `nome`, collaborators carry `name`; both are kept so the
/// payload round-trips unchanged for the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Every other field of the account record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredUser {
    /// First non-blank name.
    pub fn display_name(&self) -> Option<String> {
        [&self.name, &self.nome]
            .into_iter()
            .flatten()
            .map(|n| n.trim())
            .find(|n| !n.is_empty())
            .map(String::from)
    }
}

/// Persisted login payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLogin {
    pub version: u32,
    pub user: StoredUser,
    /// Account kind label as returned at login (`PF`, `PJ`, `Freelancer`,
    /// `Colaborador`).
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub is_collaborator: bool,
    /// Capabilities of the active scope. Authoritative for collaborators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
    /// Active company (a collaborator's employer, or the company an owner
    /// switched into).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_type: Option<AccountKind>,
    /// Fields the client does not interpret (`message`, `status`, `empresa`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredLogin {
    /// Kind of the principal's account.
    ///
    /// Collaborators take the kind of their company; everyone else is
    /// described by `tipo`.
    pub fn account_kind(&self) -> AccountKind {
        if self.is_collaborator {
            return self.company_type.unwrap_or(AccountKind::Individual);
        }
        if self.tipo.trim().is_empty() {
            AccountKind::Individual
        } else {
            AccountKind::normalize(&self.tipo)
        }
    }

    /// The signed-in principal.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user.id,
            display_name: self.user.display_name(),
            email: self.user.email.clone(),
            account_kind: self.account_kind(),
            is_collaborator: self.is_collaborator,
        }
    }

    /// The active company context.
    pub fn context(&self) -> SessionContext {
        SessionContext {
            active_company: self
                .company_id
                .map(CompanyScope::Company)
                .unwrap_or(CompanyScope::Own),
            active_company_type: self.company_type,
            permissions: self.permissions,
        }
    }

    /// Rewrite the scope fields for a context switch.
    pub fn apply_scope(
        &mut self,
        scope: CompanyScope,
        company_type: Option<AccountKind>,
        permissions: Option<PermissionSet>,
    ) {
        match scope {
            CompanyScope::Own => {
                self.permissions = None;
                self.company_id = None;
                self.company_type = None;
            }
            CompanyScope::Company(id) => {
                self.permissions = Some(permissions.unwrap_or_default());
                self.company_id = Some(id);
                self.company_type = company_type;
            }
        }
    }
}
