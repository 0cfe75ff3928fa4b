//! The tenant scope a principal is currently operating under.

use serde::{Deserialize, Serialize};

use ged_core::types::CompanyScope;

use crate::permission::PermissionSet;
use crate::principal::AccountKind;

/// Active company context.
///
/// For collaborators `permissions` is authoritative and is always present
/// after a successful login; for everyone else it is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionContext {
    /// Active scope.
    pub active_company: CompanyScope,
    /// Kind of the active company, when scoped to one.
    pub active_company_type: Option<AccountKind>,
    /// Cached capabilities for the active scope.
    pub permissions: Option<PermissionSet>,
}

impl SessionContext {
    /// The personal, unscoped context.
    pub fn own() -> Self {
        Self::default()
    }
}
