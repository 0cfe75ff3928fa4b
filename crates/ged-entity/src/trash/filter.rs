//! Scope filters for trash listing and emptying.

use serde::{Deserialize, Serialize};

use ged_core::types::{CompanyId, UserId};

use crate::principal::AccountKind;

/// Scope of a trash listing: which company, account kind, and deleting user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashFilters {
    /// Company scope.
    pub business_id: Option<CompanyId>,
    /// Account kind of the scope owner.
    pub account_kind: Option<AccountKind>,
    /// Only entries deleted by this user.
    pub user_id: Option<UserId>,
}

impl TrashFilters {
    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: TrashFilters) -> TrashFilters {
        TrashFilters {
            business_id: self.business_id.or(fallback.business_id),
            account_kind: self.account_kind.or(fallback.account_kind),
            user_id: self.user_id.or(fallback.user_id),
        }
    }

    /// Query-string pairs in API naming; unset fields are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.business_id {
            pairs.push(("business_id", id.to_string()));
        }
        if let Some(kind) = self.account_kind {
            pairs.push(("tipo_usuario", kind.as_str().to_string()));
        }
        if let Some(id) = self.user_id {
            pairs.push(("user_id", id.to_string()));
        }
        pairs
    }
}

/// Scope of an "empty trash" call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyTrashFilters {
    /// Same scope fields as a listing.
    pub scope: TrashFilters,
    /// Only purge entries trashed more than this many days ago.
    pub older_than_days: Option<u32>,
}

impl EmptyTrashFilters {
    /// Query-string pairs in API naming; unset fields are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.scope.query_pairs();
        if let Some(days) = self.older_than_days {
            pairs.push(("older_than_days", days.to_string()));
        }
        pairs
    }
}
