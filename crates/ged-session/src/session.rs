//! The resolved, in-memory session snapshot and the access predicate.

use serde::Serialize;

use ged_core::types::{CompanyId, CompanyScope};
use ged_entity::company::SessionContext;
use ged_entity::node::NodeScope;
use ged_entity::permission::{PermissionSet, PermissionTag};
use ged_entity::principal::{AccountKind, Principal};
use ged_entity::trash::TrashFilters;

use crate::payload::StoredLogin;

/// What an action requires of the principal.
///
/// A list is satisfied when **any** of its tags is granted; an empty list
/// imposes no requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRequirement {
    Tag(PermissionTag),
    AnyOf(Vec<PermissionTag>),
}

impl AccessRequirement {
    /// Whether `permissions` satisfy the requirement.
    pub fn is_met_by(&self, permissions: &PermissionSet) -> bool {
        match self {
            Self::Tag(tag) => permissions.get(*tag),
            Self::AnyOf(tags) => tags.is_empty() || tags.iter().any(|t| permissions.get(*t)),
        }
    }
}

impl From<PermissionTag> for AccessRequirement {
    fn from(tag: PermissionTag) -> Self {
        Self::Tag(tag)
    }
}

impl From<&[PermissionTag]> for AccessRequirement {
    fn from(tags: &[PermissionTag]) -> Self {
        Self::AnyOf(tags.to_vec())
    }
}

impl<const N: usize> From<[PermissionTag; N]> for AccessRequirement {
    fn from(tags: [PermissionTag; N]) -> Self {
        Self::AnyOf(tags.to_vec())
    }
}

impl From<Vec<PermissionTag>> for AccessRequirement {
    fn from(tags: Vec<PermissionTag>) -> Self {
        Self::AnyOf(tags)
    }
}

/// The principal together with its active company context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub principal: Principal,
    pub context: SessionContext,
}

impl Session {
    /// Resolve a snapshot from the persisted payload.
    pub fn from_login(login: &StoredLogin) -> Self {
        Self {
            principal: login.principal(),
            context: login.context(),
        }
    }

    /// Whether the principal may perform an action gated by `requirement`.
    ///
    /// Account owners are never restricted. Collaborators are restricted to
    /// their cached permissions and denied everything when those are absent.
    pub fn has_access(&self, requirement: impl Into<AccessRequirement>) -> bool {
        if !self.principal.is_collaborator {
            return true;
        }
        match &self.context.permissions {
            Some(permissions) => requirement.into().is_met_by(permissions),
            None => false,
        }
    }

    /// Permissions in force for the active scope.
    pub fn effective_permissions(&self) -> PermissionSet {
        if self.principal.is_collaborator {
            self.context.permissions.unwrap_or_default()
        } else {
            PermissionSet::owner_defaults()
        }
    }

    /// Company that scoped requests run under.
    pub fn company_id(&self) -> CompanyId {
        match self.context.active_company {
            CompanyScope::Company(id) => id,
            CompanyScope::Own => CompanyId(self.principal.user_id.get()),
        }
    }

    /// Kind of the company that scoped requests run under.
    pub fn company_type(&self) -> AccountKind {
        match self.context.active_company {
            CompanyScope::Company(_) => self
                .context
                .active_company_type
                .unwrap_or(self.principal.account_kind),
            CompanyScope::Own => self.principal.account_kind,
        }
    }

    /// Requester scope for document tree calls.
    pub fn node_scope(&self) -> NodeScope {
        NodeScope {
            user_id: self.principal.user_id,
            account_kind: self.principal.account_kind,
            is_collaborator: self.principal.is_collaborator,
            company_id: self.company_id(),
            company_type: self.company_type(),
        }
    }

    /// Trash scope of the current session.
    pub fn trash_scope(&self) -> TrashFilters {
        TrashFilters {
            business_id: Some(self.company_id()),
            account_kind: Some(self.company_type()),
            user_id: Some(self.principal.user_id),
        }
    }
}
