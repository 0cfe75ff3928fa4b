//! Requester scope and filters for document tree listings.

use serde::{Deserialize, Serialize};

use ged_core::types::{CompanyId, NodeId, UserId};

use crate::principal::AccountKind;

/// Who is asking, as the node endpoints expect it.
///
/// Visibility follows the requesting user; the company only decides where
/// new nodes are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeScope {
    /// The signed-in user.
    pub user_id: UserId,
    /// Account kind of the signed-in user.
    pub account_kind: AccountKind,
    /// Whether the signed-in user is a collaborator.
    pub is_collaborator: bool,
    /// Company the session is scoped to.
    pub company_id: CompanyId,
    /// Kind of that company.
    pub company_type: AccountKind,
}

impl NodeScope {
    /// The requester kind in API naming.
    pub fn tipo_usuario(&self) -> &'static str {
        if self.is_collaborator {
            "collaborator"
        } else {
            self.account_kind.as_str()
        }
    }

    /// The `user_id`/`tipo_usuario` pairs every node call carries.
    pub fn requester_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user_id", self.user_id.to_string()),
            ("tipo_usuario", self.tipo_usuario().to_string()),
        ]
    }
}

/// Narrowing of a tree listing. The default lists the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFilters {
    /// Folder to list; `None` is the root.
    pub parent_id: Option<NodeId>,
    /// Document status label.
    pub status: Option<String>,
    /// File extension or kind.
    pub file_type: Option<String>,
    /// Name search term.
    pub search_term: Option<String>,
}

impl NodeFilters {
    /// List the contents of `parent`.
    pub fn in_folder(parent: NodeId) -> Self {
        Self {
            parent_id: Some(parent),
            ..Self::default()
        }
    }

    /// Query-string pairs in API naming; unset and blank fields are omitted.
    pub fn query_pairs(&self, scope: &NodeScope) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(parent) = self.parent_id {
            pairs.push(("parent_id", parent.to_string()));
        }
        let text = [
            ("status", &self.status),
            ("file_type", &self.file_type),
            ("search_term", &self.search_term),
        ];
        for (key, value) in text {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        pairs.extend(scope.requester_pairs());
        pairs.push(("company_id", scope.company_id.to_string()));
        pairs
    }
}
