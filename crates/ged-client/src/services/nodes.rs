//! The live document tree: browsing, folders, renames, moves, and the
//! move to the trash.

use tokio_util::sync::CancellationToken;
use tracing::info;

use ged_core::result::AppResult;
use ged_core::types::NodeId;
use ged_entity::node::{CreateFolder, MoveResponse, Node, NodeFilters, NodeScope, NodeUpdate};
use ged_entity::trash::MessageResponse;
use ged_session::SessionResolver;

use crate::http::ApiClient;

/// Client for `/api/v1/nodes`.
///
/// Every call carries the requesting user; the server decides visibility
/// from it and stores new folders under the session's company.
#[derive(Debug, Clone)]
pub struct NodeService {
    api: ApiClient,
    resolver: SessionResolver,
}

impl NodeService {
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self { api, resolver }
    }

    async fn scope(&self) -> AppResult<NodeScope> {
        Ok(self.resolver.current().await?.node_scope())
    }

    /// Nodes matching `filters`: a folder's contents, or the root.
    pub async fn list(
        &self,
        filters: &NodeFilters,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Node>> {
        let scope = self.scope().await?;
        self.api
            .get("/api/v1/nodes/")?
            .query(filters.query_pairs(&scope))
            .send(cancel)
            .await
    }

    pub async fn get(&self, id: NodeId, cancel: &CancellationToken) -> AppResult<Node> {
        let scope = self.scope().await?;
        self.api
            .get(&format!("/api/v1/nodes/{id}"))?
            .query(scope.requester_pairs())
            .send(cancel)
            .await
    }

    /// Create a folder after validating the form.
    pub async fn create_folder(
        &self,
        form: &CreateFolder,
        cancel: &CancellationToken,
    ) -> AppResult<Node> {
        form.check()?;
        let scope = self.scope().await?;

        let mut fields = vec![
            ("name", form.name.clone()),
            ("type", "folder".to_string()),
            ("status", "valido".to_string()),
            ("business_id", scope.user_id.to_string()),
            ("type_user", scope.tipo_usuario().to_string()),
            ("company_id", scope.company_id.to_string()),
            ("company_type", scope.company_type.as_str().to_string()),
        ];
        if let Some(parent) = form.parent_id {
            fields.push(("parent_id", parent.to_string()));
        }

        let created: Node = self
            .api
            .post("/api/v1/nodes/")?
            .form(fields)
            .send(cancel)
            .await?;
        info!(node_id = %created.id, parent = ?created.parent_id, "Created folder");
        Ok(created)
    }

    /// Change name, comments, status or expiry of a node.
    pub async fn update(
        &self,
        id: NodeId,
        update: &NodeUpdate,
        cancel: &CancellationToken,
    ) -> AppResult<Node> {
        update.check()?;
        let scope = self.scope().await?;

        let mut fields = update.form_fields();
        fields.push(("business_id", scope.user_id.to_string()));
        fields.push(("type_user", scope.tipo_usuario().to_string()));

        let updated: Node = self
            .api
            .put(&format!("/api/v1/nodes/{id}"))?
            .form(fields)
            .send(cancel)
            .await?;
        info!(node_id = %id, "Updated node");
        Ok(updated)
    }

    pub async fn rename(
        &self,
        id: NodeId,
        name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Node> {
        self.update(id, &NodeUpdate::rename(name), cancel).await
    }

    /// Move a node under `new_parent`, or to the root.
    pub async fn move_to(
        &self,
        id: NodeId,
        new_parent: Option<NodeId>,
        cancel: &CancellationToken,
    ) -> AppResult<MoveResponse> {
        let scope = self.scope().await?;
        let response: MoveResponse = self
            .api
            .patch(&format!("/api/v1/nodes/{id}/move"))?
            .query(new_parent.map(|p| ("new_parent_id", p.to_string())))
            .query(scope.requester_pairs())
            .send(cancel)
            .await?;
        info!(node_id = %id, parent = ?response.node.parent_id, "Moved node");
        Ok(response)
    }

    /// Move a node, and for folders its whole subtree, to the trash.
    ///
    /// Returns the server message, if it sent one.
    pub async fn delete(
        &self,
        id: NodeId,
        cancel: &CancellationToken,
    ) -> AppResult<Option<String>> {
        let scope = self.scope().await?;
        let response: Option<MessageResponse> = self
            .api
            .delete(&format!("/api/v1/nodes/{id}"))?
            .query(scope.requester_pairs())
            .send(cancel)
            .await?;
        info!(node_id = %id, "Moved node to trash");
        Ok(response.map(|r| r.message))
    }
}
