//! Trash listing, restore, and permanent deletion.
//!
//! Every operation issues exactly one request. Scope filters left unset
//! are taken from the active session.

use tokio_util::sync::CancellationToken;
use tracing::info;

use ged_core::result::AppResult;
use ged_core::types::NodeId;
use ged_entity::trash::{
    EmptyTrashFilters, MessageResponse, RestoreResponse, TrashEntry, TrashFilters,
};
use ged_session::SessionResolver;

use crate::http::ApiClient;

/// Client for `/api/v1/nodes/trash`.
#[derive(Debug, Clone)]
pub struct TrashService {
    api: ApiClient,
    resolver: SessionResolver,
}

impl TrashService {
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self { api, resolver }
    }

    async fn session_scope(&self) -> TrashFilters {
        self.resolver
            .load_principal()
            .await
            .session()
            .map(|s| s.trash_scope())
            .unwrap_or_default()
    }

    /// List trashed entries. An empty list is a valid result.
    pub async fn list(
        &self,
        filters: Option<TrashFilters>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<TrashEntry>> {
        let filters = filters.unwrap_or_default().or(self.session_scope().await);
        self.api
            .get("/api/v1/nodes/trash")?
            .query(filters.query_pairs())
            .send(cancel)
            .await
    }

    /// Restore an entry to its original parent, or to `destination`.
    pub async fn restore(
        &self,
        node_id: NodeId,
        destination: Option<NodeId>,
        cancel: &CancellationToken,
    ) -> AppResult<RestoreResponse> {
        let response: RestoreResponse = self
            .api
            .post(&format!("/api/v1/nodes/trash/{node_id}/restore"))?
            .query(destination.map(|d| ("restore_to_parent", d.to_string())))
            .send(cancel)
            .await?;
        info!(%node_id, parent = ?response.node.parent_id, "Restored trash entry");
        Ok(response)
    }

    /// Permanently delete an entry and, for folders, its whole subtree.
    pub async fn purge(
        &self,
        node_id: NodeId,
        cancel: &CancellationToken,
    ) -> AppResult<MessageResponse> {
        let response: MessageResponse = self
            .api
            .delete(&format!("/api/v1/nodes/trash/{node_id}/permanent"))?
            .send(cancel)
            .await?;
        info!(%node_id, "Purged trash entry");
        Ok(response)
    }

    /// Permanently delete every entry in scope.
    pub async fn empty_all(
        &self,
        filters: Option<EmptyTrashFilters>,
        cancel: &CancellationToken,
    ) -> AppResult<MessageResponse> {
        let mut filters = filters.unwrap_or_default();
        filters.scope = filters.scope.or(self.session_scope().await);

        let response: MessageResponse = self
            .api
            .post("/api/v1/nodes/trash/empty")?
            .query(filters.query_pairs())
            .send(cancel)
            .await?;
        info!(message = %response.message, "Emptied trash");
        Ok(response)
    }
}
