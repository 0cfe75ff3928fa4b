//! Collaborator sub-accounts of a company.

use tokio_util::sync::CancellationToken;
use tracing::info;

use ged_core::result::AppResult;
use ged_core::types::{CollaboratorId, CompanyId};
use ged_entity::collaborator::{
    Collaborator, CollaboratorList, CreateCollaborator, PermissionCheck, UpdateCollaborator,
};
use ged_entity::permission::PermissionTag;
use ged_entity::principal::AccountKind;
use ged_entity::trash::MessageResponse;
use ged_session::SessionResolver;

use crate::http::ApiClient;

/// Client for `/api/v1/collaborators`.
#[derive(Debug, Clone)]
pub struct CollaboratorService {
    api: ApiClient,
    resolver: SessionResolver,
}

impl CollaboratorService {
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self { api, resolver }
    }

    /// Create a collaborator after validating the form.
    pub async fn create(
        &self,
        form: &CreateCollaborator,
        cancel: &CancellationToken,
    ) -> AppResult<Collaborator> {
        form.check()?;
        let created: Collaborator = self
            .api
            .post("/api/v1/collaborators/")?
            .json(form)?
            .send(cancel)
            .await?;
        info!(collaborator_id = %created.id, company_id = %created.company_id, "Created collaborator");
        Ok(created)
    }

    /// Collaborators of a company.
    pub async fn list_for_company(
        &self,
        company_id: CompanyId,
        company_type: AccountKind,
        cancel: &CancellationToken,
    ) -> AppResult<CollaboratorList> {
        self.api
            .get(&format!("/api/v1/collaborators/company/{company_id}"))?
            .query([("company_type", company_type.as_str())])
            .send(cancel)
            .await
    }

    /// Collaborators of the company the session is scoped to.
    pub async fn list_current(&self, cancel: &CancellationToken) -> AppResult<CollaboratorList> {
        let session = self.resolver.current().await?;
        self.list_for_company(session.company_id(), session.company_type(), cancel)
            .await
    }

    pub async fn get(
        &self,
        id: CollaboratorId,
        cancel: &CancellationToken,
    ) -> AppResult<Collaborator> {
        self.api
            .get(&format!("/api/v1/collaborators/{id}"))?
            .send(cancel)
            .await
    }

    /// Change name and/or permissions.
    pub async fn update(
        &self,
        id: CollaboratorId,
        update: &UpdateCollaborator,
        cancel: &CancellationToken,
    ) -> AppResult<Collaborator> {
        update.check()?;
        let updated: Collaborator = self
            .api
            .put(&format!("/api/v1/collaborators/{id}"))?
            .json(update)?
            .send(cancel)
            .await?;
        info!(collaborator_id = %id, "Updated collaborator");
        Ok(updated)
    }

    /// Deactivate a collaborator. The server also deletes the nodes the
    /// collaborator owns.
    pub async fn deactivate(
        &self,
        id: CollaboratorId,
        cancel: &CancellationToken,
    ) -> AppResult<MessageResponse> {
        let response: MessageResponse = self
            .api
            .delete(&format!("/api/v1/collaborators/{id}"))?
            .send(cancel)
            .await?;
        info!(collaborator_id = %id, "Deactivated collaborator");
        Ok(response)
    }

    /// Ask the server whether a collaborator holds `permission`.
    pub async fn check_permission(
        &self,
        id: CollaboratorId,
        permission: PermissionTag,
        cancel: &CancellationToken,
    ) -> AppResult<PermissionCheck> {
        self.api
            .post(&format!("/api/v1/collaborators/{id}/check-permission"))?
            .query([("permission", permission.as_str())])
            .send(cancel)
            .await
    }
}
