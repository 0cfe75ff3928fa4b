//! Links between existing users and a company.

use tokio_util::sync::CancellationToken;
use tracing::info;

use ged_core::result::AppResult;
use ged_core::types::LinkId;
use ged_entity::link::{AddUserRequest, LinkStatus, LinkUpdate, UserBusinessLink};
use ged_entity::permission::PermissionSet;
use ged_entity::trash::MessageResponse;
use ged_session::SessionResolver;

use crate::http::ApiClient;

/// Client for `/api/v1/user-business-links`.
///
/// The company is always the one the session is scoped to.
#[derive(Debug, Clone)]
pub struct LinkService {
    api: ApiClient,
    resolver: SessionResolver,
}

impl LinkService {
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self { api, resolver }
    }

    /// Link an existing user to the current company.
    pub async fn add_by_email(
        &self,
        email: &str,
        permissions: Option<PermissionSet>,
        cancel: &CancellationToken,
    ) -> AppResult<UserBusinessLink> {
        let session = self.resolver.current().await?;
        let request = AddUserRequest {
            email: email.trim().to_string(),
            business_id: session.company_id(),
            business_type: session.company_type(),
            status: LinkStatus::Active,
            permissions,
        };
        request.check()?;

        let link: UserBusinessLink = self
            .api
            .post("/api/v1/user-business-links/")?
            .json(&request)?
            .send(cancel)
            .await?;
        info!(link_id = %link.id, business_id = %link.business_id, "Linked user to company");
        Ok(link)
    }

    /// Users linked to the current company.
    pub async fn list_for_company(
        &self,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<UserBusinessLink>> {
        let session = self.resolver.current().await?;
        self.api
            .get("/api/v1/user-business-links/")?
            .query([
                ("business_id", session.company_id().to_string()),
                ("business_type", session.company_type().as_str().to_string()),
            ])
            .send(cancel)
            .await
    }

    async fn update(
        &self,
        link_id: LinkId,
        update: &LinkUpdate,
        cancel: &CancellationToken,
    ) -> AppResult<UserBusinessLink> {
        let link: UserBusinessLink = self
            .api
            .put(&format!("/api/v1/user-business-links/{link_id}"))?
            .json(update)?
            .send(cancel)
            .await?;
        info!(%link_id, status = ?link.status, "Updated company link");
        Ok(link)
    }

    pub async fn update_status(
        &self,
        link_id: LinkId,
        status: LinkStatus,
        cancel: &CancellationToken,
    ) -> AppResult<UserBusinessLink> {
        let update = LinkUpdate {
            status: Some(status),
            permissions: None,
        };
        self.update(link_id, &update, cancel).await
    }

    pub async fn update_permissions(
        &self,
        link_id: LinkId,
        permissions: PermissionSet,
        cancel: &CancellationToken,
    ) -> AppResult<UserBusinessLink> {
        let update = LinkUpdate {
            status: None,
            permissions: Some(permissions),
        };
        self.update(link_id, &update, cancel).await
    }

    pub async fn activate(
        &self,
        link_id: LinkId,
        cancel: &CancellationToken,
    ) -> AppResult<UserBusinessLink> {
        self.update_status(link_id, LinkStatus::Active, cancel).await
    }

    pub async fn deactivate(
        &self,
        link_id: LinkId,
        cancel: &CancellationToken,
    ) -> AppResult<UserBusinessLink> {
        self.update_status(link_id, LinkStatus::Inactive, cancel).await
    }

    /// Remove the link. The user's account is untouched.
    pub async fn remove(
        &self,
        link_id: LinkId,
        cancel: &CancellationToken,
    ) -> AppResult<MessageResponse> {
        let response: MessageResponse = self
            .api
            .delete(&format!("/api/v1/user-business-links/{link_id}"))?
            .send(cancel)
            .await?;
        info!(%link_id, "Removed company link");
        Ok(response)
    }
}
