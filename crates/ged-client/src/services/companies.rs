//! Environment selection: the companies a user may work in.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use ged_core::error::AppError;
use ged_core::result::AppResult;
use ged_core::types::{CompanyId, CompanyScope};
use ged_entity::company::CompaniesResponse;
use ged_session::{LinkContext, Session, SessionResolver};

use crate::http::{ApiClient, push_segment};

/// Lists linked companies and switches the session between them.
#[derive(Debug, Clone)]
pub struct CompanyService {
    api: ApiClient,
    resolver: SessionResolver,
}

impl CompanyService {
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self { api, resolver }
    }

    /// Companies linked to `email`.
    pub async fn companies_for_email(
        &self,
        email: &str,
        cancel: &CancellationToken,
    ) -> AppResult<CompaniesResponse> {
        let mut url = self
            .api
            .url("/api/v1/user-business-links/companies/by-email")?;
        push_segment(&mut url, email.trim())?;
        self.api
            .request(reqwest::Method::GET, url)
            .send(cancel)
            .await
    }

    /// Companies linked to the signed-in principal.
    pub async fn my_companies(&self, cancel: &CancellationToken) -> AppResult<CompaniesResponse> {
        let session = self.resolver.current().await?;
        let email = session
            .principal
            .email
            .clone()
            .ok_or_else(|| AppError::session("No email in the current session"))?;
        self.companies_for_email(&email, cancel).await
    }

    /// Work inside a linked company, with the permissions of the link.
    pub async fn enter(
        &self,
        business_id: CompanyId,
        cancel: &CancellationToken,
    ) -> AppResult<Arc<Session>> {
        let listing = self.my_companies(cancel).await?;
        let company = listing
            .companies
            .iter()
            .find(|c| c.business_id == business_id)
            .ok_or_else(|| {
                AppError::not_found(format!("You are not linked to company {business_id}"))
            })?;
        self.resolver
            .switch_context(
                CompanyScope::Company(business_id),
                Some(LinkContext::from(company)),
            )
            .await
    }

    /// Return to the principal's own space.
    pub async fn leave(&self) -> AppResult<Arc<Session>> {
        self.resolver.switch_context(CompanyScope::Own, None).await
    }
}
