//! Storage metrics dashboards.

use tokio_util::sync::CancellationToken;

use ged_core::result::AppResult;
use ged_core::types::{CompanyId, UserId};
use ged_entity::metrics::MetricsResponse;
use ged_entity::principal::AccountKind;
use ged_session::SessionResolver;

use crate::http::ApiClient;

/// Client for `/api/v1/metrics/storage`.
#[derive(Debug, Clone)]
pub struct MetricsService {
    api: ApiClient,
    resolver: SessionResolver,
}

impl MetricsService {
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self { api, resolver }
    }

    pub async fn company_metrics(
        &self,
        company_id: CompanyId,
        kind: AccountKind,
        cancel: &CancellationToken,
    ) -> AppResult<MetricsResponse> {
        self.api
            .get(&format!("/api/v1/metrics/storage/empresa/{company_id}"))?
            .query([("tipo_usuario", kind.as_str())])
            .send(cancel)
            .await
    }

    pub async fn user_metrics(
        &self,
        user_id: UserId,
        kind: AccountKind,
        cancel: &CancellationToken,
    ) -> AppResult<MetricsResponse> {
        self.api
            .get(&format!("/api/v1/metrics/storage/usuario/{user_id}"))?
            .query([("tipo_usuario", kind.as_str())])
            .send(cancel)
            .await
    }

    /// Metrics of the company the session is scoped to.
    pub async fn current(&self, cancel: &CancellationToken) -> AppResult<MetricsResponse> {
        let session = self.resolver.current().await?;
        self.company_metrics(session.company_id(), session.company_type(), cancel)
            .await
    }
}
