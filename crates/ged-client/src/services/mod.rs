//! One service per API area.
//!
//! Services are cheap to clone: they share the [`ApiClient`] connection
//! pool and the [`SessionResolver`] cache.

pub mod auth;
pub mod collaborators;
pub mod companies;
pub mod links;
pub mod metrics;
pub mod nodes;
pub mod trash;

use ged_session::SessionResolver;

use crate::http::ApiClient;

pub use auth::{AuthService, LoginOutcome};
pub use collaborators::CollaboratorService;
pub use companies::CompanyService;
pub use links::LinkService;
pub use metrics::MetricsService;
pub use nodes::NodeService;
pub use trash::TrashService;

/// Every service, wired to the same client and resolver.
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub nodes: NodeService,
    pub trash: TrashService,
    pub collaborators: CollaboratorService,
    pub links: LinkService,
    pub companies: CompanyService,
    pub metrics: MetricsService,
}

impl Services {
    /// Wire all services.
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self {
            auth: AuthService::new(api.clone(), resolver.clone()),
            nodes: NodeService::new(api.clone(), resolver.clone()),
            trash: TrashService::new(api.clone(), resolver.clone()),
            collaborators: CollaboratorService::new(api.clone(), resolver.clone()),
            links: LinkService::new(api.clone(), resolver.clone()),
            companies: CompanyService::new(api.clone(), resolver.clone()),
            metrics: MetricsService::new(api, resolver),
        }
    }
}
