//! Session resolution, context switching, and permission gating.

use std::sync::Arc;

use tracing::{info, warn};

use ged_core::error::AppError;
use ged_core::events::{ContextEvent, EventBus};
use ged_core::result::AppResult;
use ged_core::types::{CompanyId, CompanyScope};
use ged_entity::auth::LoginResponse;
use ged_entity::company::CompanySummary;
use ged_entity::link::UserBusinessLink;
use ged_entity::permission::PermissionSet;
use ged_entity::principal::AccountKind;

use crate::session::{AccessRequirement, Session};
use crate::store::SessionStore;

/// Result of reading the persisted session.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Authenticated(Arc<Session>),
    Unauthenticated,
}

impl LoadOutcome {
    /// The session, if authenticated.
    pub fn session(&self) -> Option<&Arc<Session>> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// What a company link contributes to a context switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkContext {
    pub company_type: Option<AccountKind>,
    pub permissions: Option<PermissionSet>,
}

impl From<&CompanySummary> for LinkContext {
    fn from(company: &CompanySummary) -> Self {
        Self {
            company_type: Some(company.business_type),
            permissions: company.permissions,
        }
    }
}

impl From<&UserBusinessLink> for LinkContext {
    fn from(link: &UserBusinessLink) -> Self {
        Self {
            company_type: Some(link.business_type),
            permissions: link.permissions,
        }
    }
}

/// Resolves who is signed in, under which company, with which permissions.
///
/// Components receive the resolver by injection; every read goes through
/// the store's cache, so permissions only change on the next
/// [`switch_context`](Self::switch_context) or login.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    store: Arc<SessionStore>,
    events: EventBus,
}

impl SessionResolver {
    /// Create a resolver over `store`, publishing context changes on `events`.
    pub fn new(store: Arc<SessionStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// The context-change event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Read the persisted session. Never fails; unusable data means
    /// signed out.
    pub async fn load_principal(&self) -> LoadOutcome {
        match self.store.session().await {
            Some(session) => LoadOutcome::Authenticated(session),
            None => LoadOutcome::Unauthenticated,
        }
    }

    /// The session, or a `Session` error when nobody is signed in.
    pub async fn current(&self) -> AppResult<Arc<Session>> {
        self.store
            .session()
            .await
            .ok_or_else(|| AppError::session("Not signed in. Run `ged login` first"))
    }

    /// Whether the current principal satisfies `requirement`.
    ///
    /// Signed-out callers have no access.
    pub async fn has_access(&self, requirement: impl Into<AccessRequirement>) -> bool {
        match self.store.session().await {
            Some(session) => session.has_access(requirement),
            None => false,
        }
    }

    /// The session, if it satisfies `requirement`; an `Authorization` error
    /// otherwise.
    pub async fn require(
        &self,
        requirement: impl Into<AccessRequirement>,
    ) -> AppResult<Arc<Session>> {
        let session = self.current().await?;
        let requirement = requirement.into();
        if session.has_access(requirement.clone()) {
            Ok(session)
        } else {
            Err(AppError::authorization(format!(
                "Permission denied: requires {}",
                describe(&requirement)
            )))
        }
    }

    /// Permissions in force; none when signed out.
    pub async fn effective_permissions(&self) -> PermissionSet {
        self.store
            .session()
            .await
            .map(|s| s.effective_permissions())
            .unwrap_or_default()
    }

    /// Company that scoped requests run under.
    pub async fn company_id(&self) -> AppResult<CompanyId> {
        Ok(self.current().await?.company_id())
    }

    /// Kind of the company that scoped requests run under.
    pub async fn company_type(&self) -> AppResult<AccountKind> {
        Ok(self.current().await?.company_type())
    }

    /// Persist a login response and resolve the new session.
    pub async fn save_login(&self, response: &LoginResponse) -> AppResult<Arc<Session>> {
        let login = self.store.save_login(response).await?;
        info!(
            user_id = %login.user.id,
            is_collaborator = login.is_collaborator,
            "Signed in"
        );
        self.current().await
    }

    /// Switch the active company.
    ///
    /// Switching to [`CompanyScope::Own`] drops the company fields and the
    /// cached permissions. Switching into a company takes the link's kind
    /// and permissions (all off when the link carries none). A collaborator
    /// left without permissions is denied every gated action.
    pub async fn switch_context(
        &self,
        target: CompanyScope,
        link: Option<LinkContext>,
    ) -> AppResult<Arc<Session>> {
        let mut login = self
            .store
            .login()
            .await?
            .ok_or_else(|| AppError::session("No session to switch"))?;

        let link = link.unwrap_or_default();
        login.apply_scope(target, link.company_type, link.permissions);
        self.store.write_login(&login).await?;

        self.store.set_selected_scope(target).await?;
        let business_type = match target {
            CompanyScope::Own => None,
            CompanyScope::Company(_) => link.company_type.map(|k| k.as_str()),
        };
        self.store.set_selected_business_type(business_type).await?;

        let session = self.current().await?;
        let receivers = self
            .events
            .publish(ContextEvent::CompanyChanged { scope: target });
        info!(scope = %target, receivers, "Switched company context");
        Ok(session)
    }

    /// Sign out: clear every persisted key and the cache. Idempotent.
    pub async fn logout(&self) -> AppResult<()> {
        let was_signed_in = self.store.session().await.is_some();
        self.store.clear().await?;
        if was_signed_in {
            self.events.publish(ContextEvent::LoggedOut);
            info!("Signed out");
        } else {
            warn!("Logout requested without an active session");
        }
        Ok(())
    }
}

fn describe(requirement: &AccessRequirement) -> String {
    match requirement {
        AccessRequirement::Tag(tag) => tag.as_str().to_string(),
        AccessRequirement::AnyOf(tags) => tags
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" or "),
    }
}
