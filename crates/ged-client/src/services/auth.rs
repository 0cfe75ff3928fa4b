//! Sign-in and sign-out.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use ged_core::result::AppResult;
use ged_entity::auth::{LoginRequest, LoginResponse};
use ged_session::{Session, SessionResolver};

use crate::http::ApiClient;

/// A completed login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The server's response.
    pub response: LoginResponse,
    /// The session resolved from it.
    pub session: Arc<Session>,
}

/// Authentication against `/api/v1/auth/login`.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    resolver: SessionResolver,
}

impl AuthService {
    pub fn new(api: ApiClient, resolver: SessionResolver) -> Self {
        Self { api, resolver }
    }

    /// Sign in and persist the session.
    ///
    /// The form is validated before any request is made. One endpoint
    /// serves owners and collaborators alike.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> AppResult<LoginOutcome> {
        let request = LoginRequest::new(email, password);
        request.check()?;

        let response: LoginResponse = self
            .api
            .post("/api/v1/auth/login")?
            .anonymous()
            .json(&request)?
            .send(cancel)
            .await?;

        let session = self.resolver.save_login(&response).await?;
        info!(
            user_id = %session.principal.user_id,
            kind = %session.principal.account_kind,
            "Login accepted"
        );
        Ok(LoginOutcome { response, session })
    }

    /// Clear the persisted session.
    pub async fn logout(&self) -> AppResult<()> {
        self.resolver.logout().await
    }
}
