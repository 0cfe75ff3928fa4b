//! Persisted session storage with an in-memory cache of the resolved
//! [`Session`].

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use ged_core::config::SessionConfig;
use ged_core::error::{AppError, ErrorKind};
use ged_core::result::AppResult;
use ged_core::traits::storage::KeyValueStore;
use ged_core::types::CompanyScope;
use ged_entity::auth::LoginResponse;

use crate::keys;
use crate::payload::{StoredLogin, migrate, needs_migration};
use crate::session::Session;
use crate::storage;

/// Reads and writes every persisted session key.
///
/// The parsed [`Session`] is cached after the first successful load and
/// dropped whenever the payload is rewritten or cleared.
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
    cache: RwLock<Option<Arc<Session>>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.backend)
            .finish()
    }
}

impl SessionStore {
    /// Wrap a storage backend.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            cache: RwLock::new(None),
        }
    }

    /// Open the backend selected by configuration.
    pub async fn from_config(config: &SessionConfig) -> AppResult<Self> {
        Ok(Self::new(storage::from_config(config).await?))
    }

    /// The underlying backend.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Read and migrate the login payload.
    ///
    /// Returns `Ok(None)` when nothing is stored. Legacy payloads are
    /// written back in the current schema.
    pub async fn login(&self) -> AppResult<Option<StoredLogin>> {
        let Some(text) = self.backend.get(keys::LOGIN_PAYLOAD).await? else {
            return Ok(None);
        };
        let raw: Value = serde_json::from_str(&text).map_err(|e| {
            AppError::with_source(
                ErrorKind::Session,
                format!("Login payload is not valid JSON: {e}"),
                e,
            )
        })?;

        let upgraded = needs_migration(&raw);
        let login = migrate(raw)?;
        if upgraded {
            self.write_payload(&login).await?;
            debug!(user_id = %login.user.id, "Rewrote login payload in current schema");
        }
        Ok(Some(login))
    }

    /// The resolved session, or `None` when nobody is signed in.
    ///
    /// An unusable payload counts as signed out; the cause is logged.
    pub async fn session(&self) -> Option<Arc<Session>> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            return Some(Arc::clone(cached));
        }

        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.as_ref() {
            return Some(Arc::clone(cached));
        }

        match self.login().await {
            Ok(Some(login)) => {
                let session = Arc::new(Session::from_login(&login));
                *cache = Some(Arc::clone(&session));
                Some(session)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring unusable login payload");
                None
            }
        }
    }

    /// Replace the login payload.
    pub async fn write_login(&self, login: &StoredLogin) -> AppResult<()> {
        self.write_payload(login).await?;
        self.invalidate().await;
        Ok(())
    }

    async fn write_payload(&self, login: &StoredLogin) -> AppResult<()> {
        let text = serde_json::to_string(login)?;
        self.backend.set(keys::LOGIN_PAYLOAD, &text).await
    }

    /// Persist a successful login the way the web client does.
    pub async fn save_login(&self, response: &LoginResponse) -> AppResult<StoredLogin> {
        let mut raw = serde_json::to_value(response)?;
        let token = match raw.as_object_mut().and_then(|m| m.remove("token")) {
            Some(Value::String(t)) if !t.is_empty() => Some(t),
            _ => None,
        };
        let login = migrate(raw)?;
        self.write_login(&login).await?;

        let token = token.or_else(|| {
            login
                .is_collaborator
                .then(|| format!("collaborator-{}", login.user.id))
        });
        match token {
            Some(token) => self.set_token(&token).await?,
            None => self.backend.remove(keys::TOKEN).await?,
        }

        if login.is_collaborator {
            let kind = login.account_kind();
            self.backend.set(keys::USER_TYPE, "collaborator").await?;
            self.backend.set(keys::TYPE_USER, kind.as_str()).await?;
            if let Some(company_id) = login.company_id {
                self.set_selected_scope(CompanyScope::Company(company_id)).await?;
            }
        } else {
            self.backend.set(keys::USER_TYPE, "owner").await?;
            self.backend
                .set(keys::TYPE_USER, &login.tipo.trim().to_lowercase())
                .await?;
            self.backend.remove(keys::SELECTED_COMPANY).await?;
            self.backend.remove(keys::SELECTED_BUSINESS_TYPE).await?;
        }
        Ok(login)
    }

    /// Bearer token, if any.
    pub async fn token(&self) -> AppResult<Option<String>> {
        self.backend.get(keys::TOKEN).await
    }

    /// Store the bearer token.
    pub async fn set_token(&self, token: &str) -> AppResult<()> {
        self.backend.set(keys::TOKEN, token).await
    }

    /// Persisted UI language.
    pub async fn language(&self) -> AppResult<Option<String>> {
        self.backend.get(keys::LANGUAGE).await
    }

    /// Persist the UI language.
    pub async fn set_language(&self, language: &str) -> AppResult<()> {
        self.backend.set(keys::LANGUAGE, language).await
    }

    /// The selector written at the last context switch.
    pub async fn selected_scope(&self) -> AppResult<Option<CompanyScope>> {
        match self.backend.get(keys::SELECTED_COMPANY).await? {
            Some(raw) => raw.parse().map(Some),
            None => Ok(None),
        }
    }

    pub(crate) async fn set_selected_scope(&self, scope: CompanyScope) -> AppResult<()> {
        self.backend
            .set(keys::SELECTED_COMPANY, &scope.to_string())
            .await
    }

    pub(crate) async fn set_selected_business_type(&self, kind: Option<&str>) -> AppResult<()> {
        match kind {
            Some(kind) => self.backend.set(keys::SELECTED_BUSINESS_TYPE, kind).await,
            None => self.backend.remove(keys::SELECTED_BUSINESS_TYPE).await,
        }
    }

    /// Drop the cached session so the next read goes to storage.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    /// Remove every persisted key and the cache.
    pub async fn clear(&self) -> AppResult<()> {
        self.backend.clear().await?;
        self.invalidate().await;
        Ok(())
    }
}
