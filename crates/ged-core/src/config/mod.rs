//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so the client runs with no
//! configuration file at all.

pub mod api;
pub mod logging;
pub mod session;
pub mod ui;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::session::{SessionConfig, SessionStorageKind};
pub use self::ui::UiConfig;

use crate::error::AppError;

/// Root client configuration.
///
/// Top-level deserialization target for the merged TOML files
/// (default + environment overlay) and `GED__*` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Persisted session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// User-interface preferences.
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `path` (or `config/default` when `None`), an optional
    /// `config/<env>` overlay, and environment variables prefixed with
    /// `GED` using `__` as the section separator.
    pub fn load(path: Option<&str>, env: &str) -> Result<Self, AppError> {
        let base = path.unwrap_or("config/default");
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(path.is_some()))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GED")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
