//! CLI command definitions and dispatch.

pub mod auth;
pub mod collaborators;
pub mod env;
pub mod files;
pub mod metrics;
pub mod trash;
pub mod users;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use ged_client::ApiClient;
use ged_client::services::Services;
use ged_core::config::AppConfig;
use ged_core::error::AppError;
use ged_core::events::EventBus;
use ged_entity::permission::PermissionSet;
use ged_session::{SessionResolver, SessionStore};

use crate::output::OutputFormat;

/// GED: document management from the terminal
#[derive(Debug, Parser)]
#[command(name = "ged", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to config/default)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Configuration overlay to apply (config/<env>.toml)
    #[arg(short, long, env = "GED_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in
    Login(auth::LoginArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in principal and active company
    Whoami,
    /// Environment selection: list linked companies or switch into one
    Env(env::EnvArgs),
    /// Browse and organise files and folders
    Files(files::FileArgs),
    /// Trash management
    Trash(trash::TrashArgs),
    /// Collaborator accounts of the active company
    Collaborators(collaborators::CollaboratorArgs),
    /// Users linked to the active company
    Users(users::UserArgs),
    /// Storage metrics
    Metrics(metrics::MetricsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let ctx = Context::build(config, self.format).await?;
        match &self.command {
            Commands::Login(args) => auth::login(args, &ctx).await,
            Commands::Logout => auth::logout(&ctx).await,
            Commands::Whoami => auth::whoami(&ctx).await,
            Commands::Env(args) => env::execute(args, &ctx).await,
            Commands::Files(args) => files::execute(args, &ctx).await,
            Commands::Trash(args) => trash::execute(args, &ctx).await,
            Commands::Collaborators(args) => collaborators::execute(args, &ctx).await,
            Commands::Users(args) => users::execute(args, &ctx).await,
            Commands::Metrics(args) => metrics::execute(args, &ctx).await,
        }
    }
}

/// Everything a command needs, wired from configuration.
pub struct Context {
    pub config: AppConfig,
    pub format: OutputFormat,
    pub resolver: SessionResolver,
    pub services: Services,
    /// Cancelled on Ctrl-C so an in-flight request is dropped.
    pub cancel: CancellationToken,
}

impl Context {
    async fn build(config: AppConfig, format: OutputFormat) -> Result<Self, AppError> {
        let store = Arc::new(SessionStore::from_config(&config.session).await?);
        let resolver = SessionResolver::new(store.clone(), EventBus::new(config.session.event_buffer));
        let api = ApiClient::new(&config.api, store)?;
        debug!(base_url = api.base_url(), "API client ready");
        let services = Services::new(api, resolver.clone());

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });

        Ok(Self {
            config,
            format,
            resolver,
            services,
            cancel,
        })
    }
}

/// Render granted permissions as a comma-separated list.
pub fn describe_permissions(permissions: &PermissionSet) -> String {
    let granted: Vec<&str> = permissions.granted().map(|t| t.as_str()).collect();
    if granted.is_empty() {
        "none".to_string()
    } else {
        granted.join(", ")
    }
}
