//! Storage metrics command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ged_core::error::AppError;
use ged_core::types::UserId;
use ged_entity::metrics::MetricsResponse;
use ged_entity::permission::PermissionTag;
use ged_entity::principal::AccountKind;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for `metrics`
#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Show a single user's metrics instead of the active company's
    #[arg(short, long)]
    pub user: Option<UserId>,
    /// Account kind of that user (defaults to the active company's kind)
    #[arg(short, long)]
    pub kind: Option<AccountKind>,
}

/// Documents-per-status row
#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    /// Status
    status: String,
    /// Documents
    documents: u64,
}

/// Execute `metrics`
pub async fn execute(args: &MetricsArgs, ctx: &Context) -> Result<(), AppError> {
    let session = ctx.resolver.require(PermissionTag::ViewMetrics).await?;

    let metrics = match args.user {
        Some(user_id) => {
            let kind = args.kind.unwrap_or_else(|| session.company_type());
            ctx.services
                .metrics
                .user_metrics(user_id, kind, &ctx.cancel)
                .await?
        }
        None => ctx.services.metrics.current(&ctx.cancel).await?,
    };

    match ctx.format {
        OutputFormat::Json => output::print_json(&metrics, "{}"),
        OutputFormat::Table => print_dashboard(&metrics),
    }
    Ok(())
}

fn print_dashboard(metrics: &MetricsResponse) {
    output::print_kv("Storage", &format!("{:.2} MB", metrics.storage.total_mb));
    output::print_kv("Files", &metrics.totals.files.to_string());
    output::print_kv("Folders", &metrics.totals.folders.to_string());
    output::print_kv("Total nodes", &metrics.totals.total.to_string());

    let rows: Vec<StatusRow> = metrics
        .status
        .iter()
        .map(|s| StatusRow {
            status: s.status_name.clone(),
            documents: s.total,
        })
        .collect();
    if !rows.is_empty() {
        println!();
        output::print_list(&rows, OutputFormat::Table);
    }
}
