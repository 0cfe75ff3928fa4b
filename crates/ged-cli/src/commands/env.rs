//! Environment selection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ged_core::error::AppError;
use ged_core::types::CompanyScope;

use super::{Context, describe_permissions};
use crate::output;

/// Arguments for environment commands
#[derive(Debug, Args)]
pub struct EnvArgs {
    /// Environment subcommand
    #[command(subcommand)]
    pub command: EnvCommand,
}

/// Environment subcommands
#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// List the companies you are linked to
    List,
    /// Work inside a linked company, or `own` for your own space
    Use {
        /// Company id or `own`
        target: CompanyScope,
    },
}

/// Company display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CompanyRow {
    /// Marks the active company
    active: String,
    /// Company ID
    business_id: i64,
    /// Company name
    name: String,
    /// Company kind
    kind: String,
    /// Link status
    status: String,
    /// Permissions granted through the link
    permissions: String,
}

/// Execute environment commands
pub async fn execute(args: &EnvArgs, ctx: &Context) -> Result<(), AppError> {
    match &args.command {
        EnvCommand::List => {
            let session = ctx.resolver.current().await?;
            let listing = ctx.services.companies.my_companies(&ctx.cancel).await?;
            let active = session.context.active_company;

            let rows: Vec<CompanyRow> = listing
                .companies
                .iter()
                .map(|c| CompanyRow {
                    active: if active == CompanyScope::Company(c.business_id) {
                        "*".into()
                    } else {
                        String::new()
                    },
                    business_id: c.business_id.get(),
                    name: c.label(),
                    kind: c.business_type.to_string(),
                    status: c.status.to_string(),
                    permissions: describe_permissions(&c.permissions.unwrap_or_default()),
                })
                .collect();

            output::print_list(&rows, ctx.format);
        }
        EnvCommand::Use { target } => {
            let session = match target {
                CompanyScope::Own => ctx.services.companies.leave().await?,
                CompanyScope::Company(id) => {
                    ctx.services.companies.enter(*id, &ctx.cancel).await?
                }
            };
            output::print_success(&format!(
                "Active company: {} ({})",
                session.context.active_company,
                session.company_type()
            ));
        }
    }

    Ok(())
}
