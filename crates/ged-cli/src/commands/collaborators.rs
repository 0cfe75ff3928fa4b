//! Collaborator account commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ged_core::error::AppError;
use ged_core::types::{CollaboratorId, CompanyId};
use ged_entity::collaborator::{Collaborator, CreateCollaborator, UpdateCollaborator};
use ged_entity::permission::{PermissionSet, PermissionTag};
use ged_entity::principal::AccountKind;

use super::{Context, describe_permissions};
use crate::output::{self, OutputFormat};
use crate::prompt;

/// Arguments for collaborator commands
#[derive(Debug, Args)]
pub struct CollaboratorArgs {
    /// Collaborator subcommand
    #[command(subcommand)]
    pub command: CollaboratorCommand,
}

/// Collaborator subcommands
#[derive(Debug, Subcommand)]
pub enum CollaboratorCommand {
    /// List collaborators
    List {
        /// Company to list (defaults to the active company)
        #[arg(long, requires = "kind")]
        company: Option<CompanyId>,
        /// Kind of that company
        #[arg(long)]
        kind: Option<AccountKind>,
    },
    /// Show one collaborator
    Show {
        /// Collaborator ID
        id: CollaboratorId,
    },
    /// Create a collaborator in the active company
    Create {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,
        /// Granted permission (repeatable)
        #[arg(short, long = "permission")]
        permissions: Vec<PermissionTag>,
    },
    /// Rename a collaborator or replace their permissions
    Update {
        /// Collaborator ID
        id: CollaboratorId,
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// Permission to grant; the given set replaces the current one (repeatable)
        #[arg(short, long = "permission")]
        permissions: Vec<PermissionTag>,
        /// Revoke every permission
        #[arg(long, conflicts_with = "permissions")]
        no_permissions: bool,
    },
    /// Deactivate a collaborator and delete everything they own
    Deactivate {
        /// Collaborator ID
        id: CollaboratorId,
        /// Skip confirmation prompts
        #[arg(long)]
        force: bool,
    },
    /// Ask the server whether a collaborator holds a permission
    Check {
        /// Collaborator ID
        id: CollaboratorId,
        /// Permission to check
        permission: PermissionTag,
    },
}

/// Collaborator display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CollaboratorRow {
    /// Collaborator ID
    id: i64,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Active
    active: String,
    /// Permissions
    permissions: String,
    /// Created at
    created_at: String,
}

impl From<&Collaborator> for CollaboratorRow {
    fn from(c: &Collaborator) -> Self {
        Self {
            id: c.id.get(),
            name: c.name.clone(),
            email: c.email.clone(),
            active: output::yes_no(c.is_active).to_string(),
            permissions: describe_permissions(&c.permissions),
            created_at: output::or_dash(c.created_at.map(|t| t.format("%Y-%m-%d %H:%M"))),
        }
    }
}

fn print_one(collaborator: &Collaborator, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(collaborator, "{}"),
        OutputFormat::Table => output::print_list(&[CollaboratorRow::from(collaborator)], format),
    }
}

/// Execute collaborator commands
pub async fn execute(args: &CollaboratorArgs, ctx: &Context) -> Result<(), AppError> {
    let session = ctx
        .resolver
        .require(PermissionTag::ManageCollaborators)
        .await?;
    let service = &ctx.services.collaborators;

    match &args.command {
        CollaboratorCommand::List { company, kind } => {
            let listing = match (company, kind) {
                (Some(id), Some(kind)) => {
                    service.list_for_company(*id, *kind, &ctx.cancel).await?
                }
                _ => service.list_current(&ctx.cancel).await?,
            };
            let rows: Vec<CollaboratorRow> =
                listing.collaborators.iter().map(CollaboratorRow::from).collect();
            output::print_list(&rows, ctx.format);
        }
        CollaboratorCommand::Show { id } => {
            let collaborator = service.get(*id, &ctx.cancel).await?;
            print_one(&collaborator, ctx.format);
        }
        CollaboratorCommand::Create {
            email,
            name,
            password,
            permissions,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Collaborator password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };
            let form = CreateCollaborator {
                email: email.trim().to_string(),
                password,
                name: name.trim().to_string(),
                company_id: session.company_id(),
                company_type: session.company_type(),
                permissions: PermissionSet::from_tags(permissions),
            };
            let created = service.create(&form, &ctx.cancel).await?;
            output::print_success(&format!(
                "Collaborator '{}' created with id {}",
                created.name, created.id
            ));
        }
        CollaboratorCommand::Update {
            id,
            name,
            permissions,
            no_permissions,
        } => {
            let permissions = if *no_permissions {
                Some(PermissionSet::none())
            } else if permissions.is_empty() {
                None
            } else {
                Some(PermissionSet::from_tags(permissions))
            };
            let update = UpdateCollaborator {
                name: name.clone(),
                permissions,
            };
            let updated = service.update(*id, &update, &ctx.cancel).await?;
            output::print_success(&format!("Collaborator {} updated", updated.id));
            print_one(&updated, ctx.format);
        }
        CollaboratorCommand::Deactivate { id, force } => {
            let warning = format!(
                "Deactivate collaborator {id}?\n\nEvery file and folder this collaborator owns will be permanently deleted. This action CANNOT be undone!"
            );
            if !prompt::confirm(&warning, *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            let response = service.deactivate(*id, &ctx.cancel).await?;
            output::print_success(&response.message);
        }
        CollaboratorCommand::Check { id, permission } => {
            let check = service.check_permission(*id, *permission, &ctx.cancel).await?;
            match ctx.format {
                OutputFormat::Json => output::print_json(&check, "{}"),
                OutputFormat::Table => output::print_kv(
                    check.permission.as_str(),
                    output::yes_no(check.has_permission),
                ),
            }
        }
    }

    Ok(())
}
