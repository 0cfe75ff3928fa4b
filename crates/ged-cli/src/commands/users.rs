//! Commands for users linked to the active company.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ged_core::error::AppError;
use ged_core::types::LinkId;
use ged_entity::link::UserBusinessLink;
use ged_entity::permission::{PermissionSet, PermissionTag};

use super::{Context, describe_permissions};
use crate::output;
use crate::prompt;

/// Arguments for linked-user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// Linked-user subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users linked to the active company
    List,
    /// Link an existing user by email
    Add {
        /// Email of the user to link
        email: String,
        /// Granted permission (repeatable)
        #[arg(short, long = "permission")]
        permissions: Vec<PermissionTag>,
    },
    /// Activate a link
    Activate {
        /// Link ID
        id: LinkId,
    },
    /// Deactivate a link
    Deactivate {
        /// Link ID
        id: LinkId,
    },
    /// Replace the permissions of a link
    Permissions {
        /// Link ID
        id: LinkId,
        /// Permission to grant; omit all to revoke everything (repeatable)
        #[arg(short, long = "permission")]
        permissions: Vec<PermissionTag>,
    },
    /// Remove a link
    Remove {
        /// Link ID
        id: LinkId,
        /// Skip confirmation prompts
        #[arg(long)]
        force: bool,
    },
}

/// Linked-user display row for table output
#[derive(Debug, Serialize, Tabled)]
struct LinkRow {
    /// Link ID
    id: i64,
    /// User ID
    user_id: i64,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Account kind
    kind: String,
    /// Status
    status: String,
    /// Permissions
    permissions: String,
}

impl From<&UserBusinessLink> for LinkRow {
    fn from(link: &UserBusinessLink) -> Self {
        Self {
            id: link.id.get(),
            user_id: link.user_id.get(),
            name: output::or_dash(link.nome.as_deref()),
            email: link.email.clone(),
            kind: link.type_user.to_string(),
            status: link.status.to_string(),
            permissions: describe_permissions(&link.effective_permissions()),
        }
    }
}

/// Execute linked-user commands
pub async fn execute(args: &UserArgs, ctx: &Context) -> Result<(), AppError> {
    ctx.resolver
        .require(PermissionTag::ManageCollaborators)
        .await?;
    let service = &ctx.services.links;

    let changed = match &args.command {
        UserCommand::List => {
            let links = service.list_for_company(&ctx.cancel).await?;
            let rows: Vec<LinkRow> = links.iter().map(LinkRow::from).collect();
            output::print_list(&rows, ctx.format);
            return Ok(());
        }
        UserCommand::Add { email, permissions } => {
            let permissions = (!permissions.is_empty()).then(|| PermissionSet::from_tags(permissions));
            let link = service.add_by_email(email, permissions, &ctx.cancel).await?;
            output::print_success(&format!("{} linked to the company", link.email));
            link
        }
        UserCommand::Activate { id } => service.activate(*id, &ctx.cancel).await?,
        UserCommand::Deactivate { id } => service.deactivate(*id, &ctx.cancel).await?,
        UserCommand::Permissions { id, permissions } => {
            service
                .update_permissions(*id, PermissionSet::from_tags(permissions), &ctx.cancel)
                .await?
        }
        UserCommand::Remove { id, force } => {
            if !prompt::confirm(&format!("Remove link {id} from the company?"), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            let response = service.remove(*id, &ctx.cancel).await?;
            output::print_success(&response.message);
            return Ok(());
        }
    };

    output::print_list(&[LinkRow::from(&changed)], ctx.format);
    Ok(())
}
