//! Trash commands, driven through the trash view so every destructive
//! action goes through its confirmation dialogs.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ged_client::view::{ActionOutcome, TrashView};
use ged_core::error::AppError;
use ged_core::types::NodeId;
use ged_entity::permission::PermissionTag;
use ged_entity::trash::TrashEntry;

use super::Context;
use crate::output;
use crate::prompt::TerminalPrompter;

/// Arguments for trash commands
#[derive(Debug, Args)]
pub struct TrashArgs {
    /// Trash subcommand
    #[command(subcommand)]
    pub command: TrashCommand,
}

/// Trash subcommands
#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    /// List trashed items
    List {
        /// Only show items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Restore an item
    Restore {
        /// Item ID
        id: NodeId,
        /// Restore under this folder instead of the original parent
        #[arg(long)]
        to: Option<NodeId>,
        /// Skip confirmation prompts
        #[arg(long)]
        force: bool,
    },
    /// Permanently delete an item (folders take their contents with them)
    Purge {
        /// Item ID
        id: NodeId,
        /// Skip confirmation prompts
        #[arg(long)]
        force: bool,
    },
    /// Permanently delete everything in the trash
    Empty {
        /// Only items trashed more than this many days ago
        #[arg(long)]
        older_than_days: Option<u32>,
        /// Skip confirmation prompts
        #[arg(long)]
        force: bool,
    },
}

impl TrashCommand {
    fn force(&self) -> bool {
        match self {
            Self::List { .. } => false,
            Self::Restore { force, .. } | Self::Purge { force, .. } | Self::Empty { force, .. } => {
                *force
            }
        }
    }
}

/// Trash entry display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TrashRow {
    /// Item ID
    id: i64,
    /// Name
    name: String,
    /// File or folder
    kind: String,
    /// Items trashed with a folder
    contents: String,
    /// Size
    size: String,
    /// Deleted at
    deleted_at: String,
}

impl From<&TrashEntry> for TrashRow {
    fn from(entry: &TrashEntry) -> Self {
        Self {
            id: entry.id().get(),
            name: entry.name().to_string(),
            kind: entry.node.node_type.to_string(),
            contents: if entry.is_folder() {
                entry.children_count.to_string()
            } else {
                "-".to_string()
            },
            size: output::or_dash(entry.node.size.as_deref()),
            deleted_at: entry.deleted_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute trash commands
pub async fn execute(args: &TrashArgs, ctx: &Context) -> Result<(), AppError> {
    ctx.resolver.require(PermissionTag::ManageFiles).await?;

    let prompter = Arc::new(TerminalPrompter::new(args.command.force()));
    let view = TrashView::new(ctx.services.trash.clone(), prompter);
    view.refresh(&ctx.cancel).await?;

    let outcome = match &args.command {
        TrashCommand::List { search } => {
            if let Some(term) = search {
                view.set_search(term.as_str()).await;
            }
            let rows: Vec<TrashRow> = view.visible().await.iter().map(TrashRow::from).collect();
            output::print_list(&rows, ctx.format);
            return Ok(());
        }
        TrashCommand::Restore { id, to, .. } => {
            let entry = find(&view, *id).await?;
            view.restore(&entry, *to, &ctx.cancel).await?
        }
        TrashCommand::Purge { id, .. } => {
            let entry = find(&view, *id).await?;
            view.purge(&entry, &ctx.cancel).await?
        }
        TrashCommand::Empty {
            older_than_days, ..
        } => view.empty_all(*older_than_days, &ctx.cancel).await?,
    };

    match outcome {
        ActionOutcome::Declined => {
            println!("Cancelled.");
            Ok(())
        }
        ActionOutcome::AlreadyEmpty | ActionOutcome::Completed(_) => Ok(()),
        ActionOutcome::Failed(e) => Err(e),
    }
}

async fn find(view: &TrashView, id: NodeId) -> Result<TrashEntry, AppError> {
    view.find(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Item {id} is not in the trash")))
}
