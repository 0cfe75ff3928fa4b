//! Document tree commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ged_core::error::AppError;
use ged_core::types::NodeId;
use ged_entity::node::{CreateFolder, Node, NodeFilters};
use ged_entity::permission::PermissionTag;

use super::Context;
use crate::output::{self, OutputFormat};
use crate::prompt;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List a folder (the root by default)
    List {
        /// Folder to list
        #[arg(long)]
        folder: Option<NodeId>,
        /// Only show items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only show documents with this status
        #[arg(long)]
        status: Option<String>,
        /// Only show documents of this type
        #[arg(long = "type")]
        file_type: Option<String>,
    },
    /// Show one file or folder
    Show {
        /// Item ID
        id: NodeId,
    },
    /// Create a folder
    Mkdir {
        /// Folder name
        name: String,
        /// Create it inside this folder instead of the root
        #[arg(long)]
        parent: Option<NodeId>,
    },
    /// Rename a file or folder
    Rename {
        /// Item ID
        id: NodeId,
        /// New name
        name: String,
    },
    /// Move a file or folder
    Move {
        /// Item ID
        id: NodeId,
        /// Destination folder (the root when omitted)
        #[arg(long)]
        to: Option<NodeId>,
    },
    /// Move a file or folder to the trash
    Delete {
        /// Item ID
        id: NodeId,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

impl FileCommand {
    fn is_read_only(&self) -> bool {
        matches!(self, Self::List { .. } | Self::Show { .. })
    }
}

/// Node display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NodeRow {
    /// Item ID
    id: i64,
    /// Name
    name: String,
    /// File or folder
    kind: String,
    /// Status
    status: String,
    /// Size
    size: String,
    /// Created at
    created_at: String,
}

impl From<&Node> for NodeRow {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.get(),
            name: node.name.clone(),
            kind: node.node_type.to_string(),
            status: output::or_dash(node.status.as_deref()),
            size: output::or_dash(node.size.as_deref()),
            created_at: node
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn print_one(node: &Node, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(node, "{}"),
        OutputFormat::Table => output::print_list(&[NodeRow::from(node)], format),
    }
}

/// Execute file commands
pub async fn execute(args: &FileArgs, ctx: &Context) -> Result<(), AppError> {
    if args.command.is_read_only() {
        ctx.resolver
            .require([PermissionTag::ManageFiles, PermissionTag::ViewOnly])
            .await?;
    } else {
        ctx.resolver.require(PermissionTag::ManageFiles).await?;
    }
    let service = &ctx.services.nodes;

    match &args.command {
        FileCommand::List {
            folder,
            search,
            status,
            file_type,
        } => {
            let filters = NodeFilters {
                parent_id: *folder,
                status: status.clone(),
                file_type: file_type.clone(),
                search_term: search.clone(),
            };
            let nodes = service.list(&filters, &ctx.cancel).await?;
            let rows: Vec<NodeRow> = nodes.iter().map(NodeRow::from).collect();
            output::print_list(&rows, ctx.format);
        }
        FileCommand::Show { id } => {
            let node = service.get(*id, &ctx.cancel).await?;
            print_one(&node, ctx.format);
        }
        FileCommand::Mkdir { name, parent } => {
            let created = service
                .create_folder(&CreateFolder::new(name, *parent), &ctx.cancel)
                .await?;
            output::print_success(&format!(
                "Folder '{}' created with id {}",
                created.name, created.id
            ));
        }
        FileCommand::Rename { id, name } => {
            let renamed = service.rename(*id, name, &ctx.cancel).await?;
            output::print_success(&format!("Item {} renamed to '{}'", renamed.id, renamed.name));
        }
        FileCommand::Move { id, to } => {
            let response = service.move_to(*id, *to, &ctx.cancel).await?;
            output::print_success(&response.message);
            print_one(&response.node, ctx.format);
        }
        FileCommand::Delete { id, force } => {
            let node = service.get(*id, &ctx.cancel).await?;
            if !prompt::confirm(&delete_prompt(&node), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            let message = service.delete(*id, &ctx.cancel).await?;
            output::print_success(
                message
                    .as_deref()
                    .unwrap_or("Moved to the trash. Use `ged trash` to restore it."),
            );
        }
    }

    Ok(())
}

fn delete_prompt(node: &Node) -> String {
    if node.is_folder() {
        format!(
            "Do you want to delete the folder \"{}\"?\n\nThe folder and everything in it will be moved to the trash.",
            node.name
        )
    } else {
        format!(
            "Do you want to delete the file \"{}\"?\n\nIt will be moved to the trash.",
            node.name
        )
    }
}
