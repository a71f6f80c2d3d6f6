//! Folder management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use testhub_core::config::AppConfig;
use testhub_core::error::AppError;
use testhub_core::types::{FolderId, ProjectId};
use testhub_entity::folder::{Folder, FolderNode};
use testhub_service::{FolderService, KvFolderStore, RequestContext};
use testhub_store::StoreManager;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Project whose folders are managed
    #[arg(short, long)]
    pub project: ProjectId,

    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List all folders of the project
    List,
    /// Show the folder tree
    Tree,
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        #[arg(long)]
        id: String,
        /// New name
        #[arg(short, long)]
        name: String,
    },
    /// Delete a folder and everything below it
    Delete {
        /// Folder ID
        #[arg(long)]
        id: String,
    },
    /// Move a folder under a new parent
    Move {
        /// Folder ID
        #[arg(long)]
        id: String,
        /// New parent folder ID (omit to move to root)
        #[arg(long)]
        parent: Option<String>,
    },
    /// Show the path from the root to a folder
    Path {
        /// Folder ID
        #[arg(long)]
        id: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Parent ID
    parent: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.to_string(),
            name: folder.name.clone(),
            parent: folder
                .parent_id
                .as_ref()
                .map(FolderId::to_string)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let kv = StoreManager::new(&config.store).await?;
    let service = FolderService::new(Arc::new(KvFolderStore::new(Arc::new(kv))), config.folders);
    let ctx = RequestContext::local_admin();
    let project = args.project;

    match &args.command {
        FolderCommand::List => {
            let folders = service.list_folders(&ctx, project).await?;
            let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Tree => {
            let tree = service.get_tree(&ctx, project).await?;
            match format {
                OutputFormat::Json => output::print_json(&tree),
                OutputFormat::Table => {
                    println!("/");
                    print_nodes(&tree.roots, "");
                    println!("\n{} folder(s)", tree.total_folders);
                }
            }
        }
        FolderCommand::Create { name, parent } => {
            let parent = parent.as_deref().map(FolderId::from);
            let folder = service.create_folder(&ctx, project, name, parent).await?;
            match format {
                OutputFormat::Json => output::print_json(&folder),
                OutputFormat::Table => output::print_success(&format!(
                    "Folder '{}' created (id: {})",
                    folder.name, folder.id
                )),
            }
        }
        FolderCommand::Rename { id, name } => {
            service
                .rename_folder(&ctx, project, &FolderId::from(id.as_str()), name)
                .await?;
            output::print_success(&format!("Folder {id} renamed to '{name}'"));
        }
        FolderCommand::Delete { id } => {
            let removed = service
                .delete_folder(&ctx, project, &FolderId::from(id.as_str()))
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&removed),
                OutputFormat::Table if removed.is_empty() => {
                    output::print_success(&format!("Folder {id} does not exist; nothing deleted"))
                }
                OutputFormat::Table => output::print_success(&format!(
                    "Deleted {} folder(s)",
                    removed.len()
                )),
            }
        }
        FolderCommand::Move { id, parent } => {
            let parent = parent.as_deref().map(FolderId::from);
            let target = parent
                .as_ref()
                .map(FolderId::to_string)
                .unwrap_or_else(|| "root".to_string());
            service
                .move_folder(&ctx, project, &FolderId::from(id.as_str()), parent)
                .await?;
            output::print_success(&format!("Folder {id} moved to {target}"));
        }
        FolderCommand::Path { id } => {
            let path = service
                .get_folder_path(&ctx, project, &FolderId::from(id.as_str()))
                .await?;
            if path.is_empty() {
                return Err(AppError::not_found(format!("Folder '{id}' not found")));
            }
            match format {
                OutputFormat::Json => output::print_json(&path),
                OutputFormat::Table => {
                    let names: Vec<&str> = path.iter().map(|f| f.name.as_str()).collect();
                    println!("/{}", names.join("/"));
                }
            }
        }
    }

    Ok(())
}

fn print_nodes(nodes: &[FolderNode], prefix: &str) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let branch = if last { "└── " } else { "├── " };
        println!("{prefix}{branch}{} ({})", node.name, node.id);

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        print_nodes(&node.children, &child_prefix);
    }
}
