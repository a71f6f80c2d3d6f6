//! CLI command definitions and dispatch.

pub mod config;
pub mod folder;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use testhub_core::config::AppConfig;
use testhub_core::error::AppError;

/// TestHub test case folder management
#[derive(Debug, Parser)]
#[command(name = "testhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

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
    /// Folder tree management
    Folder(folder::FolderArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, app_config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Folder(args) => folder::execute(args, &app_config, self.format).await,
            Commands::Config(args) => config::execute(args, &app_config, self.format),
        }
    }
}
