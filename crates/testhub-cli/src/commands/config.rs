//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use testhub_core::config::AppConfig;
use testhub_core::error::AppError;
use testhub_store::redis::mask_redis_url;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file merged with environment)
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => {
                let mut shown = config.clone();
                shown.store.redis.url = mask_redis_url(&shown.store.redis.url);
                output::print_json(&shown);
            }
            OutputFormat::Table => {
                println!("Store");
                output::print_kv("provider", &config.store.provider);
                output::print_kv("local root", &config.store.local.root);
                output::print_kv("redis url", &mask_redis_url(&config.store.redis.url));
                output::print_kv("redis key prefix", &config.store.redis.key_prefix);
                println!("Folders");
                output::print_kv("orphan policy", &config.folders.orphan_policy.to_string());
                output::print_kv(
                    "persist failure",
                    &config.folders.persist_failure.to_string(),
                );
                println!("Logging");
                output::print_kv("level", &config.logging.level);
                output::print_kv("format", &config.logging.format);
            }
        },
    }
    Ok(())
}
