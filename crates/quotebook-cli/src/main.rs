//! quotebook CLI - Random quotes from the terminal
//!
//! Shows, adds and imports quotes, and keeps them in step with a remote source.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use std::path::Path;

use clap::Parser;
use quotebook_core::config::SyncConfig;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_db_path;
use crate::commands::{
    categories, completions, delete, export, filter, import, list, publish, random, sync, watch,
};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("quotebook_core=info,quotebook_cli=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);
    run_command(cli.command, &db_path, SyncConfig::from_env).await
}

/// Dispatch one command. Only commands that reach the remote source call
/// `remote_config`.
async fn run_command(
    command: Option<Commands>,
    db_path: &Path,
    remote_config: impl Fn() -> quotebook_core::Result<SyncConfig>,
) -> Result<(), CliError> {
    match command {
        None => random::run_random(None, false, db_path),
        Some(Commands::Random { category, json }) => {
            random::run_random(category.as_deref(), json, db_path)
        }
        Some(Commands::Add {
            text,
            category,
            author,
        }) => commands::add::run_add(&text, &category, author.as_deref(), db_path),
        Some(Commands::List { category, json }) => {
            list::run_list(category.as_deref(), json, db_path)
        }
        Some(Commands::Categories { json }) => categories::run_categories(json, db_path),
        Some(Commands::Filter { category }) => filter::run_filter(category.as_deref(), db_path),
        Some(Commands::Delete { position }) => delete::run_delete(position, db_path),
        Some(Commands::Reset) => commands::reset::run_reset(db_path),
        Some(Commands::Export { output, stdout }) => {
            export::run_export(output.as_deref(), stdout, db_path)
        }
        Some(Commands::Import { path }) => import::run_import(&path, db_path),
        Some(Commands::Sync { strategy, json }) => {
            sync::run_sync(strategy.map(Into::into), json, db_path, &remote_config()?).await
        }
        Some(Commands::Watch { interval, strategy }) => {
            let config = remote_config()?;
            watch::run_watch(interval, strategy.map(Into::into), db_path, &config).await
        }
        Some(Commands::Publish { position }) => {
            publish::run_publish(position, db_path, &remote_config()?).await
        }
        Some(Commands::Completions { shell, output }) => {
            completions::run_completions(shell, output.as_deref())
        }
    }
}
