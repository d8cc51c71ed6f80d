//! Relform CLI - Command-line front end for the related-user form
//!
//! Provides commands for:
//! - Showing, creating and updating related users
//! - Searching permission groups
//! - Storing and clearing the session credentials
//! - Inspecting the configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use relform_core::config::Config;
use tracing_subscriber::EnvFilter;

mod adapters;
mod commands;
mod context;
mod output;

use commands::{
    completions::CompletionsCommand,
    config::ConfigCommand,
    groups::GroupsCommand,
    related_user::{CreateCommand, ShowCommand, UpdateCommand},
    session::{LoginCommand, LogoutCommand},
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "relform", version, about = "Headless related-user form client")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a related user
    Show(ShowCommand),
    /// Create a related user
    Create(CreateCommand),
    /// Update a related user
    Update(UpdateCommand),
    /// Search permission groups
    Groups(GroupsCommand),
    /// Store session credentials
    Login(LoginCommand),
    /// Clear the stored session
    Logout(LogoutCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing: RUST_LOG, then -v, then logging.level from the config file
    let configured_level = Config::load_or_default(&context::config_path(cli.config.as_deref()))
        .logging
        .level;
    let filter = match cli.verbose {
        0 => configured_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Show(cmd) => cmd.execute(config_path, format).await,
        Commands::Create(cmd) => cmd.execute(config_path, format).await,
        Commands::Update(cmd) => cmd.execute(config_path, format).await,
        Commands::Groups(cmd) => cmd.execute(config_path, format).await,
        Commands::Login(cmd) => cmd.execute(config_path, format).await,
        Commands::Logout(cmd) => cmd.execute(config_path, format).await,
        Commands::Config(cmd) => cmd.execute(config_path, format).await,
        Commands::Completions(cmd) => cmd.execute(format).await,
    }
}
