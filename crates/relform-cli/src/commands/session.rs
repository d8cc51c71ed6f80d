//! Session commands - Store and clear the credential pair
//!
//! Login itself happens outside relform; `login` only stores the tokens the
//! backend issued so later commands can authenticate and refresh them.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use relform_core::{config::Config, domain::Credentials, ports::ISessionStore};
use tracing::info;

use crate::context::{load_config, session_store};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Access token issued by the backend
    #[arg(long)]
    pub access_token: String,
    /// Refresh token issued by the backend
    #[arg(long)]
    pub refresh_token: String,
}

impl LoginCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let config = load_config(config)?;

        require_persistent_backend(&config)?;

        session_store(&config)
            .set(&Credentials::new(
                self.access_token.clone(),
                self.refresh_token.clone(),
            ))
            .context("Failed to store session")?;

        info!(backend = %config.session.backend, "Session stored");
        formatter.success("Session stored");
        Ok(())
    }
}

/// A `memory` store dies with the process, so a stored login would be lost
fn require_persistent_backend(config: &Config) -> Result<()> {
    if config.session.backend == "memory" {
        anyhow::bail!(
            "Session backend 'memory' cannot keep a login; set `session.backend: keyring`"
        );
    }
    Ok(())
}

#[derive(Debug, Args)]
pub struct LogoutCommand;

impl LogoutCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let config = load_config(config)?;

        session_store(&config)
            .clear()
            .context("Failed to clear session")?;

        info!(backend = %config.session.backend, "Session cleared");
        formatter.success("Session cleared");
        Ok(())
    }
}
