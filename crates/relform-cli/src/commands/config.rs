//! Config command - View and validate relform configuration
//!
//! Provides the `relform config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file and reports errors

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use relform_core::config::Config;
use tracing::info;

use crate::context::config_path;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, explicit: Option<&Path>, format: OutputFormat) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(explicit, format),
            ConfigCommand::Validate => execute_validate(explicit, format),
        }
    }
}

fn execute_show(explicit: Option<&Path>, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(format);
    let path = config_path(explicit);
    let config = Config::load_or_default(&path);

    info!(config_path = %path.display(), "Showing configuration");

    if format.is_json() {
        let json =
            serde_json::to_value(&config).context("Failed to serialize configuration to JSON")?;
        formatter.print_json(&json);
    } else {
        formatter.success(&format!("Configuration ({})", path.display()));
        formatter.info("");

        let yaml =
            serde_yaml::to_string(&config).context("Failed to serialize configuration to YAML")?;
        for line in yaml.lines() {
            formatter.info(line);
        }
    }

    Ok(())
}

fn execute_validate(explicit: Option<&Path>, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(format);
    let path = config_path(explicit);

    let config = match Config::load(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            let message = if path.exists() {
                format!("Failed to parse configuration: {e:#}")
            } else {
                "Configuration file not found. Using defaults.".to_string()
            };
            if format.is_json() {
                formatter.print_json(&serde_json::json!({
                    "valid": false,
                    "config_path": path.display().to_string(),
                    "errors": [message],
                }));
            } else if path.exists() {
                formatter.error(&message);
                formatter.info(&format!("File: {}", path.display()));
            } else {
                formatter.info(&format!("Configuration file not found at {}", path.display()));
                formatter.info("Using default configuration.");
            }
            return Ok(());
        }
    };

    info!(config_path = %path.display(), "Validating configuration");
    let errors = config.validate();

    if format.is_json() {
        let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        formatter.print_json(&serde_json::json!({
            "valid": errors.is_empty(),
            "config_path": path.display().to_string(),
            "errors": error_strings,
        }));
    } else if errors.is_empty() {
        formatter.success("Configuration is valid");
        formatter.info(&format!("File: {}", path.display()));
    } else {
        formatter.error(&format!(
            "Configuration has {} error{}:",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        ));
        formatter.info(&format!("File: {}", path.display()));
        for error in &errors {
            formatter.info(&format!("  {} - {}", error.field, error.message));
        }
    }

    Ok(())
}
