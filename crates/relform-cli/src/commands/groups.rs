//! Groups command - Search permission groups
//!
//! Runs the same case-insensitive search the form's autocomplete issues and
//! lists the matching groups.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use relform_core::usecases::FormError;
use tracing::debug;

use crate::context::AppContext;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct GroupsCommand {
    /// Text matched against the configured search fields
    pub term: String,
}

impl GroupsCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        if self.term.is_empty() {
            formatter.error("Search term must not be empty");
            return Ok(());
        }

        let ctx = AppContext::load(config, format)?;
        let mut form = ctx.form()?;

        match form.search_permission_groups(&self.term).await {
            Ok(()) => {}
            Err(FormError::Remote(e)) => {
                debug!(error = %e, "Search failure already reported");
                return Ok(());
            }
            Err(other) => {
                formatter.error(&other.to_string());
                return Ok(());
            }
        }

        let groups = form.filtered_permission_groups();
        if format.is_json() {
            let json =
                serde_json::to_value(groups).context("Failed to serialize permission groups")?;
            formatter.print_json(&json);
            return Ok(());
        }

        formatter.success(&format!(
            "{} permission group{} match '{}'",
            groups.len(),
            if groups.len() == 1 { "" } else { "s" },
            self.term
        ));
        for group in groups {
            formatter.field(&group.name, &group.id);
        }
        Ok(())
    }
}
