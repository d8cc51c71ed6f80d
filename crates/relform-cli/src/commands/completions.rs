//! Shell completions generation command
//!
//! Usage: `relform completions bash > ~/.local/share/bash-completion/completions/relform`

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Debug, clap::Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub async fn execute(&self, _format: OutputFormat) -> Result<()> {
        let mut cmd = crate::Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "relform", &mut io::stdout());
        Ok(())
    }
}
