//! Shell completions generation.
//!
//! The `scaffold completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::{Result, ScaffoldError};
use crate::ui::UserInterface;
use clap::CommandFactory;
use clap_complete::Shell;

use super::dispatcher::Command;

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let script = render(self.args.shell)?;
        ui.data(script.trim_end());
        Ok(())
    }
}

/// Completion script for `shell`.
fn render(shell: Shell) -> Result<String> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "scaffold", &mut buf);
    String::from_utf8(buf).map_err(|e| ScaffoldError::Other(e.into()))
}
