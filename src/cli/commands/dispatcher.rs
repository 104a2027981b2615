//! Routing from parsed arguments to command implementations.

use std::path::PathBuf;

use clap::CommandFactory;

use crate::cli::args::{Cli, Commands};
use crate::error::{Result, ScaffoldError};
use crate::ui::UserInterface;

/// One CLI subcommand.
///
/// Failures are returned as [`ScaffoldError`]s; `main` turns them into a
/// message and an exit code.
pub trait Command {
    /// Run the command, writing everything through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()>;
}

/// Builds the command for a parsed [`Cli`] and runs it.
pub struct CommandDispatcher {
    /// Where `new` creates projects and `init` looks for one by default.
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a dispatcher rooted at the process working directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Build the command named on the command line.
    ///
    /// `None` means no subcommand was given.
    pub fn command_for(&self, cli: &Cli) -> Option<Box<dyn Command>> {
        use super::{
            completions::CompletionsCommand, info::InfoCommand, init::InitCommand,
            list::ListCommand, new::NewCommand, version::VersionCommand,
        };

        let command: Box<dyn Command> = match cli.command.as_ref()? {
            Commands::New(args) => Box::new(NewCommand::new(&self.working_dir, args.clone())),
            Commands::Init(args) => Box::new(InitCommand::new(&self.working_dir, args.clone())),
            Commands::List(args) => Box::new(ListCommand::new(args.clone())),
            Commands::Info => Box::new(InfoCommand),
            Commands::Version => Box::new(VersionCommand),
            Commands::Completions(args) => Box::new(CompletionsCommand::new(args.clone())),
        };
        Some(command)
    }

    /// Run the requested command, or print help when there is none.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<()> {
        match self.command_for(cli) {
            Some(command) => command.execute(ui),
            None => Cli::command().print_help().map_err(ScaffoldError::Io),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::new(PathBuf::from("/projects"))
    }

    #[test]
    fn every_subcommand_has_an_implementation() {
        for argv in [
            vec!["scaffold", "new", "app"],
            vec!["scaffold", "init"],
            vec!["scaffold", "list"],
            vec!["scaffold", "info"],
            vec!["scaffold", "version"],
            vec!["scaffold", "completions", "bash"],
        ] {
            let cli = Cli::parse_from(&argv);
            assert!(dispatcher().command_for(&cli).is_some(), "{:?}", argv);
        }
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = Cli::parse_from(["scaffold"]);
        assert!(dispatcher().command_for(&cli).is_none());
    }

    #[test]
    fn dispatch_runs_the_selected_command() {
        let cli = Cli::parse_from(["scaffold", "list", "--json"]);
        let mut ui = MockUI::new();
        dispatcher().dispatch(&cli, &mut ui).unwrap();
        assert_eq!(ui.data().len(), 1);
    }
}
