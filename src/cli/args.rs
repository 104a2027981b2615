//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::stacks::Category;

/// Scaffold - Generate new projects from popular stacks.
#[derive(Debug, Parser)]
#[command(name = "scaffold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the chosen subcommand was told never to prompt.
    pub fn non_interactive(&self) -> bool {
        match &self.command {
            Some(Commands::New(args)) => args.non_interactive,
            Some(Commands::Init(args)) => args.non_interactive,
            _ => false,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project
    New(NewArgs),

    /// Set up an existing project: dependencies, git, .env and Docker
    Init(InitArgs),

    /// List available stacks
    List(ListArgs),

    /// Show information about Scaffold
    Info,

    /// Show version, platform and tool availability
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NewArgs {
    /// Project name (also the directory name)
    pub name: Option<String>,

    /// Create a monorepo with web/ and api/ sub-projects
    #[arg(long)]
    pub monorepo: bool,

    /// Stack to generate (see `scaffold list`)
    #[arg(short, long, value_name = "ID", conflicts_with_all = ["monorepo", "frontend", "backend"])]
    pub stack: Option<String>,

    /// Frontend stack for a monorepo
    #[arg(long, value_name = "ID")]
    pub frontend: Option<String>,

    /// Backend stack for a monorepo
    #[arg(long, value_name = "ID")]
    pub backend: Option<String>,

    /// Directory to create the project in
    #[arg(short, long, value_name = "DIR", env = "SCAFFOLD_PATH")]
    pub path: Option<PathBuf>,

    /// Skip git initialization
    #[arg(long, env = "SCAFFOLD_NO_GIT")]
    pub no_git: bool,

    /// Never prompt; fail when a choice is missing
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Skip git initialization
    #[arg(long, env = "SCAFFOLD_NO_GIT")]
    pub no_git: bool,

    /// Never prompt; take the default answer for every question
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only show stacks in this category
    #[arg(short, long, value_enum)]
    pub category: Option<Category>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_new_with_stack() {
        let cli = Cli::parse_from(["scaffold", "new", "demo-app", "--stack", "react-vite"]);
        match cli.command {
            Some(Commands::New(args)) => {
                assert_eq!(args.name.as_deref(), Some("demo-app"));
                assert_eq!(args.stack.as_deref(), Some("react-vite"));
                assert!(!args.monorepo);
            }
            other => panic!("expected new, got {other:?}"),
        }
    }

    #[test]
    fn parses_monorepo_flags() {
        let cli = Cli::parse_from([
            "scaffold",
            "new",
            "shop",
            "--monorepo",
            "--frontend",
            "nextjs",
            "--backend",
            "fastapi",
            "--no-git",
        ]);
        match cli.command {
            Some(Commands::New(args)) => {
                assert!(args.monorepo);
                assert!(args.no_git);
                assert_eq!(args.frontend.as_deref(), Some("nextjs"));
                assert_eq!(args.backend.as_deref(), Some("fastapi"));
            }
            other => panic!("expected new, got {other:?}"),
        }
    }

    #[test]
    fn stack_conflicts_with_monorepo() {
        let result =
            Cli::try_parse_from(["scaffold", "new", "x", "--stack", "flask", "--monorepo"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_category_is_parsed() {
        let cli = Cli::parse_from(["scaffold", "list", "--category", "cli", "--json"]);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.category, Some(Category::Cli));
                assert!(args.json);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn parses_init_with_path() {
        let cli = Cli::parse_from(["scaffold", "init", "../shop", "--non-interactive"]);
        match &cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.path, Some(PathBuf::from("../shop")));
                assert!(!args.no_git);
            }
            other => panic!("expected init, got {other:?}"),
        }
        assert!(cli.non_interactive());
    }

    #[test]
    fn non_interactive_only_applies_to_prompting_commands() {
        assert!(!Cli::parse_from(["scaffold", "list"]).non_interactive());
        assert!(!Cli::parse_from(["scaffold", "new", "app"]).non_interactive());
        assert!(Cli::parse_from(["scaffold", "new", "app", "--non-interactive"]).non_interactive());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["scaffold", "version", "--no-color", "--debug"]);
        assert!(cli.no_color);
        assert!(cli.debug);
    }
}
