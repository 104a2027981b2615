//! Info command implementation.
//!
//! The `scaffold info` command describes what the tool can do.

use crate::error::Result;
use crate::stacks::{by_category, Category};
use crate::ui::theme::ScaffoldTheme;
use crate::ui::{Table, UserInterface};

use super::dispatcher::Command;

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

const FEATURES: &[&str] = &[
    "Interactive project setup with arrow-key navigation",
    "Official generators for popular stacks, built-in templates for the rest",
    "Full-stack monorepo support (web/ + api/)",
    "Prerequisite checks with install hints",
    "Git repository initialization with an initial commit",
    "Existing-project setup: dependencies, .env files and Docker",
    "Zero configuration required",
];

/// The info command implementation.
pub struct InfoCommand;

impl Command for InfoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let theme = ScaffoldTheme::colored();

        ui.show_header(&format!("Scaffold CLI v{}", env!("CARGO_PKG_VERSION")));
        ui.message(&theme.muted.apply_to(env!("CARGO_PKG_DESCRIPTION")).to_string());

        ui.message("");
        ui.message(&theme.label.apply_to("Features:").to_string());
        for feature in FEATURES {
            ui.message(&format!("  • {}", feature));
        }

        ui.message("");
        ui.message(&theme.label.apply_to("Supported Technologies:").to_string());
        let mut table = Table::new(&["Category", "Technologies"]);
        for category in Category::ALL {
            let names: Vec<&str> = by_category(category).map(|s| s.display_name).collect();
            table.add_row(&[category.label(), names.join(", ").as_str()]);
        }
        table.add_row(&["Monorepo", "Any frontend + backend combination"]);
        ui.message(&table.render());

        ui.message("");
        ui.message(&theme.label.apply_to("Quick Start:").to_string());
        for (command, what) in [
            ("scaffold new <name>", "Create a new project"),
            ("scaffold new <name> --monorepo", "Create a monorepo"),
            ("scaffold new <name> --stack <id>", "Create without prompts"),
            ("scaffold init [path]", "Set up an existing project"),
            ("scaffold list", "List all stacks"),
        ] {
            ui.message(&format!(
                "  {} {}",
                theme.command.apply_to(format!("{:<36}", command)),
                what
            ));
        }

        ui.message("");
        ui.message(&theme.label.apply_to("More Commands:").to_string());
        for (command, what) in [
            ("scaffold --help", "Show detailed help"),
            ("scaffold version", "Show version and available tools"),
        ] {
            ui.message(&format!(
                "  {} {}",
                theme.command.apply_to(format!("{:<36}", command)),
                what
            ));
        }

        ui.message("");
        ui.message(&format!("GitHub: {}", REPOSITORY));
        ui.message(&format!("Issues: {}/issues", REPOSITORY));
        Ok(())
    }
}
