//! List command implementation.
//!
//! The `scaffold list` command lists the stacks `scaffold new` can create.

use crate::cli::args::ListArgs;
use crate::error::{Result, ScaffoldError};
use crate::stacks::{Category, StackDescriptor, STACKS};
use crate::ui::theme::ScaffoldTheme;
use crate::ui::{Table, UserInterface};

use super::dispatcher::Command;

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    fn selected(&self) -> Vec<&'static StackDescriptor> {
        STACKS
            .iter()
            .filter(|s| self.args.category.is_none_or(|c| s.category == c))
            .collect()
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let stacks = self.selected();

        if self.args.json {
            let output = serde_json::to_string_pretty(&stacks)
                .map_err(|e| ScaffoldError::Other(e.into()))?;
            ui.data(&output);
            return Ok(());
        }

        let theme = ScaffoldTheme::colored();
        for category in Category::ALL {
            let in_category: Vec<_> = stacks.iter().filter(|s| s.category == category).collect();
            if in_category.is_empty() {
                continue;
            }

            ui.message(&format!("  {}", theme.label.apply_to(category.label())));
            let mut table = Table::new(&["ID", "Name", "Language", "Requires"]);
            for stack in in_category {
                let requires = stack.requires.join(", ");
                table.add_row(&[
                    stack.id,
                    stack.display_name,
                    stack.language,
                    requires.as_str(),
                ]);
            }
            ui.message(&table.render());
            ui.message("");
        }

        ui.message(&format!(
            "{} stacks. Create one with: {}",
            stacks.len(),
            theme.command.apply_to("scaffold new <name> --stack <id>")
        ));
        Ok(())
    }
}
