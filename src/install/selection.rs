//! Choosing what to build.
//!
//! Flags win; anything not given on the command line is asked through the
//! [`UserInterface`]. Non-interactive runs answer prompts from
//! `SCAFFOLD_PROMPT_<KEY>` variables or fail with `SelectionRequired`.

use crate::error::{Result, ScaffoldError};
use crate::install::orchestrator::ProjectLayout;
use crate::stacks::{by_category, find_stack, Category, StackDescriptor};
use crate::ui::{Prompt, PromptOption, UserInterface};

/// Stack choices given on the command line.
#[derive(Debug, Clone, Default)]
pub struct StackFlags {
    /// `--monorepo`
    pub monorepo: bool,
    /// `--stack`
    pub stack: Option<String>,
    /// `--frontend`
    pub frontend: Option<String>,
    /// `--backend`
    pub backend: Option<String>,
}

/// Look up a stack id from the catalog.
pub fn resolve_stack(id: &str) -> Result<&'static StackDescriptor> {
    find_stack(id).ok_or_else(|| ScaffoldError::UnknownStack { id: id.to_string() })
}

/// Return `name`, or ask for one.
pub fn project_name(name: Option<String>, ui: &mut dyn UserInterface) -> Result<String> {
    if let Some(name) = name {
        return Ok(name);
    }
    let answer = ui.prompt(&Prompt::input("name", "📦 Project name:"))?;
    Ok(answer.as_string().trim().to_string())
}

/// Work out the project layout from flags, prompting for the rest.
pub fn choose_layout(flags: &StackFlags, ui: &mut dyn UserInterface) -> Result<ProjectLayout> {
    let monorepo = if flags.monorepo || flags.frontend.is_some() || flags.backend.is_some() {
        true
    } else if flags.stack.is_some() {
        false
    } else {
        ui.prompt(&Prompt::confirm("monorepo", "🗂️  Create as monorepo?", false))?
            .as_bool()
            .unwrap_or(false)
    };

    if !monorepo {
        let stack = match &flags.stack {
            Some(id) => resolve_stack(id)?,
            None => select_stack(ui)?,
        };
        return Ok(ProjectLayout::Single(stack));
    }

    let frontend = match &flags.frontend {
        Some(id) => resolve_stack(id)?,
        None => select_from(ui, "frontend", "Select frontend:", &[Category::Frontend])?,
    };
    let backend = match &flags.backend {
        Some(id) => resolve_stack(id)?,
        None => select_from(ui, "backend", "Select backend:", &[Category::Api])?,
    };
    Ok(ProjectLayout::Monorepo { frontend, backend })
}

/// Ask for a category, then a stack within it.
pub fn select_stack(ui: &mut dyn UserInterface) -> Result<&'static StackDescriptor> {
    let options = Category::ALL
        .iter()
        .map(|c| PromptOption::new(c.label(), c.as_str()))
        .collect();
    let answer = ui.prompt(&Prompt::select("category", "📂 Select project type:", options))?;
    let category: Category = answer
        .as_string()
        .parse()
        .map_err(|e: String| ScaffoldError::Other(anyhow::anyhow!(e)))?;

    select_from(
        ui,
        "stack",
        &format!("Select {}:", category.label().to_lowercase()),
        &[category],
    )
}

fn select_from(
    ui: &mut dyn UserInterface,
    key: &str,
    question: &str,
    categories: &[Category],
) -> Result<&'static StackDescriptor> {
    let options = categories
        .iter()
        .flat_map(|c| by_category(*c))
        .map(|s| PromptOption::new(s.display_name, s.id))
        .collect();
    let answer = ui.prompt(&Prompt::select(key, question, options))?;
    resolve_stack(&answer.as_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, NonInteractiveUI, OutputMode};
    use std::collections::HashMap;

    fn flags() -> StackFlags {
        StackFlags::default()
    }

    #[test]
    fn stack_flag_skips_prompts() {
        let mut ui = MockUI::new();
        let layout = choose_layout(
            &StackFlags {
                stack: Some("fastapi".into()),
                ..flags()
            },
            &mut ui,
        )
        .unwrap();

        assert!(matches!(layout, ProjectLayout::Single(s) if s.id == "fastapi"));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn unknown_stack_flag_is_an_error() {
        let mut ui = MockUI::new();
        let err = choose_layout(
            &StackFlags {
                stack: Some("cobol-on-cogs".into()),
                ..flags()
            },
            &mut ui,
        )
        .unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownStack { id } if id == "cobol-on-cogs"));
    }

    #[test]
    fn frontend_flag_implies_monorepo() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("backend", "flask");
        let layout = choose_layout(
            &StackFlags {
                frontend: Some("vue-vite".into()),
                ..flags()
            },
            &mut ui,
        )
        .unwrap();

        match layout {
            ProjectLayout::Monorepo { frontend, backend } => {
                assert_eq!(frontend.id, "vue-vite");
                assert_eq!(backend.id, "flask");
            }
            other => panic!("expected monorepo, got {other:?}"),
        }
        assert_eq!(ui.prompts_shown(), ["backend"]);
    }

    #[test]
    fn prompts_for_category_then_stack() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("monorepo", "false");
        ui.set_prompt_response("category", "cli");
        ui.set_prompt_response("stack", "go-cli-cobra");

        let layout = choose_layout(&flags(), &mut ui).unwrap();

        assert!(matches!(layout, ProjectLayout::Single(s) if s.id == "go-cli-cobra"));
        assert_eq!(ui.prompts_shown(), ["monorepo", "category", "stack"]);
    }

    #[test]
    fn non_interactive_without_stack_fails() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        let err = choose_layout(&flags(), &mut ui).unwrap_err();
        assert!(matches!(err, ScaffoldError::SelectionRequired { what } if what == "category"));
    }

    #[test]
    fn non_interactive_answers_from_overrides() {
        let overrides = HashMap::from([
            ("SCAFFOLD_PROMPT_CATEGORY".to_string(), "api".to_string()),
            ("SCAFFOLD_PROMPT_STACK".to_string(), "go-gin".to_string()),
        ]);
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, overrides);

        let layout = choose_layout(&flags(), &mut ui).unwrap();
        assert!(matches!(layout, ProjectLayout::Single(s) if s.id == "go-gin"));
    }

    #[test]
    fn explicit_name_is_kept() {
        let mut ui = MockUI::new();
        assert_eq!(project_name(Some("shop".into()), &mut ui).unwrap(), "shop");
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn name_is_prompted_and_trimmed() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("name", "  shop  ");
        assert_eq!(project_name(None, &mut ui).unwrap(), "shop");
    }
}
