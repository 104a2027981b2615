//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Result, ScaffoldError};

use super::theme::{Mark, ScaffoldTheme};
use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix for environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "SCAFFOLD_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `SCAFFOLD_PROMPT_<KEY>` environment variables,
/// then from the prompt's default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: ScaffoldTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            theme: ScaffoldTheme::plain(),
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: ScaffoldTheme::plain(),
            env_overrides: overrides,
        }
    }

    fn answer(prompt: &Prompt, value: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(matches!(
                value.to_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            )),
            _ => PromptResult::String(value.to_string()),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    fn data(&mut self, text: &str) {
        println!("{}", text);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", self.theme.mark(Mark::Success, msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.mark(Mark::Warning, msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.mark(Mark::Error, msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(Self::answer(prompt, value));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default));
        }

        Err(ScaffoldError::SelectionRequired {
            what: prompt.key.clone(),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            println!("  {}", message);
        }
        Box::new(LineSpinner {
            mode: self.mode,
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_progress() {
            println!("  {}", hint);
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        eprintln!();
        for line in self.theme.error_block(command, output, hint) {
            eprintln!("{}", line);
        }
    }
}

/// Spinner stand-in that prints one line when the operation ends.
struct LineSpinner {
    mode: OutputMode,
    theme: ScaffoldTheme,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("  {}", self.theme.mark(Mark::Success, msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  {}", self.theme.mark(Mark::Error, msg));
    }

    fn finish_clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Normal,
            overrides(&[("SCAFFOLD_PROMPT_STACK", "nextjs")]),
        );
        let prompt = Prompt::select(
            "stack",
            "Select a stack:",
            vec![PromptOption::new("Next.js", "nextjs")],
        );

        let result = ui.prompt(&prompt).unwrap();
        assert_eq!(result.as_string(), "nextjs");
    }

    #[test]
    fn confirm_override_parses_bool() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Normal,
            overrides(&[("SCAFFOLD_PROMPT_MONOREPO", "yes")]),
        );
        let prompt = Prompt::confirm("monorepo", "Create as monorepo?", false);
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(true));
    }

    #[test]
    fn prompt_falls_back_to_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::confirm("monorepo", "Create as monorepo?", false);
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(false));
    }

    #[test]
    fn prompt_without_answer_requires_selection() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::input("name", "Project name:");

        let err = ui.prompt(&prompt).unwrap_err();
        assert!(matches!(err, ScaffoldError::SelectionRequired { ref what } if what == "name"));
    }

    #[test]
    fn output_mode_is_kept() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn quiet_spinner_accepts_all_calls() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        let mut spinner = ui.start_spinner("Installing");
        spinner.finish_success("Installed");
        spinner.finish_clear();
    }
}
