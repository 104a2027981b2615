//! Interactive prompts.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{Result, ScaffoldError};

use super::{Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors to ScaffoldError.
///
/// Ctrl-C during a prompt surfaces as an interrupted I/O error.
fn map_dialoguer_err(e: dialoguer::Error) -> ScaffoldError {
    let io: std::io::Error = e.into();
    if io.kind() == std::io::ErrorKind::Interrupted {
        ScaffoldError::Cancelled
    } else {
        ScaffoldError::Io(io)
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

/// Interpret a textual default for a confirm prompt.
pub(crate) fn parse_confirm_default(default: Option<&str>) -> bool {
    default
        .map(|s| {
            let s = s.to_lowercase();
            s == "true" || s == "y" || s == "yes"
        })
        .unwrap_or(true)
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(&prompt.question)
        .default(parse_confirm_default(prompt.default.as_deref()))
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = ColorfulTheme::default();
    let input = Input::<String>::with_theme(&theme).with_prompt(&prompt.question);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_text_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_text_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result.trim().to_string()))
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on_opt(term)
        .map_err(map_dialoguer_err)?;

    // Esc/q aborts the selection.
    let index = selection.ok_or(ScaffoldError::Cancelled)?;
    options
        .get(index)
        .map(|o| PromptResult::String(o.value.clone()))
        .ok_or(ScaffoldError::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_default_parsing() {
        assert!(parse_confirm_default(Some("true")));
        assert!(parse_confirm_default(Some("YES")));
        assert!(parse_confirm_default(Some("y")));
        assert!(!parse_confirm_default(Some("false")));
        assert!(!parse_confirm_default(Some("no")));
        assert!(parse_confirm_default(None));
    }

    #[test]
    fn interrupted_prompt_maps_to_cancelled() {
        let err = map_dialoguer_err(dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::Interrupted,
            "ctrl-c",
        )));
        assert!(matches!(err, ScaffoldError::Cancelled));
    }

    #[test]
    fn other_prompt_errors_map_to_io() {
        let err = map_dialoguer_err(dialoguer::Error::IO(std::io::Error::other("no tty")));
        assert!(matches!(err, ScaffoldError::Io(_)));
    }
}
