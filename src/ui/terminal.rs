//! Interactive terminal UI.
//!
//! Status lines go to stdout, warnings and errors to stderr. Prompts are
//! rendered by `dialoguer` on the stderr terminal so piping stdout keeps
//! working.

use console::Term;

use crate::error::Result;

use super::theme::Mark;
use super::{
    prompt_user, NonInteractiveUI, OutputMode, ProgressSpinner, Prompt, PromptResult,
    ScaffoldTheme, SpinnerHandle, UserInterface,
};

/// UI for a person at a terminal.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ScaffoldTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI with the detected color theme.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: ScaffoldTheme::detect(),
            mode,
        }
    }

    fn status(&self, line: &str) {
        if self.mode.shows_progress() {
            self.out.write_line(line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.status(msg);
    }

    fn data(&mut self, text: &str) {
        self.out.write_line(text).ok();
    }

    fn success(&mut self, msg: &str) {
        self.status(&self.theme.mark(Mark::Success, msg));
    }

    fn warning(&mut self, msg: &str) {
        self.err.write_line(&self.theme.mark(Mark::Warning, msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        self.err.write_line(&self.theme.mark(Mark::Error, msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.err)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        self.status(&format!("\n{}\n", self.theme.header(title)));
    }

    fn show_hint(&mut self, hint: &str) {
        self.status(&format!("  {}", self.theme.accent.apply_to(hint)));
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        for line in self.theme.error_block(command, output, hint) {
            self.err.write_line(&line).ok();
        }
    }
}

/// Pick the UI for this run.
///
/// `interactive` must already account for CI, `--non-interactive` and
/// whether a terminal is attached.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_keeps_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_passes_mode_through() {
        let ui = create_ui(false, OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
