//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use scaffold::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("stack", "react-vite");
//!
//! ui.message("Starting");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Starting"));
//! assert!(ui.has_success("Done!"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
    /// Cleared without a final line.
    Cleared,
}

type SpinnerLog = Rc<RefCell<Vec<(String, SpinnerStatus)>>>;

/// Mock UI implementation for testing.
///
/// Captures all UI interactions. Spinner outcomes are recorded on the UI
/// itself so they can be inspected after the spinner is dropped.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    data: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    spinners: Vec<String>,
    spinner_log: SpinnerLog,
    error_blocks: Vec<(String, String, Option<String>)>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Everything printed through [`UserInterface::data`].
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured hints.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Get all spinner start messages.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Final message and status of every finished spinner, in order.
    pub fn spinner_results(&self) -> Vec<(String, SpinnerStatus)> {
        self.spinner_log.borrow().clone()
    }

    /// Get all captured error blocks (command, output, hint).
    pub fn error_blocks(&self) -> &[(String, String, Option<String>)] {
        &self.error_blocks
    }

    /// Keys of prompts that were shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if any message contains the given text.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if any success message contains the given text.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if any warning contains the given text.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if any error contains the given text.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if any hint contains the given text.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn data(&mut self, text: &str) {
        self.data.push(text.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let response = self
            .prompt_responses
            .get(&prompt.key)
            .or(prompt.default.as_ref())
            .cloned();

        Ok(match (&prompt.prompt_type, response) {
            (PromptType::Confirm, Some(r)) => {
                PromptResult::Bool(matches!(r.as_str(), "true" | "yes" | "y" | "1"))
            }
            (PromptType::Confirm, None) => PromptResult::Bool(false),
            (_, Some(r)) => PromptResult::String(r),
            // Pressing enter on a select picks the first entry.
            (PromptType::Select { options }, None) => PromptResult::String(
                options.first().map(|o| o.value.clone()).unwrap_or_default(),
            ),
            (PromptType::Input, None) => PromptResult::String(String::new()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            log: Rc::clone(&self.spinner_log),
            message: message.to_string(),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        self.error_blocks.push((
            command.to_string(),
            output.to_string(),
            hint.map(String::from),
        ));
    }
}

/// Mock spinner that reports its outcome back to the owning [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    log: SpinnerLog,
    message: String,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((msg.to_string(), SpinnerStatus::Success));
    }

    fn finish_error(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((msg.to_string(), SpinnerStatus::Error));
    }

    fn finish_clear(&mut self) {
        self.log
            .borrow_mut()
            .push((self.message.clone(), SpinnerStatus::Cleared));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Oops");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
    }

    #[test]
    fn mock_ui_prompt_with_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("name", "my-app");

        let result = ui.prompt(&Prompt::input("name", "Project name:")).unwrap();
        assert_eq!(result.as_string(), "my-app");
        assert_eq!(ui.prompts_shown(), &["name"]);
    }

    #[test]
    fn mock_ui_confirm_uses_response_then_default() {
        let mut ui = MockUI::new();
        let prompt = Prompt::confirm("monorepo", "Monorepo?", true);
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(true));

        ui.set_prompt_response("monorepo", "no");
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(false));
    }

    #[test]
    fn mock_ui_select_defaults_to_first_option() {
        let mut ui = MockUI::new();
        let prompt = Prompt::select(
            "stack",
            "Select:",
            vec![
                PromptOption::new("React", "react-vite"),
                PromptOption::new("Vue", "vue-vite"),
            ],
        );
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "react-vite");
    }

    #[test]
    fn mock_ui_records_spinner_outcomes() {
        let mut ui = MockUI::new();
        let mut first = ui.start_spinner("Installing frontend");
        first.finish_success("Frontend created");
        let mut second = ui.start_spinner("Installing backend");
        second.finish_error("Backend failed");
        drop(first);
        drop(second);

        assert_eq!(ui.spinners().len(), 2);
        assert_eq!(
            ui.spinner_results(),
            vec![
                ("Frontend created".to_string(), SpinnerStatus::Success),
                ("Backend failed".to_string(), SpinnerStatus::Error),
            ]
        );
    }

    #[test]
    fn mock_ui_captures_error_blocks() {
        let mut ui = MockUI::new();
        ui.show_error_block("npm create vite@latest app", "npm ERR!", Some("check npm"));
        assert_eq!(ui.error_blocks().len(), 1);
        assert_eq!(ui.error_blocks()[0].2.as_deref(), Some("check npm"));
    }

    #[test]
    fn mock_ui_keeps_data_apart_from_messages() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        UserInterface::data(&mut ui, "[]");
        ui.message("Available stacks");
        assert_eq!(ui.data(), &["[]"]);
        assert_eq!(ui.messages(), &["Available stacks"]);
    }
}
