//! Installation outcomes.

use std::path::{Path, PathBuf};

/// The result of installing one stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationOutcome {
    /// Stack identifier.
    pub stack: String,
    /// Whether the project directory was produced.
    pub success: bool,
    /// Directory the project was generated into.
    pub path: PathBuf,
    /// Diagnostic text when the install failed.
    pub error: Option<String>,
}

impl InstallationOutcome {
    /// A successful install.
    pub fn succeeded(stack: &str, path: &Path) -> Self {
        Self {
            stack: stack.to_string(),
            success: true,
            path: path.to_path_buf(),
            error: None,
        }
    }

    /// A failed install with its diagnostic.
    pub fn failed(stack: &str, path: &Path, error: impl Into<String>) -> Self {
        Self {
            stack: stack.to_string(),
            success: false,
            path: path.to_path_buf(),
            error: Some(error.into()),
        }
    }
}
