//! Error types for scaffold operations.
//!
//! This module defines [`ScaffoldError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal conditions (missing prerequisites, destination conflicts, failed
//!   generators) are `ScaffoldError` variants and end the command with a
//!   non-zero exit code
//! - Version-control problems are never errors; they are collected as
//!   [`GitWarning`](crate::install::GitWarning)s
//! - Use `anyhow::Error` (via `ScaffoldError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for scaffold operations.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// One or more required tools are absent or too old.
    #[error("Missing required tools: {}", tools.join(", "))]
    MissingPrerequisite { tools: Vec<String> },

    /// Target directory already exists and is not empty.
    #[error("Directory '{}' already exists and is not empty", path.display())]
    DestinationConflict { path: PathBuf },

    /// A generator command exited non-zero or could not be launched.
    #[error("Failed to create {stack} project: {message}")]
    ExternalCommandFailure { stack: String, message: String },

    /// Stack identifier not present in the catalog.
    #[error("Unknown stack: {id} (run 'scaffold list' to see available stacks)")]
    UnknownStack { id: String },

    /// Project name cannot be used as a directory name.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// `scaffold init` found nothing it recognizes.
    #[error("Could not detect a project type in {}", path.display())]
    UnrecognizedProject { path: PathBuf },

    /// A selection was needed but the run is non-interactive.
    #[error("No {what} selected; pass it as a flag when running non-interactively")]
    SelectionRequired { what: String },

    /// The user backed out of a prompt.
    #[error("Cancelled")]
    Cancelled,

    /// A child process could not be started at all.
    #[error("Could not run '{command}': {source}")]
    LaunchFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A child process was terminated by a signal.
    #[error("Interrupted while running {command}")]
    Interrupted { command: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScaffoldError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupted { .. } | Self::Cancelled => 130,
            _ => 1,
        }
    }
}

/// Result type alias for scaffold operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
