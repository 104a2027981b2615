//! Prerequisite detection.
//!
//! Before any generator runs, every tool the chosen stacks need is located
//! on PATH and asked for its version. Missing or outdated tools block the
//! installation; `git` is the one optional tool and only produces a warning.
//!
//! # Modules
//!
//! - [`tools`] - Table of known tools, version queries and minimums
//! - [`version`] - Version extraction and comparison
//! - [`lookup`] - PATH lookup
//! - [`checker`] - [`PrerequisiteChecker`], the entry point
//! - [`status`] - Per-tool and aggregate results
//! - [`report`] - Table and hint rendering

pub mod checker;
pub mod lookup;
pub mod report;
pub mod status;
pub mod tools;
pub mod version;

pub use checker::PrerequisiteChecker;
pub use report::show_report;
pub use status::{PrerequisiteReport, PrerequisiteResult, PrerequisiteStatus};
pub use tools::{find_tool, ToolSpec, KNOWN_TOOLS};
