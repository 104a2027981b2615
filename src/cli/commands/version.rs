//! Version command implementation.
//!
//! The `scaffold version` command prints the version, the platform, and
//! which of the common tools are installed.

use crate::error::Result;
use crate::requirements::{PrerequisiteChecker, PrerequisiteReport, PrerequisiteStatus};
use crate::shell::{platform_description, SystemExecutor};
use crate::ui::UserInterface;

use super::dispatcher::Command;

/// Tools reported by `scaffold version`.
pub const REPORTED_TOOLS: &[&str] = &["node", "npm", "python3", "git"];

/// The version command implementation.
pub struct VersionCommand;

impl Command for VersionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let executor = SystemExecutor;
        let report = PrerequisiteChecker::from_system_path(&executor).check(REPORTED_TOOLS);
        show_version(&report, ui);
        Ok(())
    }
}

/// Print version, platform and one line per checked tool.
pub fn show_version(report: &PrerequisiteReport, ui: &mut dyn UserInterface) {
    ui.show_header(&format!("Scaffold CLI v{}", env!("CARGO_PKG_VERSION")));
    ui.message(&format!("Platform: {}", platform_description()));
    ui.message("");
    ui.message("Available Tools:");

    for result in report.results() {
        let line = match &result.status {
            PrerequisiteStatus::Satisfied { version, .. } => {
                format!("✓ {:<10} {}", result.tool, version)
            }
            PrerequisiteStatus::Outdated {
                version, minimum, ..
            } => format!("⚠ {:<10} {} (needs {}+)", result.tool, version, minimum),
            PrerequisiteStatus::Missing { .. } | PrerequisiteStatus::Unknown => {
                format!("✗ {:<10} not found", result.tool)
            }
        };
        ui.message(&format!("  {}", line));
    }
}
