//! Rendering of prerequisite reports.

use crate::requirements::status::{PrerequisiteReport, PrerequisiteResult, PrerequisiteStatus};
use crate::requirements::tools::find_tool;
use crate::ui::{Table, UserInterface};

/// One-cell status text for a result.
pub fn status_label(result: &PrerequisiteResult) -> String {
    match &result.status {
        PrerequisiteStatus::Satisfied { .. } => "✓ installed".to_string(),
        PrerequisiteStatus::Outdated { minimum, .. } => format!("✗ needs {}+", minimum),
        PrerequisiteStatus::Missing { .. } if result.optional => "⚠ not found".to_string(),
        PrerequisiteStatus::Missing { .. } => "✗ not found".to_string(),
        PrerequisiteStatus::Unknown => "? unknown tool".to_string(),
    }
}

/// Build the report table (Tool | Status | Version | Description).
pub fn report_table(report: &PrerequisiteReport) -> Table {
    let mut table = Table::new(&["Tool", "Status", "Version", "Description"]);
    for result in report.results() {
        let description = find_tool(&result.tool)
            .map(|t| t.description)
            .unwrap_or("");
        let status = status_label(result);
        table.add_row(&[
            result.tool.as_str(),
            status.as_str(),
            result.status.version().unwrap_or("-"),
            description,
        ]);
    }
    table
}

/// Install hint lines for every blocking tool.
pub fn install_hints(report: &PrerequisiteReport) -> Vec<String> {
    report
        .blocking()
        .into_iter()
        .map(|result| match &result.status {
            PrerequisiteStatus::Missing {
                install_hint: Some(hint),
            } => format!("Install {}: {}", result.tool, hint),
            PrerequisiteStatus::Outdated {
                version, minimum, ..
            } => {
                let hint = find_tool(&result.tool)
                    .map(|t| t.install_hint)
                    .unwrap_or("");
                format!(
                    "Upgrade {} from {} to {}+: {}",
                    result.tool, version, minimum, hint
                )
            }
            _ => format!("'{}' is not a tool scaffold knows how to check", result.tool),
        })
        .collect()
}

/// Print the full report followed by install hints.
pub fn show_report(report: &PrerequisiteReport, ui: &mut dyn UserInterface) {
    ui.message(&report_table(report).render());
    for hint in install_hints(report) {
        ui.show_hint(&hint);
    }
}
