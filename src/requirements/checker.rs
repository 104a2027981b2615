//! Prerequisite checker.
//!
//! The `PrerequisiteChecker` locates each requested tool on PATH, asks it
//! for its version, and compares the answer against the tool's minimum.
//! It never fails: problems are reported through [`PrerequisiteStatus`].
//! Results are not cached, so every call reflects the machine as it is now.

use std::path::PathBuf;
use std::time::Duration;

use crate::requirements::lookup::resolve_tool_path;
use crate::requirements::status::{PrerequisiteReport, PrerequisiteResult, PrerequisiteStatus};
use crate::requirements::tools::{find_tool, ToolSpec};
use crate::requirements::version::{extract_version, meets_minimum};
use crate::shell::{parse_system_path, CommandSpec, Executor};

/// How long a version query may take before the tool counts as missing.
const VERSION_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks whether external tools are available.
pub struct PrerequisiteChecker<'a> {
    executor: &'a dyn Executor,
    path_entries: Vec<PathBuf>,
}

impl<'a> PrerequisiteChecker<'a> {
    /// Create a checker that searches the given directories.
    pub fn new(executor: &'a dyn Executor, path_entries: Vec<PathBuf>) -> Self {
        Self {
            executor,
            path_entries,
        }
    }

    /// Create a checker that searches the process PATH.
    pub fn from_system_path(executor: &'a dyn Executor) -> Self {
        Self::new(executor, parse_system_path())
    }

    /// Check each tool once, preserving first-seen order.
    pub fn check<S: AsRef<str>>(&self, tools: &[S]) -> PrerequisiteReport {
        let mut seen: Vec<&str> = Vec::new();
        let mut results = Vec::new();
        for tool in tools {
            let tool = tool.as_ref();
            if seen.contains(&tool) {
                continue;
            }
            seen.push(tool);
            results.push(self.check_one(tool));
        }
        PrerequisiteReport::new(results)
    }

    /// Check a single tool.
    pub fn check_one(&self, tool: &str) -> PrerequisiteResult {
        let Some(spec) = find_tool(tool) else {
            tracing::warn!("Unknown tool requested: {}", tool);
            return PrerequisiteResult {
                tool: tool.to_string(),
                status: PrerequisiteStatus::Unknown,
                optional: false,
            };
        };

        PrerequisiteResult {
            tool: tool.to_string(),
            status: self.evaluate(spec),
            optional: spec.optional,
        }
    }

    fn evaluate(&self, spec: &ToolSpec) -> PrerequisiteStatus {
        let missing = PrerequisiteStatus::Missing {
            install_hint: Some(spec.install_hint.to_string()),
        };

        let Some(path) = resolve_tool_path(spec.name, &self.path_entries) else {
            tracing::debug!("{} not found on PATH", spec.name);
            return missing;
        };

        let query = CommandSpec::new(path.to_string_lossy())
            .args(spec.version_args.iter().copied())
            .timeout(VERSION_QUERY_TIMEOUT);

        let output = match self.executor.execute(&query) {
            Ok(result) if result.success => result,
            Ok(result) => {
                tracing::debug!(
                    "{} version query failed: {}",
                    spec.name,
                    result.diagnostic(200)
                );
                return missing;
            }
            Err(e) => {
                tracing::debug!("{} could not be run: {}", spec.name, e);
                return missing;
            }
        };

        let version = extract_version(&format!("{}{}", output.stdout, output.stderr));
        tracing::debug!("{} {} at {}", spec.name, version, path.display());

        match spec.min_version {
            Some(minimum) if !meets_minimum(&version, minimum) => PrerequisiteStatus::Outdated {
                path,
                version,
                minimum: minimum.to_string(),
            },
            _ => PrerequisiteStatus::Satisfied { path, version },
        }
    }
}
