//! Prerequisite check results.
//!
//! Each tool check produces a [`PrerequisiteResult`]; a full check over a
//! list of tools produces a [`PrerequisiteReport`].

use std::path::PathBuf;

/// The outcome of checking a single tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteStatus {
    /// Tool is present and new enough.
    Satisfied {
        /// Resolved binary path.
        path: PathBuf,
        /// Version reported by the tool.
        version: String,
    },

    /// Tool is present but older than the minimum we accept.
    Outdated {
        /// Resolved binary path.
        path: PathBuf,
        /// Version reported by the tool.
        version: String,
        /// Oldest acceptable version.
        minimum: String,
    },

    /// Tool is not on PATH, not executable, or its version query failed.
    Missing {
        /// Where to get it.
        install_hint: Option<String>,
    },

    /// Tool name isn't in the known-tools table.
    Unknown,
}

impl PrerequisiteStatus {
    /// Whether the tool was found at all.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Satisfied { .. } | Self::Outdated { .. })
    }

    /// Whether the tool is usable.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied { .. })
    }

    /// Detected version, if the tool was found.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Satisfied { version, .. } | Self::Outdated { version, .. } => Some(version),
            _ => None,
        }
    }
}

/// The result of checking one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteResult {
    /// Tool name.
    pub tool: String,
    /// What was found.
    pub status: PrerequisiteStatus,
    /// Whether a failure here only warrants a warning.
    pub optional: bool,
}

impl PrerequisiteResult {
    /// Whether this result should stop the run.
    pub fn is_blocking(&self) -> bool {
        !self.optional && !self.status.is_satisfied()
    }
}

/// Results for every tool that was checked, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrerequisiteReport {
    results: Vec<PrerequisiteResult>,
}

impl PrerequisiteReport {
    /// Build a report from individual results.
    pub fn new(results: Vec<PrerequisiteResult>) -> Self {
        Self { results }
    }

    /// All results.
    pub fn results(&self) -> &[PrerequisiteResult] {
        &self.results
    }

    /// Result for a given tool.
    pub fn get(&self, tool: &str) -> Option<&PrerequisiteResult> {
        self.results.iter().find(|r| r.tool == tool)
    }

    /// Whether every required (non-optional) tool is satisfied.
    pub fn all_required_satisfied(&self) -> bool {
        !self.results.iter().any(PrerequisiteResult::is_blocking)
    }

    /// Required tools that are missing or outdated.
    pub fn blocking(&self) -> Vec<&PrerequisiteResult> {
        self.results.iter().filter(|r| r.is_blocking()).collect()
    }

    /// Optional tools that are not satisfied.
    pub fn optional_missing(&self) -> Vec<&PrerequisiteResult> {
        self.results
            .iter()
            .filter(|r| r.optional && !r.status.is_satisfied())
            .collect()
    }

    /// Whether a tool was found and is usable.
    pub fn is_available(&self, tool: &str) -> bool {
        self.get(tool).is_some_and(|r| r.status.is_satisfied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfied(tool: &str) -> PrerequisiteResult {
        PrerequisiteResult {
            tool: tool.to_string(),
            status: PrerequisiteStatus::Satisfied {
                path: PathBuf::from(format!("/usr/bin/{}", tool)),
                version: "1.0.0".to_string(),
            },
            optional: false,
        }
    }

    fn missing(tool: &str, optional: bool) -> PrerequisiteResult {
        PrerequisiteResult {
            tool: tool.to_string(),
            status: PrerequisiteStatus::Missing { install_hint: None },
            optional,
        }
    }

    #[test]
    fn satisfied_is_found_and_usable() {
        let status = satisfied("node").status;
        assert!(status.is_found());
        assert!(status.is_satisfied());
        assert_eq!(status.version(), Some("1.0.0"));
    }

    #[test]
    fn outdated_is_found_but_not_usable() {
        let status = PrerequisiteStatus::Outdated {
            path: PathBuf::from("/usr/bin/node"),
            version: "16.20.2".to_string(),
            minimum: "18.0.0".to_string(),
        };
        assert!(status.is_found());
        assert!(!status.is_satisfied());
        assert_eq!(status.version(), Some("16.20.2"));
    }

    #[test]
    fn missing_and_unknown_are_not_found() {
        assert!(!PrerequisiteStatus::Missing { install_hint: None }.is_found());
        assert!(!PrerequisiteStatus::Unknown.is_found());
        assert_eq!(PrerequisiteStatus::Unknown.version(), None);
    }

    #[test]
    fn optional_missing_tool_does_not_block() {
        let report = PrerequisiteReport::new(vec![satisfied("node"), missing("git", true)]);
        assert!(report.all_required_satisfied());
        assert!(report.blocking().is_empty());
        assert_eq!(report.optional_missing().len(), 1);
        assert!(!report.is_available("git"));
    }

    #[test]
    fn required_missing_tool_blocks() {
        let report = PrerequisiteReport::new(vec![satisfied("node"), missing("npm", false)]);
        assert!(!report.all_required_satisfied());
        let blocking: Vec<_> = report.blocking().iter().map(|r| r.tool.as_str()).collect();
        assert_eq!(blocking, vec!["npm"]);
    }

    #[test]
    fn get_finds_by_tool_name() {
        let report = PrerequisiteReport::new(vec![satisfied("node")]);
        assert!(report.get("node").is_some());
        assert!(report.get("npm").is_none());
        assert!(report.is_available("node"));
    }
}
