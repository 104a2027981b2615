//! Version extraction and comparison.
//!
//! Tools print their versions in many shapes (`v20.11.0`, `Python 3.12.1`,
//! `go version go1.22.0 linux/amd64`, `git version 2.43.0`). We pull the
//! first dotted number out of the output and compare numerically.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Version string reported when nothing version-like is found.
pub const UNKNOWN_VERSION: &str = "unknown";

static VERSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"v?(\d+\.\d+\.\d+)",
        r"(?i)version\s+(\d+\.\d+\.\d+)",
        r"(\d+\.\d+)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Extract a version number from tool output.
///
/// Returns [`UNKNOWN_VERSION`] when no pattern matches.
pub fn extract_version(output: &str) -> String {
    for pattern in VERSION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(output) {
            if let Some(m) = caps.get(1) {
                return m.as_str().to_string();
            }
        }
    }
    UNKNOWN_VERSION.to_string()
}

/// A dotted numeric version. Missing components compare as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    /// Parse `1.2.3`, `v1.2`, `3.10.0rc1` (trailing non-digits are ignored).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().trim_start_matches('v');
        let mut parts = Vec::new();
        for piece in text.split('.') {
            let digits: String = piece.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                break;
            }
            parts.push(digits.parse().ok()?);
        }
        if parts.is_empty() {
            None
        } else {
            Some(Self { parts })
        }
    }

    fn component(&self, i: usize) -> u64 {
        self.parts.get(i).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        write!(f, "{}", joined.join("."))
    }
}

/// Whether `detected` satisfies `minimum`.
///
/// An unparseable detected version is given the benefit of the doubt.
pub fn meets_minimum(detected: &str, minimum: &str) -> bool {
    match (Version::parse(detected), Version::parse(minimum)) {
        (Some(have), Some(need)) => have >= need,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_node_style_version() {
        assert_eq!(extract_version("v20.11.0\n"), "20.11.0");
    }

    #[test]
    fn extracts_python_version() {
        assert_eq!(extract_version("Python 3.12.1"), "3.12.1");
    }

    #[test]
    fn extracts_go_version() {
        assert_eq!(
            extract_version("go version go1.22.0 linux/amd64"),
            "1.22.0"
        );
    }

    #[test]
    fn extracts_two_part_version() {
        assert_eq!(extract_version("Django 5.0"), "5.0");
    }

    #[test]
    fn unknown_when_no_digits() {
        assert_eq!(extract_version("command not found"), UNKNOWN_VERSION);
    }

    #[test]
    fn parse_handles_prefix_and_suffix() {
        let v = Version::parse("v3.10.0rc1").unwrap();
        assert_eq!(v.to_string(), "3.10.0");
        assert!(Version::parse("unknown").is_none());
    }

    #[test]
    fn comparison_is_numeric_not_lexical() {
        let a = Version::parse("3.9.0").unwrap();
        let b = Version::parse("3.10.0").unwrap();
        assert!(a < b);
    }

    #[test]
    fn missing_components_compare_as_zero() {
        assert_eq!(
            Version::parse("18").unwrap().cmp(&Version::parse("18.0.0").unwrap()),
            Ordering::Equal
        );
    }

    #[test]
    fn meets_minimum_checks() {
        assert!(meets_minimum("20.11.0", "18.0.0"));
        assert!(meets_minimum("18.0.0", "18.0.0"));
        assert!(!meets_minimum("16.20.2", "18.0.0"));
        assert!(meets_minimum(UNKNOWN_VERSION, "18.0.0"));
    }
}
