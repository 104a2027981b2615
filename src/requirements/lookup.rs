//! Binary discovery on PATH.
//!
//! We walk PATH ourselves instead of shelling out to `which`: `which`
//! behaves differently across systems and is sometimes a shell builtin.
//! A file that exists but is not executable is treated as absent.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// File names a tool may have. Windows tools are often `.cmd` shims.
fn candidate_names(tool: &str, windows: bool) -> Vec<String> {
    if windows {
        [".exe", ".cmd", ".bat", ""]
            .iter()
            .map(|ext| format!("{}{}", tool, ext))
            .collect()
    } else {
        vec![tool.to_string()]
    }
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that is a regular file and executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool, cfg!(windows));
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}
