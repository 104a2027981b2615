//! Marker-file helpers.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

/// Check if a file exists relative to the project root.
pub fn file_exists(project_root: &Path, file: &str) -> bool {
    project_root.join(file).exists()
}

/// First of `files` that exists.
pub fn any_file_exists(project_root: &Path, files: &[&str]) -> Option<String> {
    files
        .iter()
        .find(|f| project_root.join(f).exists())
        .map(|f| f.to_string())
}

/// Parsed `package.json`, or `None` when it is absent or not valid JSON.
pub fn package_json(project_root: &Path) -> Option<Value> {
    let text = fs::read_to_string(project_root.join("package.json")).ok()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring unreadable package.json: {}", e);
            None
        }
    }
}

/// Names in `dependencies` and `devDependencies` of `package.json`.
pub fn node_dependencies(project_root: &Path) -> BTreeSet<String> {
    let Some(manifest) = package_json(project_root) else {
        return BTreeSet::new();
    };
    ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|section| manifest.get(section).and_then(Value::as_object))
        .flat_map(|deps| deps.keys().cloned())
        .collect()
}

/// Lower-cased `requirements.txt`, or an empty string.
pub fn requirements_text(project_root: &Path) -> String {
    fs::read_to_string(project_root.join("requirements.txt"))
        .map(|text| text.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_existing_file_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        fs::write(temp.path().join("pnpm-lock.yaml"), "").unwrap();

        let found = any_file_exists(temp.path(), &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"]);
        assert_eq!(found.as_deref(), Some("yarn.lock"));
        assert!(any_file_exists(temp.path(), &["Gemfile"]).is_none());
    }

    #[test]
    fn dependencies_merge_both_sections() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies": {"react": "^18"}, "devDependencies": {"vite": "^5"}}"#,
        )
        .unwrap();

        let deps = node_dependencies(temp.path());
        assert!(deps.contains("react"));
        assert!(deps.contains("vite"));
    }

    #[test]
    fn broken_package_json_has_no_dependencies() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{ not json").unwrap();

        assert!(package_json(temp.path()).is_none());
        assert!(node_dependencies(temp.path()).is_empty());
    }

    #[test]
    fn requirements_are_lower_cased() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "FastAPI==0.110\n").unwrap();
        assert_eq!(requirements_text(temp.path()), "fastapi==0.110\n");
        assert_eq!(requirements_text(&temp.path().join("missing")), "");
    }
}
