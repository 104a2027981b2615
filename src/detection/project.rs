//! Project type detection.

use std::fmt;
use std::path::{Path, PathBuf};

use super::files::{file_exists, node_dependencies, requirements_text};
use super::package_manager::PackageManager;

/// Kind of project found in a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    NextJs,
    React,
    Vue,
    Express,
    NodeJs,
    Django,
    FastApi,
    Flask,
    Python,
    /// `web/` plus `api/`, as `scaffold new --monorepo` lays out.
    Monorepo,
    Unknown,
}

impl ProjectKind {
    /// Detect the primary kind of the project at `project_root`.
    ///
    /// `package.json` is checked first; its dependencies decide the
    /// framework. Python projects are told apart by `manage.py`, `main.py`
    /// and `requirements.txt`.
    pub fn detect(project_root: &Path) -> Self {
        if file_exists(project_root, "package.json") {
            let deps = node_dependencies(project_root);
            let has = |name: &str| deps.contains(name);
            return if has("next") {
                Self::NextJs
            } else if has("react") || has("react-dom") {
                Self::React
            } else if has("vue") {
                Self::Vue
            } else if has("express") {
                Self::Express
            } else {
                Self::NodeJs
            };
        }

        if file_exists(project_root, "manage.py") {
            return Self::Django;
        }
        if file_exists(project_root, "main.py") {
            let requirements = requirements_text(project_root);
            return if requirements.contains("fastapi") {
                Self::FastApi
            } else if requirements.contains("flask") {
                Self::Flask
            } else {
                Self::Python
            };
        }
        if file_exists(project_root, "requirements.txt") || file_exists(project_root, "pyproject.toml")
        {
            return Self::Python;
        }

        if project_root.join("web").is_dir() && project_root.join("api").is_dir() {
            return Self::Monorepo;
        }

        Self::Unknown
    }

    /// Short lowercase identifier, as shown in debug logs.
    pub fn id(self) -> &'static str {
        match self {
            Self::NextJs => "nextjs",
            Self::React => "react",
            Self::Vue => "vue",
            Self::Express => "express",
            Self::NodeJs => "nodejs",
            Self::Django => "django",
            Self::FastApi => "fastapi",
            Self::Flask => "flask",
            Self::Python => "python",
            Self::Monorepo => "monorepo",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::NextJs => "Next.js",
            Self::React => "React",
            Self::Vue => "Vue",
            Self::Express => "Express",
            Self::NodeJs => "Node.js",
            Self::Django => "Django",
            Self::FastApi => "FastAPI",
            Self::Flask => "Flask",
            Self::Python => "Python",
            Self::Monorepo => "Monorepo",
            Self::Unknown => "Unknown",
        }
    }

    /// Port the app listens on inside its container.
    pub fn default_port(self) -> u16 {
        match self {
            Self::React | Self::Vue => 80,
            Self::NextJs | Self::NodeJs => 3000,
            Self::Express => 3001,
            _ => 8000,
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything `scaffold init` learned about a directory.
#[derive(Debug, Clone)]
pub struct DetectedProject {
    pub kind: ProjectKind,
    /// Directory name.
    pub name: String,
    pub root: PathBuf,
    pub package_manager: Option<PackageManager>,
    /// Frameworks and notable libraries, in a fixed order.
    pub frameworks: Vec<String>,
    pub has_git: bool,
    /// A `.env` file exists.
    pub has_env: bool,
    /// A `Dockerfile` exists.
    pub has_docker: bool,
    pub dependencies_installed: bool,
}

/// Node packages worth naming, with their display names.
const NODE_FRAMEWORKS: &[(&str, &str)] = &[
    ("react", "React"),
    ("next", "Next.js"),
    ("vue", "Vue"),
    ("express", "Express.js"),
    ("tailwindcss", "Tailwind CSS"),
    ("typescript", "TypeScript"),
    ("vite", "Vite"),
];

const PYTHON_FRAMEWORKS: &[(&str, &str)] =
    &[("django", "Django"), ("fastapi", "FastAPI"), ("flask", "Flask")];

/// Detects an existing project from its marker files.
pub struct ProjectDetector;

impl ProjectDetector {
    /// Analyze the directory at `project_root`.
    pub fn detect(project_root: &Path) -> DetectedProject {
        let kind = ProjectKind::detect(project_root);
        let package_manager = PackageManager::detect(project_root);
        let frameworks = Self::frameworks(project_root);
        let dependencies_installed = Self::dependencies_installed(project_root);
        tracing::debug!(
            "Detected {} project (package manager: {:?}, frameworks: {:?}, dependencies installed: {})",
            kind.id(),
            package_manager,
            frameworks,
            dependencies_installed
        );

        DetectedProject {
            kind,
            name: project_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "project".to_string()),
            root: project_root.to_path_buf(),
            package_manager,
            frameworks,
            has_git: file_exists(project_root, ".git"),
            has_env: file_exists(project_root, ".env"),
            has_docker: file_exists(project_root, "Dockerfile"),
            dependencies_installed,
        }
    }

    fn frameworks(project_root: &Path) -> Vec<String> {
        let deps = node_dependencies(project_root);
        let requirements = requirements_text(project_root);

        let node = NODE_FRAMEWORKS
            .iter()
            .filter(|(pkg, _)| deps.contains(*pkg));
        let python = PYTHON_FRAMEWORKS
            .iter()
            .filter(|(pkg, _)| requirements.contains(pkg));
        node.chain(python).map(|(_, name)| name.to_string()).collect()
    }

    /// `node_modules` for Node.js, a virtual environment for
    /// `requirements.txt`. Anything else is assumed installed.
    fn dependencies_installed(project_root: &Path) -> bool {
        if file_exists(project_root, "package.json") {
            return file_exists(project_root, "node_modules");
        }
        if file_exists(project_root, "requirements.txt") {
            return file_exists(project_root, "venv") || file_exists(project_root, ".venv");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (name, contents) in files {
            let path = temp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        temp
    }

    fn kind(files: &[(&str, &str)]) -> ProjectKind {
        ProjectKind::detect(project(files).path())
    }

    #[test]
    fn node_frameworks_by_dependency() {
        let cases = [
            (r#"{"dependencies": {"next": "14", "react": "18"}}"#, ProjectKind::NextJs),
            (r#"{"dependencies": {"react-dom": "18"}}"#, ProjectKind::React),
            (r#"{"devDependencies": {"vue": "3"}}"#, ProjectKind::Vue),
            (r#"{"dependencies": {"express": "4"}}"#, ProjectKind::Express),
            (r#"{"dependencies": {"lodash": "4"}}"#, ProjectKind::NodeJs),
            ("not json", ProjectKind::NodeJs),
        ];
        for (manifest, expected) in cases {
            assert_eq!(kind(&[("package.json", manifest)]), expected, "{manifest}");
        }
    }

    #[test]
    fn python_frameworks_by_marker() {
        assert_eq!(kind(&[("manage.py", "")]), ProjectKind::Django);
        assert_eq!(
            kind(&[("main.py", ""), ("requirements.txt", "FastAPI\nuvicorn\n")]),
            ProjectKind::FastApi
        );
        assert_eq!(
            kind(&[("main.py", ""), ("requirements.txt", "flask\n")]),
            ProjectKind::Flask
        );
        assert_eq!(kind(&[("main.py", "")]), ProjectKind::Python);
        assert_eq!(kind(&[("pyproject.toml", "")]), ProjectKind::Python);
    }

    #[test]
    fn web_and_api_make_a_monorepo() {
        assert_eq!(
            kind(&[("web/package.json", "{}"), ("api/main.py", "")]),
            ProjectKind::Monorepo
        );
        assert_eq!(kind(&[("web/index.html", "")]), ProjectKind::Unknown);
    }

    #[test]
    fn empty_directory_is_unknown() {
        assert_eq!(kind(&[]), ProjectKind::Unknown);
    }

    #[test]
    fn detect_collects_markers() {
        let temp = project(&[
            (
                "package.json",
                r#"{"dependencies": {"react": "18"}, "devDependencies": {"vite": "5", "typescript": "5"}}"#,
            ),
            ("yarn.lock", ""),
            (".env", "A=1\n"),
        ]);
        fs::create_dir(temp.path().join(".git")).unwrap();

        let detected = ProjectDetector::detect(temp.path());

        assert_eq!(detected.kind, ProjectKind::React);
        assert_eq!(detected.package_manager, Some(PackageManager::Yarn));
        assert_eq!(detected.frameworks, vec!["React", "TypeScript", "Vite"]);
        assert!(detected.has_git);
        assert!(detected.has_env);
        assert!(!detected.has_docker);
        assert!(!detected.dependencies_installed);
        assert_eq!(
            Some(detected.name.as_str()),
            temp.path().file_name().and_then(|n| n.to_str())
        );
    }

    #[test]
    fn installed_dependencies() {
        let node = project(&[("package.json", "{}"), ("node_modules/.keep", "")]);
        let venv = project(&[("requirements.txt", "django\n"), (".venv/pyvenv.cfg", "")]);
        let bare = project(&[("pyproject.toml", "")]);

        assert!(ProjectDetector::detect(node.path()).dependencies_installed);
        assert!(ProjectDetector::detect(venv.path()).dependencies_installed);
        assert!(ProjectDetector::detect(bare.path()).dependencies_installed);
    }

    #[test]
    fn python_frameworks_come_from_requirements() {
        let temp = project(&[("manage.py", ""), ("requirements.txt", "Django==5.0\n")]);
        assert_eq!(ProjectDetector::detect(temp.path()).frameworks, vec!["Django"]);
    }
}
