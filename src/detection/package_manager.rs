//! Package manager detection and install commands.

use std::fmt;
use std::path::{Path, PathBuf};

use super::files::{any_file_exists, file_exists, package_json};

/// Package manager an existing project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Pip,
}

/// One command of a dependency install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub program: String,
    pub args: Vec<String>,
    /// Spinner text while the step runs.
    pub description: String,
}

impl InstallStep {
    fn new(program: impl Into<String>, args: &[&str], description: &str) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            description: description.to_string(),
        }
    }
}

impl PackageManager {
    /// Detect the package manager of the project at `project_root`.
    ///
    /// Lockfiles win, then Python manifests, then the `packageManager`
    /// field of `package.json`. A bare `package.json` means npm.
    pub fn detect(project_root: &Path) -> Option<Self> {
        let lockfile = any_file_exists(
            project_root,
            &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"],
        );
        match lockfile.as_deref() {
            Some("package-lock.json") => return Some(Self::Npm),
            Some("yarn.lock") => return Some(Self::Yarn),
            Some("pnpm-lock.yaml") => return Some(Self::Pnpm),
            _ => {}
        }

        if file_exists(project_root, "requirements.txt")
            || file_exists(project_root, "pyproject.toml")
        {
            return Some(Self::Pip);
        }

        if !file_exists(project_root, "package.json") {
            return None;
        }
        // "pnpm@8.15.0", "yarn@4.1.0", ...
        let declared = package_json(project_root)
            .and_then(|m| m.get("packageManager")?.as_str().map(str::to_string))
            .unwrap_or_default();
        [Self::Pnpm, Self::Yarn, Self::Npm]
            .into_iter()
            .find(|pm| declared.starts_with(pm.name()))
            .or(Some(Self::Npm))
    }

    /// Command name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Pip => "pip",
        }
    }

    /// Whether this manages Node.js packages.
    pub fn is_node(self) -> bool {
        self != Self::Pip
    }

    /// Tools that must be installed before [`install_steps`](Self::install_steps) can run.
    ///
    /// Python packages go into a fresh virtual environment, so only the
    /// interpreter is needed.
    pub fn required_tools(self) -> Vec<&'static str> {
        match self {
            Self::Pip => vec!["python3"],
            pm => vec!["node", pm.name()],
        }
    }

    /// Commands that install the project's dependencies.
    pub fn install_steps(self, project_root: &Path) -> Vec<InstallStep> {
        if self.is_node() {
            return vec![InstallStep::new(
                self.name(),
                &["install"],
                &format!("Installing {} packages", self.name()),
            )];
        }

        let mut steps = Vec::new();
        if !project_root.join("venv").exists() {
            steps.push(InstallStep::new(
                "python3",
                &["-m", "venv", "venv"],
                "Creating virtual environment",
            ));
        }
        let pip = venv_pip(project_root).display().to_string();
        let args: &[&str] = if file_exists(project_root, "requirements.txt") {
            &["install", "-r", "requirements.txt"]
        } else {
            &["install", "."]
        };
        steps.push(InstallStep::new(pip, args, "Installing Python packages"));
        steps
    }

    /// Command that starts the dev server of a Node.js project.
    pub fn dev_command(self) -> Option<&'static str> {
        match self {
            Self::Npm => Some("npm run dev"),
            Self::Yarn => Some("yarn dev"),
            Self::Pnpm => Some("pnpm dev"),
            Self::Pip => None,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `pip` inside the project's `venv`.
pub fn venv_pip(project_root: &Path) -> PathBuf {
    if cfg!(windows) {
        project_root.join("venv").join("Scripts").join("pip.exe")
    } else {
        project_root.join("venv").join("bin").join("pip")
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
            fs::write(temp.path().join(name), contents).unwrap();
        }
        temp
    }

    #[test]
    fn lockfiles_decide_first() {
        let npm = project(&[("package.json", "{}"), ("package-lock.json", "{}")]);
        let yarn = project(&[("package.json", "{}"), ("yarn.lock", "")]);
        let pnpm = project(&[("package.json", "{}"), ("pnpm-lock.yaml", "")]);

        assert_eq!(PackageManager::detect(npm.path()), Some(PackageManager::Npm));
        assert_eq!(PackageManager::detect(yarn.path()), Some(PackageManager::Yarn));
        assert_eq!(PackageManager::detect(pnpm.path()), Some(PackageManager::Pnpm));
    }

    #[test]
    fn python_manifests_mean_pip() {
        let reqs = project(&[("requirements.txt", "flask\n")]);
        let pyproject = project(&[("pyproject.toml", "[project]\n")]);

        assert_eq!(PackageManager::detect(reqs.path()), Some(PackageManager::Pip));
        assert_eq!(PackageManager::detect(pyproject.path()), Some(PackageManager::Pip));
    }

    #[test]
    fn package_manager_field_is_honored() {
        let temp = project(&[("package.json", r#"{"packageManager": "pnpm@8.15.0"}"#)]);
        assert_eq!(PackageManager::detect(temp.path()), Some(PackageManager::Pnpm));
    }

    #[test]
    fn bare_package_json_defaults_to_npm() {
        let temp = project(&[("package.json", "{}")]);
        assert_eq!(PackageManager::detect(temp.path()), Some(PackageManager::Npm));
    }

    #[test]
    fn nothing_to_manage() {
        let temp = project(&[("README.md", "# hi")]);
        assert_eq!(PackageManager::detect(temp.path()), None);
    }

    #[test]
    fn node_managers_need_node() {
        assert_eq!(PackageManager::Yarn.required_tools(), vec!["node", "yarn"]);
        assert_eq!(PackageManager::Pip.required_tools(), vec!["python3"]);
    }

    #[test]
    fn node_install_is_one_command() {
        let temp = project(&[("package.json", "{}")]);
        let steps = PackageManager::Pnpm.install_steps(temp.path());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].program, "pnpm");
        assert_eq!(steps[0].args, vec!["install"]);
    }

    #[test]
    fn pip_install_creates_venv_first() {
        let temp = project(&[("requirements.txt", "fastapi\n")]);
        let steps = PackageManager::Pip.install_steps(temp.path());

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].program, "python3");
        assert_eq!(steps[0].args, vec!["-m", "venv", "venv"]);
        assert_eq!(PathBuf::from(&steps[1].program), venv_pip(temp.path()));
        assert_eq!(steps[1].args, vec!["install", "-r", "requirements.txt"]);
    }

    #[test]
    fn existing_venv_is_reused() {
        let temp = project(&[("pyproject.toml", "[project]\n")]);
        fs::create_dir(temp.path().join("venv")).unwrap();

        let steps = PackageManager::Pip.install_steps(temp.path());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].args, vec!["install", "."]);
    }
}
