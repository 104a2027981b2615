//! Project creation from request to summary.
//!
//! The orchestrator drives one `scaffold new` run:
//!
//! 1. Validate the project name
//! 2. Refuse a non-empty destination before anything is spawned
//! 3. Gate on prerequisites before anything is written
//! 4. Generate the project (one stack, or `web/` + `api/` for a monorepo)
//! 5. Write post-install files and the monorepo README
//! 6. Initialize git when enabled and available
//! 7. Print the summary and next steps

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::install::git::{GitInitializer, GitOutcome, GitWarning};
use crate::install::outcome::InstallationOutcome;
use crate::install::readme::{monorepo_readme, BACKEND_DIR, FRONTEND_DIR};
use crate::install::runner::{run_post_install, CommandRunner};
use crate::requirements::{show_report, PrerequisiteChecker};
use crate::shell::{parse_system_path, Executor};
use crate::stacks::StackDescriptor;
use crate::ui::UserInterface;

/// What to generate.
#[derive(Debug, Clone, Copy)]
pub enum ProjectLayout {
    /// One stack directly in the project directory.
    Single(&'static StackDescriptor),
    /// A frontend in `web/` and a backend in `api/`.
    Monorepo {
        frontend: &'static StackDescriptor,
        backend: &'static StackDescriptor,
    },
}

impl ProjectLayout {
    /// Stacks in installation order.
    pub fn stacks(&self) -> Vec<&'static StackDescriptor> {
        match *self {
            Self::Single(stack) => vec![stack],
            Self::Monorepo { frontend, backend } => vec![frontend, backend],
        }
    }
}

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct NewProjectRequest {
    /// Project (directory) name.
    pub name: String,
    /// Directory the project is created in.
    pub base_dir: PathBuf,
    /// Stack or stacks to generate.
    pub layout: ProjectLayout,
    /// Whether to initialize a git repository.
    pub git: bool,
}

impl NewProjectRequest {
    /// Directory the project ends up in.
    pub fn target(&self) -> PathBuf {
        self.base_dir.join(&self.name)
    }

    /// Tools to check: every stack's requirements, then git when enabled.
    pub fn required_tools(&self) -> Vec<&'static str> {
        let mut tools: Vec<&'static str> = Vec::new();
        for stack in self.layout.stacks() {
            for tool in stack.requires {
                if !tools.contains(tool) {
                    tools.push(tool);
                }
            }
        }
        if self.git && !tools.contains(&"git") {
            tools.push("git");
        }
        tools
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    /// Project root.
    pub path: PathBuf,
    /// One outcome per installed stack.
    pub outcomes: Vec<InstallationOutcome>,
    /// Version-control result, when git ran.
    pub git: Option<GitOutcome>,
    /// Non-fatal problems shown to the user.
    pub warnings: Vec<GitWarning>,
}

/// Runs project creation end to end.
pub struct Orchestrator<'a> {
    executor: &'a dyn Executor,
    path_entries: Vec<PathBuf>,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator that looks for tools in `path_entries`.
    pub fn new(executor: &'a dyn Executor, path_entries: Vec<PathBuf>) -> Self {
        Self {
            executor,
            path_entries,
        }
    }

    /// Create an orchestrator that looks for tools on the process PATH.
    pub fn from_system_path(executor: &'a dyn Executor) -> Self {
        Self::new(executor, parse_system_path())
    }

    /// Create the project described by `request`.
    pub fn run(
        &self,
        request: &NewProjectRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<ProjectSummary> {
        validate_project_name(&request.name)?;

        let target = request.target();
        check_destination(&target)?;

        let tools = request.required_tools();
        tracing::debug!("Checking prerequisites: {}", tools.join(", "));
        let checker = PrerequisiteChecker::new(self.executor, self.path_entries.clone());
        let report = checker.check(tools.as_slice());
        if !report.all_required_satisfied() {
            show_report(&report, ui);
            return Err(ScaffoldError::MissingPrerequisite {
                tools: report.blocking().iter().map(|r| r.tool.clone()).collect(),
            });
        }

        ui.show_header(&format!("Creating {}", request.name));

        let outcomes = match request.layout {
            ProjectLayout::Single(stack) => {
                let outcome = self.install_single(stack, request, ui)?;
                vec![outcome]
            }
            ProjectLayout::Monorepo { frontend, backend } => {
                self.install_monorepo(frontend, backend, request, ui)?
            }
        };

        let mut warnings = Vec::new();
        let mut git = None;
        if request.git {
            if report.is_available("git") {
                let outcome = GitInitializer::new(self.executor).initialize(&target)?;
                report_git(&outcome, ui);
                warnings.extend(outcome.warnings.iter().cloned());
                git = Some(outcome);
            } else {
                let warning = GitWarning::git_missing();
                ui.warning(&warning.to_string());
                warnings.push(warning);
            }
        }

        show_summary(request, ui);

        Ok(ProjectSummary {
            path: target,
            outcomes,
            git,
            warnings,
        })
    }

    fn install_single(
        &self,
        stack: &StackDescriptor,
        request: &NewProjectRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallationOutcome> {
        let outcome =
            CommandRunner::new(self.executor).install(stack, &request.name, &request.base_dir, ui)?;

        if !outcome.success {
            return Err(ScaffoldError::ExternalCommandFailure {
                stack: stack.id.to_string(),
                message: outcome.error.unwrap_or_default(),
            });
        }

        run_post_install(stack, &outcome.path, &request.name, ui);
        Ok(outcome)
    }

    fn install_monorepo(
        &self,
        frontend: &StackDescriptor,
        backend: &StackDescriptor,
        request: &NewProjectRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<InstallationOutcome>> {
        let root = request.target();
        fs::create_dir_all(&root)?;

        let runner = CommandRunner::new(self.executor);
        let mut outcomes = Vec::with_capacity(2);
        for (role, stack, dir) in [
            ("frontend", frontend, FRONTEND_DIR),
            ("backend", backend, BACKEND_DIR),
        ] {
            ui.message(&format!("→ Setting up {} ({}/)...", role, dir));
            let outcome = runner.install(stack, dir, &root, ui)?;
            if outcome.success {
                run_post_install(stack, &outcome.path, dir, ui);
                ui.success(&format!("{} ready in {}/", stack.display_name, dir));
            } else {
                ui.error(&format!(
                    "{} installation failed: {}",
                    capitalize(role),
                    outcome.error.as_deref().unwrap_or("unknown error")
                ));
            }
            outcomes.push(outcome);
        }

        if let Some(failed) = outcomes.iter().find(|o| !o.success) {
            return Err(ScaffoldError::ExternalCommandFailure {
                stack: failed.stack.clone(),
                message: failed.error.clone().unwrap_or_default(),
            });
        }

        let readme = root.join("README.md");
        if !readme.exists() {
            fs::write(&readme, monorepo_readme(&request.name, frontend, backend))?;
        }

        Ok(outcomes)
    }
}

/// Reject names that cannot be a single directory component.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| ScaffoldError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name cannot be '.' or '..'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("name cannot contain control characters"));
    }
    // Generators would read it as an option.
    if name.starts_with('-') {
        return Err(invalid("name cannot start with '-'"));
    }
    Ok(())
}

/// Fail when `target` exists and is anything but an empty directory.
pub fn check_destination(target: &Path) -> Result<()> {
    if !target.exists() {
        return Ok(());
    }
    let empty_dir = target.is_dir() && fs::read_dir(target)?.next().is_none();
    if empty_dir {
        tracing::debug!("Reusing empty directory {}", target.display());
        return Ok(());
    }
    Err(ScaffoldError::DestinationConflict {
        path: target.to_path_buf(),
    })
}

pub(crate) fn report_git(outcome: &GitOutcome, ui: &mut dyn UserInterface) {
    if outcome.already_initialized {
        ui.show_hint("Git repository already initialized");
    }
    for warning in &outcome.warnings {
        ui.warning(&warning.to_string());
    }
    if outcome.committed {
        ui.success("Initialized git repository with initial commit");
    }
}

fn show_summary(request: &NewProjectRequest, ui: &mut dyn UserInterface) {
    match request.layout {
        ProjectLayout::Single(stack) => {
            ui.success(&format!(
                "Created {} project: {}",
                stack.display_name, request.name
            ));
            ui.message("");
            ui.message("Next steps:");
            for line in stack.render_next_steps(&request.name) {
                ui.message(&format!("  {}", line));
            }
        }
        ProjectLayout::Monorepo { frontend, backend } => {
            ui.success(&format!("Created monorepo: {}", request.name));
            ui.message("");
            ui.message("Structure:");
            ui.message(&format!("  {}/", request.name));
            ui.message(&format!("  ├── {}/  ({})", FRONTEND_DIR, frontend.display_name));
            ui.message(&format!("  └── {}/  ({})", BACKEND_DIR, backend.display_name));
            ui.message("");
            ui.message("Next steps:");
            ui.message(&format!("  cd {}", request.name));
            ui.message("");
            ui.message("  # Frontend");
            for line in frontend.render_next_steps(FRONTEND_DIR) {
                ui.message(&format!("  {}", line));
            }
            ui.message("");
            ui.message("  # Backend (in another terminal)");
            for line in backend.render_next_steps(BACKEND_DIR) {
                ui.message(&format!("  {}", line));
            }
        }
    }
    ui.show_hint("Need help? Run: scaffold --help");
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::find_stack;
    use tempfile::TempDir;

    fn request(layout: ProjectLayout, git: bool) -> NewProjectRequest {
        NewProjectRequest {
            name: "demo".to_string(),
            base_dir: PathBuf::from("/tmp"),
            layout,
            git,
        }
    }

    #[test]
    fn name_validation() {
        assert!(validate_project_name("demo-app").is_ok());
        assert!(validate_project_name("my_app.v2").is_ok());
        for bad in ["", "   ", ".", "..", "a/b", "a\\b", "--help", "-app"] {
            let err = validate_project_name(bad).unwrap_err();
            assert!(matches!(err, ScaffoldError::InvalidProjectName { .. }), "{bad:?}");
        }
    }

    #[test]
    fn destination_absent_or_empty_is_fine() {
        let temp = TempDir::new().unwrap();
        assert!(check_destination(&temp.path().join("new")).is_ok());
        fs::create_dir(temp.path().join("empty")).unwrap();
        assert!(check_destination(&temp.path().join("empty")).is_ok());
    }

    #[test]
    fn destination_non_empty_or_file_conflicts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("taken")).unwrap();
        fs::write(temp.path().join("taken/file.txt"), "x").unwrap();
        fs::write(temp.path().join("plain"), "x").unwrap();

        for name in ["taken", "plain"] {
            let err = check_destination(&temp.path().join(name)).unwrap_err();
            assert!(matches!(err, ScaffoldError::DestinationConflict { .. }));
        }
    }

    #[test]
    fn required_tools_are_deduplicated_with_git_last() {
        let layout = ProjectLayout::Monorepo {
            frontend: find_stack("react-vite").unwrap(),
            backend: find_stack("express").unwrap(),
        };
        assert_eq!(request(layout, true).required_tools(), vec!["node", "npm", "git"]);
        assert_eq!(request(layout, false).required_tools(), vec!["node", "npm"]);
    }

    #[test]
    fn target_joins_base_and_name() {
        let req = request(ProjectLayout::Single(find_stack("flask").unwrap()), false);
        assert_eq!(req.target(), PathBuf::from("/tmp/demo"));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("frontend"), "Frontend");
        assert_eq!(capitalize(""), "");
    }
}
