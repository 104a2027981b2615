//! Version-control initialization.
//!
//! Nothing here is fatal. Every git problem becomes a [`GitWarning`]; only
//! a signal-terminated git process aborts the run.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScaffoldError};
use crate::shell::{CommandResult, CommandSpec, Executor};

/// Message of the first commit in every generated repository.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from Scaffold CLI";

/// Branch name the initial commit is moved to.
pub const DEFAULT_BRANCH: &str = "master";

const GIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Written when the generated project has no `.gitignore` of its own.
pub const DEFAULT_GITIGNORE: &str = "# Dependencies
node_modules/
venv/
__pycache__/
*.pyc

# Environment
.env
.env.local

# IDE
.vscode/
.idea/
*.swp
*.swo

# OS
.DS_Store
Thumbs.db

# Build outputs
dist/
build/
*.egg-info/
";

/// A non-fatal version-control problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitWarning {
    /// What went wrong.
    pub message: String,
    /// Captured git output, if any.
    pub detail: Option<String>,
}

impl GitWarning {
    /// A warning without captured output.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    /// A warning built from a failed git step.
    pub fn from_step(step: &str, result: &CommandResult) -> Self {
        Self {
            message: format!("git {} failed", step),
            detail: Some(result.diagnostic(500)),
        }
    }

    /// The warning shown when git is not installed.
    pub fn git_missing() -> Self {
        Self::new("Git not installed; skipping repository initialization (https://git-scm.com/)")
    }
}

impl fmt::Display for GitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}

/// What happened during initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutcome {
    /// The directory already held a repository and was left alone.
    pub already_initialized: bool,
    /// An initial commit was created.
    pub committed: bool,
    /// Problems encountered along the way.
    pub warnings: Vec<GitWarning>,
}

/// Runs the git steps for a freshly generated project.
pub struct GitInitializer<'a> {
    executor: &'a dyn Executor,
    message: String,
}

impl<'a> GitInitializer<'a> {
    /// Create an initializer that commits with [`INITIAL_COMMIT_MESSAGE`].
    pub fn new(executor: &'a dyn Executor) -> Self {
        Self {
            executor,
            message: INITIAL_COMMIT_MESSAGE.to_string(),
        }
    }

    /// Use a different message for the initial commit.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Initialize `project` as a repository with one commit.
    ///
    /// Steps: `git init`, default `.gitignore` when absent,
    /// `core.autocrlf=input`, `git add -A`, commit, rename branch.
    pub fn initialize(&self, project: &Path) -> Result<GitOutcome> {
        let mut outcome = GitOutcome::default();

        if project.join(".git").exists() {
            tracing::debug!("{} is already a git repository", project.display());
            outcome.already_initialized = true;
            return Ok(outcome);
        }

        let init = self.git(project, &["init"])?;
        if !init.success {
            outcome.warnings.push(GitWarning::from_step("init", &init));
            return Ok(outcome);
        }

        if let Err(e) = ensure_gitignore(project) {
            outcome
                .warnings
                .push(GitWarning::new(format!("Could not write .gitignore: {}", e)));
        }

        let config = self.git(project, &["config", "core.autocrlf", "input"])?;
        if !config.success {
            tracing::debug!("git config failed: {}", config.diagnostic(200));
        }

        let add = self.git(project, &["add", "-A"])?;
        if !add.success {
            outcome.warnings.push(GitWarning::from_step("add", &add));
            return Ok(outcome);
        }

        let status = self.git(project, &["status", "--porcelain"])?;
        if status.success && status.stdout.trim().is_empty() {
            outcome.warnings.push(GitWarning::new("No files to commit"));
            return Ok(outcome);
        }

        let commit = self.git(project, &["commit", "-m", &self.message])?;
        if !commit.success {
            outcome.warnings.push(GitWarning::from_step("commit", &commit));
            return Ok(outcome);
        }
        outcome.committed = true;

        let branch = self.git(project, &["branch", "-M", DEFAULT_BRANCH])?;
        if !branch.success {
            outcome.warnings.push(GitWarning::from_step("branch", &branch));
        }

        Ok(outcome)
    }

    /// Run one git step. Launch failures come back as unsuccessful results.
    fn git(&self, project: &Path, args: &[&str]) -> Result<CommandResult> {
        let spec = CommandSpec::new("git")
            .args(args.iter().copied())
            .cwd(project)
            .timeout(GIT_TIMEOUT);

        match self.executor.execute(&spec) {
            Ok(result) if result.interrupted => Err(ScaffoldError::Interrupted {
                command: spec.display(),
            }),
            Ok(result) => Ok(result),
            Err(ScaffoldError::LaunchFailed { source, .. }) => {
                Ok(CommandResult::failure(None, source.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

/// Write [`DEFAULT_GITIGNORE`] unless the project already has one.
pub fn ensure_gitignore(project: &Path) -> std::io::Result<bool> {
    let path = project.join(".gitignore");
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, DEFAULT_GITIGNORE)?;
    Ok(true)
}
