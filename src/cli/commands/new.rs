//! New command implementation.
//!
//! The `scaffold new` command creates a project from one stack, or a
//! monorepo from a frontend and a backend stack.

use std::path::{Path, PathBuf};

use crate::cli::args::NewArgs;
use crate::error::Result;
use crate::install::{
    check_destination, choose_layout, project_name, validate_project_name, NewProjectRequest,
    Orchestrator, StackFlags,
};
use crate::shell::SystemExecutor;
use crate::ui::UserInterface;

use super::dispatcher::Command;

/// The new command implementation.
pub struct NewCommand {
    working_dir: PathBuf,
    args: NewArgs,
}

impl NewCommand {
    /// Create a new command; `--path` defaults to `working_dir`.
    pub fn new(working_dir: &Path, args: NewArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            args,
        }
    }

    /// Directory the project is created in.
    pub fn base_dir(&self) -> PathBuf {
        self.args
            .path
            .clone()
            .unwrap_or_else(|| self.working_dir.clone())
    }

    /// Collect the request, then hand it to `orchestrator`.
    pub fn run_with(
        &self,
        orchestrator: &Orchestrator<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let name = project_name(self.args.name.clone(), ui)?;
        validate_project_name(&name)?;

        let base_dir = self.base_dir();
        // Fail before asking about stacks when the answer can't matter.
        check_destination(&base_dir.join(&name))?;

        let flags = StackFlags {
            monorepo: self.args.monorepo,
            stack: self.args.stack.clone(),
            frontend: self.args.frontend.clone(),
            backend: self.args.backend.clone(),
        };
        let layout = choose_layout(&flags, ui)?;

        let request = NewProjectRequest {
            name,
            base_dir,
            layout,
            git: !self.args.no_git,
        };
        tracing::debug!("New project request: {:?}", request);

        orchestrator.run(&request, ui)?;
        Ok(())
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let executor = SystemExecutor;
        let orchestrator = Orchestrator::from_system_path(&executor);
        self.run_with(&orchestrator, ui)
    }
}
