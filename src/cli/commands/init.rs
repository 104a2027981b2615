//! Init command implementation.
//!
//! `scaffold init [PATH]` sets up a project that already exists.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::error::{Result, ScaffoldError};
use crate::install::{InitRequest, ProjectInitializer};
use crate::shell::SystemExecutor;
use crate::ui::UserInterface;

use super::dispatcher::Command;

/// The init command implementation.
pub struct InitCommand {
    working_dir: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create an init command; a relative `PATH` is taken from `working_dir`.
    pub fn new(working_dir: &Path, args: InitArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            args,
        }
    }

    /// Project directory, canonicalized when it exists so its name is real.
    pub fn root(&self) -> PathBuf {
        let root = match &self.args.path {
            Some(path) => self.working_dir.join(path),
            None => self.working_dir.clone(),
        };
        fs::canonicalize(&root).unwrap_or(root)
    }

    /// Set up the project with `initializer`.
    pub fn run_with(
        &self,
        initializer: &ProjectInitializer<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let root = self.root();
        if !root.is_dir() {
            return Err(ScaffoldError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", root.display()),
            )));
        }

        let request = InitRequest {
            root,
            git: !self.args.no_git,
        };
        tracing::debug!("Init request: {:?}", request);

        initializer.run(&request, ui)?;
        Ok(())
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let executor = SystemExecutor;
        let initializer = ProjectInitializer::from_system_path(&executor);
        self.run_with(&initializer, ui)
    }
}
