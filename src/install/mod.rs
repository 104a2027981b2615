//! Project generation and setup.
//!
//! [`Orchestrator`] owns a `scaffold new` run. It gates on prerequisites,
//! hands each stack to the [`CommandRunner`], and finishes with
//! [`GitInitializer`]. Failures of a generator are fatal; git problems are
//! reported as [`GitWarning`]s. [`ProjectInitializer`] owns `scaffold init`.

pub mod git;
pub mod initializer;
pub mod orchestrator;
pub mod outcome;
pub mod readme;
pub mod runner;
pub mod selection;

pub use git::{GitInitializer, GitOutcome, GitWarning, INITIAL_COMMIT_MESSAGE};
pub use initializer::{required_tools, InitRequest, InitSummary, ProjectInitializer};
pub use orchestrator::{
    check_destination, validate_project_name, NewProjectRequest, Orchestrator, ProjectLayout,
    ProjectSummary,
};
pub use outcome::InstallationOutcome;
pub use runner::{run_post_install, CommandRunner, INSTALL_TIMEOUT};
pub use selection::{choose_layout, project_name, resolve_stack, StackFlags};
