//! Scaffold - Interactive project scaffolding.
//!
//! Scaffold creates new projects from a catalog of popular stacks. It checks
//! that the tools a stack needs are installed, runs the framework's official
//! generator (or writes a small built-in file set), and initializes a git
//! repository with a first commit. `scaffold init` sets up an existing
//! project instead: dependencies, `.env` files, Docker files and git.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Recognizing existing projects and their package managers
//! - [`error`] - Error types and result aliases
//! - [`generators`] - `.env` and Docker file contents for existing projects
//! - [`install`] - Project generation, project setup, and git initialization
//! - [`requirements`] - Tool discovery and minimum-version checks
//! - [`shell`] - External command execution
//! - [`stacks`] - The stack catalog and built-in templates
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use scaffold::stacks::find_stack;
//!
//! let stack = find_stack("react-vite").unwrap();
//! let argv = stack.command_line("demo-app").unwrap();
//! assert_eq!(argv, ["npm", "create", "vite@latest", "demo-app"]);
//! ```

pub mod cli;
pub mod detection;
pub mod error;
pub mod generators;
pub mod install;
pub mod requirements;
pub mod shell;
pub mod stacks;
pub mod ui;

pub use error::{Result, ScaffoldError};
