//! CLI command implementations.
//!
//! Every subcommand implements [`Command`]; [`CommandDispatcher`] picks the
//! one named on the command line.

pub mod completions;
pub mod dispatcher;
pub mod info;
pub mod init;
pub mod list;
pub mod new;
pub mod version;

pub use dispatcher::{Command, CommandDispatcher};
