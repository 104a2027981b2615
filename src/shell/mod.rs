//! External process execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{CommandResult, CommandSpec, Executor, StdioMode, SystemExecutor};
pub use mock::MockExecutor;
pub use platform::{has_terminal, is_ci, parse_system_path, platform_description};
