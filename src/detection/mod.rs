//! Detection of existing projects for `scaffold init`.
//!
//! Detection only looks at marker files in the project root; it never
//! spawns anything.

pub mod files;
pub mod package_manager;
pub mod project;

pub use files::{any_file_exists, file_exists, node_dependencies, requirements_text};
pub use package_manager::{InstallStep, PackageManager};
pub use project::{DetectedProject, ProjectDetector, ProjectKind};
