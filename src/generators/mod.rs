//! Files `scaffold init` adds to an existing project.
//!
//! Generators only build file contents. Writing them, and asking before
//! anything is replaced, is up to the
//! [`ProjectInitializer`](crate::install::ProjectInitializer).

pub mod docker;
pub mod env;

pub use docker::{DockerFiles, DockerSetup};
pub use env::{EnvCategory, EnvConfig, Service};
