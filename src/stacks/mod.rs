//! Supported technology stacks.
//!
//! A stack is either generated by its framework's official tool (for example
//! `npm create vite@latest`) or written from an embedded file set.

pub mod catalog;
pub mod custom;
pub mod descriptor;

pub use catalog::{by_category, find_stack, stack_ids, STACKS};
pub use descriptor::{Category, CustomInstaller, Generator, PostInstallStep, StackDescriptor};
