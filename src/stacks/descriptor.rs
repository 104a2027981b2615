//! Stack descriptors.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// Broad grouping used for menus and `list --category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Browser-side applications.
    Frontend,
    /// HTTP APIs and backend services.
    Api,
    /// Full-stack frameworks.
    Framework,
    /// Command-line applications.
    Cli,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 4] = [Self::Frontend, Self::Api, Self::Framework, Self::Cli];

    /// Identifier used on the command line and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Api => "api",
            Self::Framework => "framework",
            Self::Cli => "cli",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Api => "Backend API",
            Self::Framework => "Full-stack framework",
            Self::Cli => "CLI application",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Writes a stack's file set into a target directory.
///
/// Arguments are the target directory and the project name.
pub type CustomInstaller = fn(&Path, &str) -> Result<()>;

/// How a stack's project is produced.
#[derive(Clone, Copy)]
pub enum Generator {
    /// External command template; `{name}` is replaced by the project name.
    Command(&'static str),
    /// Built-in installer that writes files directly.
    Custom(CustomInstaller),
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(template) => f.debug_tuple("Command").field(template).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl Serialize for Generator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Command(template) => serializer.serialize_str(template),
            Self::Custom(_) => serializer.serialize_str("builtin"),
        }
    }
}

/// A file written into the project after a successful install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostInstallStep {
    /// Write `contents` to `path` (relative to the project), replacing `{name}`.
    WriteFile {
        path: &'static str,
        contents: &'static str,
    },
}

/// Immutable description of one supported stack.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StackDescriptor {
    /// Unique identifier, e.g. `react-vite`.
    pub id: &'static str,
    /// Menu label, e.g. `React (Vite)`.
    pub display_name: &'static str,
    /// Menu grouping.
    pub category: Category,
    /// Primary language of the generated project.
    pub language: &'static str,
    /// How the project is produced.
    pub generator: Generator,
    /// Tools that must be installed before generating.
    pub requires: &'static [&'static str],
    /// Whether the generator asks its own questions on the terminal.
    pub interactive: bool,
    /// Files written after the generator succeeds.
    pub post_install: &'static [PostInstallStep],
    /// Commands to suggest once the project exists; `{name}` is substituted.
    pub next_steps: &'static [&'static str],
}

impl StackDescriptor {
    /// Whether this stack is produced by a built-in installer.
    pub fn is_custom(&self) -> bool {
        matches!(self.generator, Generator::Custom(_))
    }

    /// The generator command for a project, split into program and arguments.
    ///
    /// Returns `None` for built-in installers.
    pub fn command_line(&self, project_name: &str) -> Option<Vec<String>> {
        match self.generator {
            Generator::Command(template) => Some(
                template
                    .split_whitespace()
                    .map(|part| part.replace("{name}", project_name))
                    .collect(),
            ),
            Generator::Custom(_) => None,
        }
    }

    /// Next-step lines with the project name filled in.
    pub fn render_next_steps(&self, project_name: &str) -> Vec<String> {
        self.next_steps
            .iter()
            .map(|line| line.replace("{name}", project_name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Path, _: &str) -> Result<()> {
        Ok(())
    }

    fn command_stack() -> StackDescriptor {
        StackDescriptor {
            id: "react-vite-ts",
            display_name: "React + TypeScript (Vite)",
            category: Category::Frontend,
            language: "typescript",
            generator: Generator::Command("npm create vite@latest {name} -- --template react-ts"),
            requires: &["node", "npm"],
            interactive: true,
            post_install: &[],
            next_steps: &["cd {name}", "npm install"],
        }
    }

    #[test]
    fn command_line_substitutes_and_splits() {
        let argv = command_stack().command_line("demo-app").unwrap();
        assert_eq!(
            argv,
            vec![
                "npm",
                "create",
                "vite@latest",
                "demo-app",
                "--",
                "--template",
                "react-ts"
            ]
        );
    }

    #[test]
    fn custom_stack_has_no_command_line() {
        let stack = StackDescriptor {
            generator: Generator::Custom(noop),
            ..command_stack()
        };
        assert!(stack.is_custom());
        assert!(stack.command_line("x").is_none());
    }

    #[test]
    fn next_steps_are_rendered() {
        assert_eq!(
            command_stack().render_next_steps("demo"),
            vec!["cd demo", "npm install"]
        );
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("API".parse::<Category>(), Ok(Category::Api));
        assert_eq!("cli".parse::<Category>(), Ok(Category::Cli));
        assert!("mobile".parse::<Category>().is_err());
    }

    #[test]
    fn descriptor_serializes_generator_as_text() {
        let json = serde_json::to_value(command_stack()).unwrap();
        assert_eq!(json["category"], "frontend");
        assert_eq!(
            json["generator"],
            "npm create vite@latest {name} -- --template react-ts"
        );

        let custom = StackDescriptor {
            generator: Generator::Custom(noop),
            ..command_stack()
        };
        let json = serde_json::to_value(custom).unwrap();
        assert_eq!(json["generator"], "builtin");
    }
}
