//! Known external tools.
//!
//! Every tool a stack may require is described here: how to query its
//! version, the oldest version we accept, and where to get it.

use serde::Serialize;

/// Static description of one external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    /// Name used in stack requirement lists.
    pub name: &'static str,
    /// Arguments that make the tool print its version.
    pub version_args: &'static [&'static str],
    /// Oldest acceptable version, if any.
    pub min_version: Option<&'static str>,
    /// Where to get the tool.
    pub install_hint: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Whether a missing tool only warrants a warning.
    pub optional: bool,
}

/// All tools the scaffolder knows how to check.
pub const KNOWN_TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "node",
        version_args: &["--version"],
        min_version: Some("18.0.0"),
        install_hint: "https://nodejs.org/",
        description: "Node.js runtime",
        optional: false,
    },
    ToolSpec {
        name: "npm",
        version_args: &["--version"],
        min_version: Some("9.0.0"),
        install_hint: "https://nodejs.org/ (comes with Node.js)",
        description: "Node package manager",
        optional: false,
    },
    ToolSpec {
        name: "yarn",
        version_args: &["--version"],
        min_version: None,
        install_hint: "npm install -g yarn",
        description: "Yarn package manager",
        optional: false,
    },
    ToolSpec {
        name: "pnpm",
        version_args: &["--version"],
        min_version: None,
        install_hint: "npm install -g pnpm",
        description: "pnpm package manager",
        optional: false,
    },
    ToolSpec {
        name: "python3",
        version_args: &["--version"],
        min_version: Some("3.10.0"),
        install_hint: "https://python.org/",
        description: "Python 3 runtime",
        optional: false,
    },
    ToolSpec {
        name: "pip",
        version_args: &["--version"],
        min_version: Some("20.0.0"),
        install_hint: "python3 -m ensurepip",
        description: "Python package manager",
        optional: false,
    },
    ToolSpec {
        name: "django-admin",
        version_args: &["--version"],
        min_version: None,
        install_hint: "pip install django",
        description: "Django CLI",
        optional: false,
    },
    ToolSpec {
        name: "composer",
        version_args: &["--version"],
        min_version: None,
        install_hint: "https://getcomposer.org/",
        description: "PHP dependency manager",
        optional: false,
    },
    ToolSpec {
        name: "php",
        version_args: &["--version"],
        min_version: Some("8.1.0"),
        install_hint: "https://php.net/",
        description: "PHP runtime",
        optional: false,
    },
    ToolSpec {
        name: "go",
        version_args: &["version"],
        min_version: Some("1.20.0"),
        install_hint: "https://go.dev/doc/install",
        description: "Go toolchain",
        optional: false,
    },
    ToolSpec {
        name: "cargo",
        version_args: &["--version"],
        min_version: None,
        install_hint: "https://rustup.rs/",
        description: "Rust/Cargo",
        optional: false,
    },
    ToolSpec {
        name: "ruby",
        version_args: &["--version"],
        min_version: Some("3.0.0"),
        install_hint: "https://ruby-lang.org/",
        description: "Ruby runtime",
        optional: false,
    },
    ToolSpec {
        name: "rails",
        version_args: &["--version"],
        min_version: None,
        install_hint: "gem install rails",
        description: "Rails CLI",
        optional: false,
    },
    ToolSpec {
        name: "git",
        version_args: &["--version"],
        min_version: None,
        install_hint: "https://git-scm.com/",
        description: "Git version control",
        optional: true,
    },
];

/// Look up a tool by name.
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    KNOWN_TOOLS.iter().find(|t| t.name == name)
}

/// Whether `name` is a known tool.
pub fn is_known_tool(name: &str) -> bool {
    find_tool(name).is_some()
}
