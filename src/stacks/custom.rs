//! Built-in installers.
//!
//! Stacks without an official generator get a small file set embedded from
//! `templates/<stack>/`. `{{name}}` in any file is replaced by the project
//! name. Two file-name conventions keep the template tree inert inside this
//! repository: `gitignore` is written as `.gitignore`, and a `.tmpl` suffix
//! is dropped (`Cargo.toml.tmpl` becomes `Cargo.toml`).

use include_dir::{include_dir, Dir, File};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Placeholder replaced by the project name.
const NAME_PLACEHOLDER: &str = "{{name}}";

/// Names of all embedded file sets.
pub fn template_names() -> Vec<&'static str> {
    TEMPLATES_DIR
        .dirs()
        .filter_map(|d| d.path().to_str())
        .collect()
}

/// Write the embedded file set `template` into `target`.
///
/// Creates `target` (and parents) if needed and returns the paths written.
pub fn write_template(template: &str, target: &Path, project_name: &str) -> Result<Vec<PathBuf>> {
    let dir = TEMPLATES_DIR
        .get_dir(template)
        .ok_or_else(|| ScaffoldError::Other(anyhow::anyhow!("no built-in files for {}", template)))?;

    fs::create_dir_all(target)?;

    let mut files = Vec::new();
    collect_files(dir, &mut files);

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let relative = file
            .path()
            .strip_prefix(template)
            .map_err(|e| ScaffoldError::Other(e.into()))?;
        let dest = target.join(output_path(relative));

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        match file.contents_utf8() {
            Some(text) => fs::write(&dest, text.replace(NAME_PLACEHOLDER, project_name))?,
            None => fs::write(&dest, file.contents())?,
        }
        tracing::debug!("Wrote {}", dest.display());
        written.push(dest);
    }

    Ok(written)
}

fn collect_files<'a>(dir: &'a Dir<'a>, out: &mut Vec<&'a File<'a>>) {
    out.extend(dir.files());
    for sub in dir.dirs() {
        collect_files(sub, out);
    }
}

/// Map a template-relative path to the file name written to disk.
fn output_path(relative: &Path) -> PathBuf {
    let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
        return relative.to_path_buf();
    };

    let renamed = if file_name == "gitignore" {
        ".gitignore"
    } else {
        file_name.strip_suffix(".tmpl").unwrap_or(file_name)
    };
    relative.with_file_name(renamed)
}

macro_rules! builtin_installers {
    ($($fn_name:ident => $template:literal),* $(,)?) => {
        $(
            #[doc = concat!("Write the `", $template, "` file set.")]
            pub fn $fn_name(target: &Path, project_name: &str) -> Result<()> {
                write_template($template, target, project_name).map(|_| ())
            }
        )*
    };
}

builtin_installers! {
    fastapi => "fastapi",
    flask => "flask",
    django_drf => "django-drf",
    express_ts => "express-ts",
    go_gin => "go-gin",
    go_fiber => "go-fiber",
    go_echo => "go-echo",
    rust_axum => "rust-axum",
    rust_actix => "rust-actix",
    python_cli_typer => "python-cli-typer",
    python_cli_click => "python-cli-click",
    node_cli => "node-cli",
    node_cli_ts => "node-cli-ts",
    go_cli_cobra => "go-cli-cobra",
    rust_cli_clap => "rust-cli-clap",
}
