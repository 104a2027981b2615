//! Runs one stack's generator.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScaffoldError};
use crate::install::outcome::InstallationOutcome;
use crate::shell::{CommandResult, CommandSpec, Executor, StdioMode};
use crate::stacks::{Generator, PostInstallStep, StackDescriptor};
use crate::ui::UserInterface;

/// Captured generators are killed after this long.
pub const GENERATOR_TIMEOUT: Duration = Duration::from_secs(300);

/// Dependency installs run by `scaffold init` are killed after this long.
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Captured diagnostics are cut to this many characters.
pub const DIAGNOSTIC_LIMIT: usize = 500;

/// Produces a project directory for one stack.
pub struct CommandRunner<'a> {
    executor: &'a dyn Executor,
}

impl<'a> CommandRunner<'a> {
    /// Create a runner.
    pub fn new(executor: &'a dyn Executor) -> Self {
        Self { executor }
    }

    /// Generate `stack` as `parent/dir_name`, using `project_name` for `{name}`.
    ///
    /// Generator failures come back as an unsuccessful outcome. Only an
    /// interrupted child (or an unexpected internal error) is an `Err`.
    pub fn install(
        &self,
        stack: &StackDescriptor,
        dir_name: &str,
        parent: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallationOutcome> {
        let target = parent.join(dir_name);

        match stack.generator {
            Generator::Custom(installer) => {
                let mut spinner =
                    ui.start_spinner(&format!("Creating {} project...", stack.display_name));
                match installer(&target, dir_name) {
                    Ok(()) => {
                        spinner.finish_success(&format!("Created {}", stack.display_name));
                        Ok(InstallationOutcome::succeeded(stack.id, &target))
                    }
                    Err(e) => {
                        spinner.finish_error(&format!("Failed to create {}", stack.display_name));
                        Ok(InstallationOutcome::failed(stack.id, &target, e.to_string()))
                    }
                }
            }
            Generator::Command(_) => self.run_generator(stack, dir_name, parent, &target, ui),
        }
    }

    fn run_generator(
        &self,
        stack: &StackDescriptor,
        dir_name: &str,
        parent: &Path,
        target: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallationOutcome> {
        let argv = stack.command_line(dir_name).unwrap_or_default();
        let Some((program, args)) = argv.split_first() else {
            return Ok(InstallationOutcome::failed(
                stack.id,
                target,
                "empty generator command",
            ));
        };

        let mut spec = CommandSpec::new(program.as_str())
            .args(args.iter().cloned())
            .cwd(parent);
        let command = spec.display();
        tracing::debug!("Running generator for {}: {}", stack.id, command);

        let executed = if stack.interactive {
            spec = spec.stdio(StdioMode::Inherit);
            ui.message(&format!("→ Creating {} project...", stack.display_name));
            ui.message(&format!("$ {}", command));
            self.executor.execute(&spec)
        } else {
            spec = spec.stdio(StdioMode::Capture).timeout(GENERATOR_TIMEOUT);
            let mut spinner =
                ui.start_spinner(&format!("Creating {} project...", stack.display_name));
            let executed = self.executor.execute(&spec);
            match &executed {
                Ok(result) if result.success => spinner.finish_clear(),
                _ => spinner.finish_error(&format!("Failed to create {}", stack.display_name)),
            }
            executed
        };

        let result = match executed {
            Ok(result) => result,
            Err(ScaffoldError::LaunchFailed { source, .. }) => {
                let message = source.to_string();
                ui.show_error_block(&command, &message, Some(&launch_hint(stack)));
                return Ok(InstallationOutcome::failed(stack.id, target, message));
            }
            Err(e) => return Err(e),
        };

        if result.interrupted {
            return Err(ScaffoldError::Interrupted { command });
        }

        if !result.success {
            let message = failure_message(&result, stack.interactive);
            if !stack.interactive {
                ui.show_error_block(&command, &message, None);
            }
            return Ok(InstallationOutcome::failed(stack.id, target, message));
        }

        if ui.output_mode().shows_command_output() && !result.stdout.trim().is_empty() {
            ui.message(result.stdout.trim_end());
        }

        if !target.is_dir() {
            let message = format!("generator did not create {}", target.display());
            ui.error(&message);
            return Ok(InstallationOutcome::failed(stack.id, target, message));
        }

        ui.success(&format!("Created {}", stack.display_name));
        Ok(InstallationOutcome::succeeded(stack.id, target))
    }

    /// Run one captured setup command behind a spinner.
    ///
    /// Returns whether it succeeded. Failures and launch errors are shown
    /// to the user and come back as `false`; only an interrupted child is
    /// an `Err`.
    pub fn run_step(
        &self,
        spec: CommandSpec,
        description: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        let spec = spec.stdio(StdioMode::Capture).timeout(INSTALL_TIMEOUT);
        let command = spec.display();
        tracing::debug!("Running setup step: {}", command);

        let mut spinner = ui.start_spinner(&format!("{}...", description));
        let result = match self.executor.execute(&spec) {
            Ok(result) => result,
            Err(ScaffoldError::LaunchFailed { source, .. }) => {
                spinner.finish_error(&format!("{} failed", description));
                let hint = format!("Check that {} is installed and on your PATH", spec.program_name());
                ui.show_error_block(&command, &source.to_string(), Some(&hint));
                return Ok(false);
            }
            Err(e) => {
                spinner.finish_error(&format!("{} failed", description));
                return Err(e);
            }
        };

        if result.interrupted {
            spinner.finish_error(&format!("{} interrupted", description));
            return Err(ScaffoldError::Interrupted { command });
        }
        if !result.success {
            spinner.finish_error(&format!("{} failed", description));
            let message = if result.timed_out {
                format!("timed out after {}s", INSTALL_TIMEOUT.as_secs())
            } else {
                result.diagnostic(DIAGNOSTIC_LIMIT)
            };
            ui.show_error_block(&command, &message, None);
            return Ok(false);
        }

        spinner.finish_success(description);
        if ui.output_mode().shows_command_output() && !result.stdout.trim().is_empty() {
            ui.message(result.stdout.trim_end());
        }
        Ok(true)
    }
}

/// Write a stack's post-install files into `target`.
///
/// Files that already exist are left untouched. Write failures are
/// reported as warnings; they never fail the installation.
pub fn run_post_install(
    stack: &StackDescriptor,
    target: &Path,
    project_name: &str,
    ui: &mut dyn UserInterface,
) {
    for step in stack.post_install {
        match step {
            PostInstallStep::WriteFile { path, contents } => {
                let dest = target.join(path);
                if dest.exists() {
                    tracing::debug!("Keeping existing {}", dest.display());
                    continue;
                }
                let written = dest
                    .parent()
                    .map_or(Ok(()), fs::create_dir_all)
                    .and_then(|()| fs::write(&dest, contents.replace("{name}", project_name)));
                match written {
                    Ok(()) => tracing::debug!("Wrote {}", dest.display()),
                    Err(e) => ui.warning(&format!("Could not write {}: {}", path, e)),
                }
            }
        }
    }
}

fn failure_message(result: &CommandResult, inherited: bool) -> String {
    if result.timed_out {
        return format!("timed out after {}s", GENERATOR_TIMEOUT.as_secs());
    }
    if inherited {
        return match result.exit_code {
            Some(code) => format!("exited with code {}", code),
            None => "exited abnormally".to_string(),
        };
    }
    result.diagnostic(DIAGNOSTIC_LIMIT)
}

fn launch_hint(stack: &StackDescriptor) -> String {
    format!(
        "Check that {} is installed and on your PATH",
        stack.requires.join(", ")
    )
}
