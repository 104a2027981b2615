//! Mock executor for testing.
//!
//! `MockExecutor` implements [`Executor`] without spawning anything. It
//! records every [`CommandSpec`] it receives and answers with canned
//! results.
//!
//! Responses are keyed by program name, optionally followed by the first
//! argument: a response for `"git commit"` wins over one for `"git"`.
//! Programs given as absolute paths match on their file name.
//!
//! # Example
//!
//! ```
//! use scaffold::shell::{CommandSpec, Executor, MockExecutor};
//!
//! let exec = MockExecutor::new();
//! exec.respond("node", "v20.11.0\n");
//! exec.fail("git commit", 128, "Please tell me who you are");
//!
//! let out = exec.execute(&CommandSpec::new("/usr/bin/node").arg("--version")).unwrap();
//! assert!(out.stdout.contains("20.11.0"));
//! assert!(exec.was_spawned("node"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use crate::error::{Result, ScaffoldError};

use super::command::{CommandResult, CommandSpec, Executor};

type SpawnEffect = Box<dyn Fn(&CommandSpec)>;

#[derive(Debug, Clone)]
enum MockResponse {
    Finished(CommandResult),
    LaunchError(io::ErrorKind),
}

/// Executor that records commands instead of running them.
#[derive(Default)]
pub struct MockExecutor {
    calls: RefCell<Vec<CommandSpec>>,
    responses: RefCell<HashMap<String, MockResponse>>,
    effects: RefCell<HashMap<String, SpawnEffect>>,
}

impl MockExecutor {
    /// Create a mock that answers every command with success and no output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed with the given stdout.
    pub fn respond(&self, key: &str, stdout: &str) {
        self.responses.borrow_mut().insert(
            key.to_string(),
            MockResponse::Finished(CommandResult::success(stdout)),
        );
    }

    /// Exit with a non-zero code and the given stderr.
    pub fn fail(&self, key: &str, code: i32, stderr: &str) {
        self.responses.borrow_mut().insert(
            key.to_string(),
            MockResponse::Finished(CommandResult::failure(Some(code), stderr)),
        );
    }

    /// Behave as if the child was killed by a signal.
    pub fn interrupt(&self, key: &str) {
        self.responses.borrow_mut().insert(
            key.to_string(),
            MockResponse::Finished(CommandResult::interrupted()),
        );
    }

    /// Fail to launch, as if the program were not installed.
    pub fn missing(&self, key: &str) {
        self.responses
            .borrow_mut()
            .insert(key.to_string(), MockResponse::LaunchError(io::ErrorKind::NotFound));
    }

    /// Run a side effect whenever a matching command is spawned.
    ///
    /// Useful for imitating a generator that creates its project directory.
    pub fn on_spawn<F>(&self, key: &str, effect: F)
    where
        F: Fn(&CommandSpec) + 'static,
    {
        self.effects
            .borrow_mut()
            .insert(key.to_string(), Box::new(effect));
    }

    /// All commands received, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Number of commands received.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Whether any command matching `key` was received.
    pub fn was_spawned(&self, key: &str) -> bool {
        self.calls.borrow().iter().any(|spec| matches_key(spec, key))
    }

    fn lookup<T: Clone>(map: &HashMap<String, T>, spec: &CommandSpec) -> Option<T> {
        if let Some(first) = spec.args.first() {
            let specific = format!("{} {}", spec.program_name(), first);
            if let Some(found) = map.get(&specific) {
                return Some(found.clone());
            }
        }
        map.get(spec.program_name()).cloned()
    }
}

impl std::fmt::Debug for MockExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockExecutor")
            .field("calls", &self.calls.borrow().len())
            .field("responses", &self.responses.borrow().len())
            .finish()
    }
}

fn matches_key(spec: &CommandSpec, key: &str) -> bool {
    let mut parts = key.splitn(2, ' ');
    let program = parts.next().unwrap_or_default();
    if spec.program_name() != program {
        return false;
    }
    match parts.next() {
        Some(first) => spec.args.first().map(String::as_str) == Some(first),
        None => true,
    }
}

impl Executor for MockExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());

        {
            let effects = self.effects.borrow();
            let effect = spec
                .args
                .first()
                .and_then(|first| effects.get(&format!("{} {}", spec.program_name(), first)))
                .or_else(|| effects.get(spec.program_name()));
            if let Some(effect) = effect {
                effect(spec);
            }
        }

        match Self::lookup(&self.responses.borrow(), spec) {
            Some(MockResponse::Finished(result)) => Ok(result),
            Some(MockResponse::LaunchError(kind)) => Err(ScaffoldError::LaunchFailed {
                command: spec.display(),
                source: io::Error::new(kind, "No such file or directory"),
            }),
            None => Ok(CommandResult::success("")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn default_response_is_success() {
        let exec = MockExecutor::new();
        let result = exec.execute(&CommandSpec::new("npm").arg("--version")).unwrap();
        assert!(result.success);
        assert_eq!(exec.call_count(), 1);
    }

    #[test]
    fn specific_key_wins_over_program_key() {
        let exec = MockExecutor::new();
        exec.respond("git", "git version 2.43.0");
        exec.fail("git commit", 1, "nothing to commit");

        let version = exec.execute(&CommandSpec::new("git").arg("--version")).unwrap();
        assert!(version.success);

        let commit = exec
            .execute(&CommandSpec::new("git").args(["commit", "-m", "x"]))
            .unwrap();
        assert!(!commit.success);
        assert_eq!(commit.exit_code, Some(1));
    }

    #[test]
    fn missing_program_fails_to_launch() {
        let exec = MockExecutor::new();
        exec.missing("npx");
        let err = exec
            .execute(&CommandSpec::new("npx").arg("create-next-app@latest"))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::LaunchFailed { .. }));
        assert!(exec.was_spawned("npx"));
    }

    #[test]
    fn absolute_program_paths_match_by_file_name() {
        let exec = MockExecutor::new();
        exec.respond("python3", "Python 3.12.1");
        let out = exec
            .execute(&CommandSpec::new("/opt/bin/python3").arg("--version"))
            .unwrap();
        assert_eq!(out.stdout, "Python 3.12.1");
    }

    #[test]
    fn was_spawned_checks_first_argument() {
        let exec = MockExecutor::new();
        exec.execute(&CommandSpec::new("git").arg("init")).unwrap();
        assert!(exec.was_spawned("git"));
        assert!(exec.was_spawned("git init"));
        assert!(!exec.was_spawned("git commit"));
    }

    #[test]
    fn on_spawn_runs_effect() {
        let exec = MockExecutor::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        exec.on_spawn("npm", move |spec| sink.borrow_mut().push(spec.display()));

        exec.execute(&CommandSpec::new("npm").args(["create", "vite@latest", "app"]))
            .unwrap();
        assert_eq!(seen.borrow().as_slice(), ["npm create vite@latest app"]);
    }
}
