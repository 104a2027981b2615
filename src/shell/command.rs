//! External process execution.
//!
//! Commands are described by a [`CommandSpec`] and run through an
//! [`Executor`]. Production code uses [`SystemExecutor`]; tests swap in
//! [`MockExecutor`](super::MockExecutor) to observe what would be spawned.

use crate::error::{Result, ScaffoldError};
use crate::requirements::lookup::resolve_tool_path;
use crate::shell::platform::parse_system_path;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a captured child is polled while waiting for it to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long output readers may keep draining after a timeout kill.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Where the child's standard streams go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Share the parent's terminal so the child can prompt the user.
    Inherit,
    /// Capture stdout and stderr; stdin is closed.
    #[default]
    Capture,
}

/// A single external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: Option<PathBuf>,
    /// Stream handling.
    pub stdio: StdioMode,
    /// Kill the child after this long (captured mode only).
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    /// Create a captured command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdio: StdioMode::Capture,
            timeout: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Set the stdio mode.
    pub fn stdio(mut self, mode: StdioMode) -> Self {
        self.stdio = mode;
        self
    }

    /// Set a timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Program file name without directories (`/usr/bin/git` -> `git`).
    pub fn program_name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.program)
    }

    /// The command line as a user would type it.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Result of executing an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    /// Exit code (None if killed by a signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output (empty when inherited).
    pub stdout: String,

    /// Standard error (empty when inherited).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the child was terminated by a signal.
    pub interrupted: bool,

    /// Whether the child was killed for exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            success: true,
            ..Default::default()
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    /// Create a result for a child killed by a signal.
    pub fn interrupted() -> Self {
        Self {
            interrupted: true,
            ..Default::default()
        }
    }

    /// Best diagnostic text for a failed command.
    ///
    /// Prefers stderr, falls back to stdout, then to a description of the
    /// exit status. Captured text is cut to `limit` characters.
    pub fn diagnostic(&self, limit: usize) -> String {
        let captured = if !self.stderr.trim().is_empty() {
            self.stderr.trim()
        } else {
            self.stdout.trim()
        };

        if !captured.is_empty() {
            return truncate(captured, limit);
        }

        if self.timed_out {
            "timed out".to_string()
        } else if self.interrupted {
            "terminated by signal".to_string()
        } else {
            match self.exit_code {
                Some(code) => format!("exited with code {}", code),
                None => "exited abnormally".to_string(),
            }
        }
    }
}

/// Runs [`CommandSpec`]s.
///
/// Launch failures (program missing, permission denied) are returned as
/// [`ScaffoldError::LaunchFailed`]; any process that started produces a
/// [`CommandResult`] regardless of its exit status.
pub trait Executor {
    /// Run a command to completion.
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Executor backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult> {
        tracing::debug!("Running: {}", spec.display());
        match spec.stdio {
            StdioMode::Inherit => run_inherited(spec),
            StdioMode::Capture => run_captured(spec),
        }
    }
}

fn build_command(spec: &CommandSpec) -> Command {
    let program = resolve_program(&spec.program, &parse_system_path());
    let mut cmd = Command::new(program);
    cmd.args(&spec.args);
    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }
    cmd
}

/// Resolve a bare program name against `path_entries`.
///
/// `Command` only appends `.exe` when searching PATH on Windows, so
/// `npm.cmd` and friends are found here instead. Names with a directory
/// part, and names not found, are passed through unchanged.
pub(crate) fn resolve_program(program: &str, path_entries: &[PathBuf]) -> PathBuf {
    if !program.contains(['/', '\\']) {
        if let Some(path) = resolve_tool_path(program, path_entries) {
            tracing::debug!("Resolved {} to {}", program, path.display());
            return path;
        }
    }
    PathBuf::from(program)
}

fn launch_error(spec: &CommandSpec, source: std::io::Error) -> ScaffoldError {
    ScaffoldError::LaunchFailed {
        command: spec.display(),
        source,
    }
}

fn run_inherited(spec: &CommandSpec) -> Result<CommandResult> {
    let start = Instant::now();
    let status = build_command(spec)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| launch_error(spec, e))?;

    Ok(from_status(status, String::new(), String::new(), start.elapsed()))
}

fn run_captured(spec: &CommandSpec) -> Result<CommandResult> {
    let start = Instant::now();
    let mut cmd = build_command(spec);
    own_process_group(&mut cmd);
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| launch_error(spec, e))?;
    let _forward = ForwardInterrupt::to_group_of(&child);

    // Drain both pipes on their own threads so a chatty child cannot block
    // on a full pipe while we wait for it.
    let stdout_reader = child.stdout.take().map(|mut out| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = out.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).to_string()
        })
    });
    let stderr_reader = child.stderr.take().map(|mut err| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = err.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).to_string()
        })
    });

    let status = wait_with_timeout(&mut child, spec.timeout)?;

    // After a kill, a detached descendant may still hold the pipes open.
    let drain_deadline = status.is_none().then(|| Instant::now() + DRAIN_GRACE);
    let stdout = collect_output(stdout_reader, drain_deadline);
    let stderr = collect_output(stderr_reader, drain_deadline);

    match status {
        Some(status) => Ok(from_status(status, stdout, stderr, start.elapsed())),
        None => {
            tracing::warn!("Timed out: {}", spec.display());
            Ok(CommandResult {
                stdout,
                stderr,
                duration: start.elapsed(),
                timed_out: true,
                ..Default::default()
            })
        }
    }
}

/// Wait for the child, killing it once `timeout` elapses.
///
/// Returns `None` when the child had to be killed.
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return Ok(Some(child.wait()?));
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            kill_tree(child);
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Join a reader thread, giving up at `deadline` if one is set.
///
/// An abandoned reader is detached and whatever it read is lost.
fn collect_output(reader: Option<JoinHandle<String>>, deadline: Option<Instant>) -> String {
    let Some(handle) = reader else {
        return String::new();
    };
    if let Some(deadline) = deadline {
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                tracing::debug!("Output still open after kill; not waiting for it");
                return String::new();
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
    handle.join().unwrap_or_default()
}

/// Start captured children in their own process group so a timeout can
/// take down everything they spawned.
#[cfg(unix)]
fn own_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_cmd: &mut Command) {}

/// Group that Ctrl-C is passed on to; 0 when no captured child runs.
#[cfg(unix)]
static INTERRUPT_GROUP: std::sync::atomic::AtomicI32 = std::sync::atomic::AtomicI32::new(0);

#[cfg(unix)]
extern "C" fn forward_interrupt(signal: libc::c_int) {
    let pgid = INTERRUPT_GROUP.load(std::sync::atomic::Ordering::SeqCst);
    if pgid > 0 {
        signal_group(pgid, signal);
    }
}

#[cfg(unix)]
fn signal_group(pgid: i32, signal: libc::c_int) {
    // SAFETY: kill() is async-signal-safe and only sends a signal.
    unsafe {
        libc::kill(-pgid, signal);
    }
}

/// Passes Ctrl-C on to a captured child's process group until dropped.
///
/// The child left the terminal's foreground group, so the terminal no
/// longer signals it directly.
#[cfg(unix)]
struct ForwardInterrupt {
    previous: libc::sighandler_t,
}

#[cfg(unix)]
impl ForwardInterrupt {
    fn to_group_of(child: &Child) -> Self {
        use std::sync::atomic::Ordering;

        let pgid = i32::try_from(child.id()).unwrap_or(0);
        INTERRUPT_GROUP.store(pgid, Ordering::SeqCst);
        let handler = forward_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
        // SAFETY: the handler only reads an atomic and calls kill().
        let previous = unsafe { libc::signal(libc::SIGINT, handler) };
        Self { previous }
    }
}

#[cfg(unix)]
impl Drop for ForwardInterrupt {
    fn drop(&mut self) {
        INTERRUPT_GROUP.store(0, std::sync::atomic::Ordering::SeqCst);
        if self.previous != libc::SIG_ERR {
            // SAFETY: restores the disposition that was in place before.
            unsafe {
                libc::signal(libc::SIGINT, self.previous);
            }
        }
    }
}

#[cfg(not(unix))]
struct ForwardInterrupt;

#[cfg(not(unix))]
impl ForwardInterrupt {
    fn to_group_of(_child: &Child) -> Self {
        Self
    }
}

#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    if let Ok(pgid) = i32::try_from(child.id()) {
        signal_group(pgid, libc::SIGKILL);
    }
    let _ = child.kill();
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

fn from_status(
    status: ExitStatus,
    stdout: String,
    stderr: String,
    duration: Duration,
) -> CommandResult {
    CommandResult {
        exit_code: status.code(),
        stdout,
        stderr,
        duration,
        success: status.success(),
        interrupted: killed_by_signal(&status),
        timed_out: false,
    }
}

#[cfg(unix)]
fn killed_by_signal(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal().is_some()
}

#[cfg(not(unix))]
fn killed_by_signal(_status: &ExitStatus) -> bool {
    false
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut)
    }
}
