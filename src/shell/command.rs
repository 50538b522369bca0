//! External command execution.
//!
//! Commands are spawned directly (no intermediate shell) with an explicit
//! environment map. Exit statuses are normalized the way a POSIX shell
//! reports them, so a missing program yields 127 and a signal-killed child
//! yields `128 + signal`.

use crate::error::{PyprepError, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// A complete child environment. Keys and values are kept as the OS hands
/// them over, so variables that are not valid UTF-8 pass through intact.
pub type EnvVars = HashMap<OsString, OsString>;

/// Exit status reported when the program cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit status reported when the program exists but cannot be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Normalized exit status.
    pub exit_code: i32,

    /// Standard output (empty unless captured), lossily decoded.
    pub stdout: String,

    /// Standard output bytes exactly as captured.
    pub stdout_raw: Vec<u8>,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Set when the program could not be started at all.
    pub spawn_error: Option<String>,
}

impl CommandResult {
    fn finished(exit_code: i32, stdout_raw: Vec<u8>, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code,
            stdout: String::from_utf8_lossy(&stdout_raw).into_owned(),
            stdout_raw,
            stderr,
            duration,
            success: exit_code == 0,
            spawn_error: None,
        }
    }

    /// Result for a program that could not be started.
    pub fn not_started(exit_code: i32, reason: String) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stdout_raw: Vec::new(),
            stderr: String::new(),
            duration: Duration::ZERO,
            success: false,
            spawn_error: Some(reason),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Complete environment for the child. When set, the child does not
    /// inherit anything from this process's environment.
    pub env: Option<EnvVars>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Render a program and its arguments for display.
pub fn format_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![quote(program)];
    parts.extend(args.iter().map(|a| quote(a)));
    parts.join(" ")
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:+,@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Map a finished process status to a shell-style exit code.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Execute `program` with `args`, waiting for it to finish.
///
/// A program that cannot be found or executed is not an error: it yields a
/// [`CommandResult`] with status 127 or 126 and `spawn_error` set. Other
/// spawn failures are returned as [`PyprepError::CommandFailed`].
pub fn execute(program: &Path, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let rendered = format_command(&program.to_string_lossy(), args);
    tracing::debug!("Executing: {}", rendered);

    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    if let Some(env) = &options.env {
        cmd.env_clear();
        cmd.envs(env);
    }

    cmd.stdin(Stdio::inherit());
    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => {
            let code = match e.kind() {
                std::io::ErrorKind::NotFound => EXIT_NOT_FOUND,
                std::io::ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
                _ => {
                    tracing::debug!("Spawn of {} failed: {}", rendered, e);
                    return Err(PyprepError::CommandFailed {
                        command: rendered,
                        code: None,
                    });
                }
            };
            tracing::debug!("{} could not start: {} (status {})", rendered, e, code);
            return Ok(CommandResult::not_started(code, e.to_string()));
        }
    };

    let duration = start.elapsed();
    let exit_code = exit_code_of(output.status);
    tracing::debug!("{} exited with {} after {:?}", rendered, exit_code, duration);

    let stdout = if options.capture_stdout {
        output.stdout
    } else {
        Vec::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    Ok(CommandResult::finished(exit_code, stdout, stderr, duration))
}

/// Execute a command capturing all output.
pub fn execute_quiet(
    program: &Path,
    args: &[String],
    env: Option<&EnvVars>,
    cwd: Option<&Path>,
) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        env: env.cloned(),
        capture_stdout: true,
        capture_stderr: true,
    };
    execute(program, args, &options)
}
