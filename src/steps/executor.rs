//! Step execution.
//!
//! Every step runs to completion and reports an exit status; failures of
//! the external tools are results, not errors. Only pyprep's own failures
//! (a command that cannot be spawned for reasons other than not-found or
//! permission) propagate as [`PyprepError`](crate::error::PyprepError).

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::environment::{ActivatedEnv, VirtualEnv};
use crate::error::{PyprepError, Result};
use crate::shell::{execute, CommandOptions, CommandResult, EnvVars, EXIT_NOT_FOUND};
use crate::ui::UserInterface;

use super::plan::{script_invocation, Step};

/// Status of a finished step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step exited zero.
    Completed,

    /// Step exited non-zero.
    Failed,

    /// Step was only previewed.
    DryRun,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::DryRun => "dry-run",
        };
        write!(f, "{}", s)
    }
}

/// Result of executing a step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Step name.
    pub name: String,

    /// Shell-style exit status.
    pub exit_code: i32,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the step was only previewed.
    pub dry_run: bool,
}

impl StepResult {
    fn new(name: &str, exit_code: i32, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            exit_code,
            duration,
            dry_run: false,
        }
    }

    fn previewed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            exit_code: 0,
            duration: Duration::ZERO,
            dry_run: true,
        }
    }

    /// Whether the step exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get the step status.
    pub fn status(&self) -> StepStatus {
        if self.dry_run {
            StepStatus::DryRun
        } else if self.success() {
            StepStatus::Completed
        } else {
            StepStatus::Failed
        }
    }
}

/// State carried from one step to the next.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Directory all relative paths resolve against.
    pub project_root: PathBuf,

    /// Environment subprocesses run with. Replaced by a successful activation.
    pub env: ActivatedEnv,

    /// Preview commands without running them.
    pub dry_run: bool,
}

impl StepContext {
    /// Start from the given base variables with no isolation.
    pub fn new(project_root: &Path, base_env: EnvVars) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            env: ActivatedEnv::ambient(base_env),
            dry_run: false,
        }
    }

    /// Start from this process's environment, byte for byte.
    pub fn from_process(project_root: &Path) -> Self {
        Self::new(project_root, std::env::vars_os().collect())
    }

    fn command_options(&self) -> CommandOptions {
        CommandOptions {
            cwd: Some(self.project_root.clone()),
            env: Some(self.env.vars().clone()),
            capture_stdout: false,
            capture_stderr: false,
        }
    }
}

/// Execute one step.
pub fn execute_step(
    step: &Step,
    ctx: &mut StepContext,
    ui: &mut dyn UserInterface,
) -> Result<StepResult> {
    let name = step.name();

    if ctx.dry_run {
        match step {
            Step::Announce { message } => ui.message(message),
            _ => ui.show_command(&step.to_string()),
        }
        return Ok(StepResult::previewed(name));
    }

    let start = Instant::now();

    let exit_code = match step {
        Step::Announce { message } => {
            ui.message(message);
            0
        }
        Step::Activate { path, mode } => activate(path, *mode, ctx, ui)?,
        Step::Install { program, args } => {
            if ui.output_mode().shows_commands() {
                ui.show_command(&step.to_string());
            }
            run_program(program, args, ctx, ui)?
        }
        Step::Verify {
            script,
            interpreter,
        } => {
            if ui.output_mode().shows_commands() {
                ui.show_command(&step.to_string());
            }
            verify(script, interpreter.as_deref(), ctx, ui)?
        }
    };

    let result = StepResult::new(name, exit_code, start.elapsed());
    tracing::debug!("Step {} finished: {}", name, result.status());
    Ok(result)
}

fn activate(
    path: &Path,
    mode: crate::config::ActivationMode,
    ctx: &mut StepContext,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let venv = match VirtualEnv::locate(&ctx.project_root, path) {
        Ok(venv) => venv,
        Err(PyprepError::EnvironmentNotFound { path }) => {
            ui.warning(&format!(
                "{}: No such file or directory; continuing without an isolated environment",
                path.display()
            ));
            return Ok(1);
        }
        Err(e) => return Err(e),
    };

    let base = ctx.env.vars().clone();
    match ActivatedEnv::activate(&venv, mode, base, &ctx.project_root) {
        Ok(env) => {
            ctx.env = env;
            Ok(0)
        }
        Err(PyprepError::ActivationFailed { path, message }) => {
            ui.warning(&format!("{}: {}", path.display(), message));
            Ok(1)
        }
        Err(e) => Err(e),
    }
}

fn run_program(
    program: &str,
    args: &[String],
    ctx: &StepContext,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let Some(resolved) = ctx.env.resolve_program(program, &ctx.project_root) else {
        ui.error(&format!("{}: command not found", program));
        return Ok(EXIT_NOT_FOUND);
    };

    let result = execute(&resolved, args, &ctx.command_options())?;
    report_spawn_error(program, &result, ui);
    Ok(result.exit_code)
}

fn verify(
    script: &Path,
    interpreter: Option<&str>,
    ctx: &StepContext,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let script_arg = script.display().to_string();

    match interpreter {
        Some(interp) => run_program(interp, &[script_arg], ctx, ui),
        None => {
            let invocation = script_invocation(script);
            let full = ctx.project_root.join(&invocation);
            if !full.exists() {
                ui.error(&format!("{}: command not found", invocation.display()));
                return Ok(EXIT_NOT_FOUND);
            }
            let result = execute(&full, &[], &ctx.command_options())?;
            report_spawn_error(&invocation.display().to_string(), &result, ui);
            Ok(result.exit_code)
        }
    }
}

fn report_spawn_error(program: &str, result: &CommandResult, ui: &mut dyn UserInterface) {
    if let Some(reason) = &result.spawn_error {
        ui.error(&format!("{}: {}", program, reason));
    }
}
