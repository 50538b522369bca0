//! Sequential execution of a [`Plan`] under a [`FailurePolicy`].

use std::time::{Duration, Instant};

use crate::config::FailurePolicy;
use crate::error::Result;
use crate::steps::{execute_step, Plan, StepContext, StepResult};
use crate::ui::UserInterface;

/// Progress events emitted while a plan runs.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to start.
    StepStarting {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A step finished.
    StepFinished {
        name: &'a str,
        result: &'a StepResult,
    },
    /// The halt policy stopped the run after a failing step.
    Halted { name: &'a str, exit_code: i32 },
}

/// Result of running a plan.
#[derive(Debug)]
pub struct RunOutcome {
    /// Results of the steps that ran, in order.
    pub steps: Vec<StepResult>,
    /// Whether a failing step stopped the run early.
    pub halted: bool,
    /// Total duration.
    pub duration: Duration,
}

impl RunOutcome {
    /// Exit status of the last step that ran (0 when nothing ran).
    pub fn exit_code(&self) -> i32 {
        self.steps.last().map(|s| s.exit_code).unwrap_or(0)
    }

    /// Whether every step that ran exited zero.
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(StepResult::success)
    }

    /// Steps that exited non-zero.
    pub fn failed_steps(&self) -> Vec<&StepResult> {
        self.steps.iter().filter(|s| !s.success()).collect()
    }
}

/// Runs the steps of a plan one after another.
pub struct SequenceRunner<'a> {
    plan: &'a Plan,
    policy: FailurePolicy,
}

impl<'a> SequenceRunner<'a> {
    /// Create a runner for `plan`.
    pub fn new(plan: &'a Plan, policy: FailurePolicy) -> Self {
        Self { plan, policy }
    }

    /// Run every step, ignoring progress events.
    pub fn run(&self, ctx: &mut StepContext, ui: &mut dyn UserInterface) -> Result<RunOutcome> {
        self.run_with_progress(ctx, ui, |_| {})
    }

    /// Run every step, reporting progress through `on_progress`.
    ///
    /// With [`FailurePolicy::Continue`] all steps run regardless of earlier
    /// failures. With [`FailurePolicy::Halt`] the run stops after the first
    /// step that exits non-zero.
    pub fn run_with_progress<F>(
        &self,
        ctx: &mut StepContext,
        ui: &mut dyn UserInterface,
        mut on_progress: F,
    ) -> Result<RunOutcome>
    where
        F: FnMut(RunProgress<'_>),
    {
        let start = Instant::now();
        let total = self.plan.len();
        let mut steps = Vec::with_capacity(total);
        let mut halted = false;

        for (index, step) in self.plan.steps().iter().enumerate() {
            on_progress(RunProgress::StepStarting {
                name: step.name(),
                index,
                total,
            });

            let result = execute_step(step, ctx, ui)?;
            on_progress(RunProgress::StepFinished {
                name: step.name(),
                result: &result,
            });

            let failed = !result.success();
            let exit_code = result.exit_code;
            steps.push(result);

            if failed && self.policy == FailurePolicy::Halt {
                tracing::debug!("Halting after {} (exit {})", step.name(), exit_code);
                on_progress(RunProgress::Halted {
                    name: step.name(),
                    exit_code,
                });
                halted = true;
                break;
            }
        }

        Ok(RunOutcome {
            steps,
            halted,
            duration: start.elapsed(),
        })
    }
}
