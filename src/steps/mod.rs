//! Step definitions and execution.
//!
//! - [`Plan`] - The ordered steps of a run, built from configuration
//! - [`Step`] - One step: announce, activate, install or verify
//! - [`execute_step`] - Run one step against a [`StepContext`]
//!
//! # Example
//!
//! ```no_run
//! use pyprep::config::PyprepConfig;
//! use pyprep::steps::{execute_step, Plan, StepContext};
//! use pyprep::ui::MockUI;
//! use std::path::Path;
//!
//! let plan = Plan::from_config(&PyprepConfig::default());
//! let mut ctx = StepContext::from_process(Path::new("."));
//! let mut ui = MockUI::new();
//!
//! for step in plan.steps() {
//!     let result = execute_step(step, &mut ctx, &mut ui).unwrap();
//!     println!("{} -> {}", result.name, result.exit_code);
//! }
//! ```

pub mod executor;
pub mod plan;

pub use executor::{execute_step, StepContext, StepResult, StepStatus};
pub use plan::{script_invocation, Plan, Step};
