//! pyprep - Prepare a Python project's environment.
//!
//! pyprep activates a project's virtual environment, installs the required
//! packages into it and runs the project's verification script. Activation
//! is scoped: the activated variables are computed as an explicit map and
//! handed to each subprocess, so nothing leaks back into the caller's shell.
//!
//! # Modules
//!
//! - [`check`] - Built-in import check for required packages
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`environment`] - Virtual environment discovery and scoped activation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Sequential execution under a failure policy
//! - [`shell`] - Subprocess execution and exit status mapping
//! - [`steps`] - The step plan and per-step execution
//! - [`ui`] - Status messages, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use pyprep::config::PyprepConfig;
//! use pyprep::steps::Plan;
//!
//! let plan = Plan::from_config(&PyprepConfig::default());
//! let rendered: Vec<String> = plan.steps().iter().map(|s| s.to_string()).collect();
//! assert_eq!(rendered[2], "pip install streamlit pandas openpyxl");
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{PyprepError, Result};
