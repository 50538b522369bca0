//! Virtual environment discovery and scoped activation.
//!
//! - [`virtualenv`] - On-disk layout of an environment
//! - [`activation`] - Building the variable map subprocesses run with
//! - [`path`] - Executable lookup over explicit PATH entries

pub mod activation;
pub mod path;
pub mod virtualenv;

pub use activation::ActivatedEnv;
pub use path::{is_executable, resolve_program, resolve_tool_path};
pub use virtualenv::VirtualEnv;
