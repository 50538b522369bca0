//! Process execution and platform details.

pub mod command;
pub mod platform;

pub use command::{
    execute, execute_quiet, exit_code_of, format_command, CommandOptions, CommandResult,
    EnvVars, EXIT_NOT_EXECUTABLE, EXIT_NOT_FOUND,
};
pub use platform::{env_bin_dir, executable_names, is_ci, posix_shell};
