//! Built-in dependency check.
//!
//! Confirms that each required module can be imported by the environment's
//! Python interpreter, then renders a report with install hints for the
//! missing ones.

pub mod probe;
pub mod report;

pub use probe::{find_interpreter, DependencyChecker, ImportStatus, PackageCheck};
pub use report::CheckReport;
