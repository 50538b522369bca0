//! Step sequence orchestration.

pub mod sequence;

pub use sequence::{RunOutcome, RunProgress, SequenceRunner};
