//! Test command execution and suite running.
//!
//! The runner spawns test commands under a shell, captures their output,
//! and hands exit code plus captured text to the classifier:
//!
//! ```text
//! command → shell → captured stdout/stderr → classifier → CaseResult
//! ```
//!
//! Suites run a list of commands in sequence and aggregate the verdicts
//! into a [`SuiteSummary`].

mod config;
mod executor;
mod result;
mod suite;

pub use config::RunConfig;
pub use executor::{CommandRunner, RunnerError};
pub use result::CaseResult;
pub use suite::{load_suite, SuiteSummary};
