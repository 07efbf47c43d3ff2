//! Command-line interface for runcheck.
//!
//! Provides commands for classifying captured runs, executing commands
//! and suites, and inspecting the CI environment file.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands};
