//! Error types for runcheck operations.
//!
//! The classifier itself is total and cannot fail; errors here cover the
//! glue around it: locating and reading the CI environment file. The
//! command runner keeps its own error type next to the executor.

use thiserror::Error;

/// Errors that can occur while reading the CI environment file.
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("Environment file not found: {0} is not set")]
    NotConfigured(String),

    #[error("Failed to read environment file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
