//! Configuration for test command runs.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for executing test commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Shell used to interpret commands.
    pub shell: String,
    /// Maximum execution time per command.
    pub timeout: Duration,
    /// Extra environment variables for the command.
    pub env_vars: Vec<(String, String)>,
    /// Working directory for the command (inherited when unset).
    pub working_dir: Option<PathBuf>,
    /// Treat marker-free output as a failure.
    pub strict: bool,
}

impl RunConfig {
    /// Creates a run configuration with defaults.
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
            timeout: Duration::from_secs(300), // 5 minutes default
            env_vars: Vec::new(),
            working_dir: None,
            strict: false,
        }
    }

    /// Sets the shell.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Sets the per-command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Sets the working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Enables or disables the strict marker policy.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new();
        assert_eq!(config.shell, "sh");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert!(config.env_vars.is_empty());
        assert!(config.working_dir.is_none());
        assert!(!config.strict);
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new()
            .with_shell("bash")
            .with_timeout(Duration::from_secs(60))
            .with_env("AX_TC", "busybox")
            .with_working_dir("/tmp")
            .with_strict(true);

        assert_eq!(config.shell, "bash");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.env_vars.len(), 1);
        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp")));
        assert!(config.strict);
    }
}
