//! Command executor - runs test commands and classifies their output.

use std::process::Stdio;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::classifier::classify;

use super::config::RunConfig;
use super::result::CaseResult;
use super::suite::SuiteSummary;

/// Runs test commands according to a [`RunConfig`].
pub struct CommandRunner {
    /// Configuration shared by every case of this runner.
    config: RunConfig,
}

impl CommandRunner {
    /// Creates a new runner with the given configuration.
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Runs a single command under the shell and classifies its captured
    /// output. Stdout and stderr are both scanned for marker lines.
    pub async fn run(&self, command: &str) -> Result<CaseResult, RunnerError> {
        info!("Running case: {}", command);
        let start = Instant::now();

        let mut cmd = tokio::process::Command::new(&self.config.shell);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        for (key, value) in &self.config.env_vars {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        let output = tokio::time::timeout(self.config.timeout, cmd.output())
            .await
            .map_err(|_| RunnerError::Timeout(self.config.timeout))?
            .map_err(|source| RunnerError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let duration = start.elapsed();
        // No exit code means the process was killed by a signal.
        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let mut verdict = classify(exit_code, &combined_output(&stdout, &stderr));
        if self.config.strict {
            verdict = verdict.strict();
        }
        debug!("Case finished in {:?}: {}", duration, verdict.message);

        Ok(CaseResult::new(command, exit_code, duration, verdict)
            .with_stdout(stdout)
            .with_stderr(stderr))
    }

    /// Runs every command of a suite in sequence. A per-case timeout becomes
    /// a failed result instead of aborting the remaining cases.
    pub async fn run_suite(&self, commands: &[String]) -> Result<SuiteSummary, RunnerError> {
        let mut results = Vec::with_capacity(commands.len());

        for command in commands {
            let result = match self.run(command).await {
                Ok(result) => result,
                Err(RunnerError::Timeout(timeout)) => {
                    warn!("Case timed out after {:?}: {}", timeout, command);
                    CaseResult::timed_out(command, timeout)
                }
                Err(e) => return Err(e),
            };
            results.push(result);
        }

        let summary = SuiteSummary::from_results(results);
        info!(
            "Suite finished: {}/{} cases passed",
            summary.passed, summary.total
        );
        Ok(summary)
    }
}

/// Joins stdout and stderr into the text the classifier scans.
fn combined_output(stdout: &str, stderr: &str) -> String {
    if stderr.is_empty() {
        return stdout.to_string();
    }
    let mut combined = stdout.to_string();
    if !combined.is_empty() && !combined.ends_with('\n') {
        combined.push('\n');
    }
    combined.push_str(stderr);
    combined
}

/// Error types for the runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Suite file contains no commands: {0}")]
    EmptySuite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
