//! Results of executed test cases.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::{Outcome, Verdict};

/// Maximum captured-output length kept on a result.
const MAX_CAPTURE_LEN: usize = 10_000;

/// Result of running and classifying a single test command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// Unique identifier for this case run.
    pub case_id: String,
    /// The shell command that was executed.
    pub command: String,
    /// Exit code of the command (-1 when killed by a signal).
    pub exit_code: i32,
    /// Wall-clock duration of the run.
    pub duration: Duration,
    /// Timestamp when the run started.
    pub started_at: DateTime<Utc>,
    /// Timestamp when the run completed.
    pub completed_at: DateTime<Utc>,
    /// Captured stdout (truncated if too long).
    pub stdout_summary: String,
    /// Captured stderr (truncated if too long).
    pub stderr_summary: String,
    /// Whether the command was cut off by the timeout.
    pub timed_out: bool,
    /// Classification of the run.
    pub verdict: Verdict,
}

impl CaseResult {
    /// Creates a result for a command that ran to completion.
    pub fn new(
        command: impl Into<String>,
        exit_code: i32,
        duration: Duration,
        verdict: Verdict,
    ) -> Self {
        let now = Utc::now();
        Self {
            case_id: format!("case-{}", Uuid::new_v4()),
            command: command.into(),
            exit_code,
            duration,
            started_at: now - chrono::Duration::from_std(duration).unwrap_or_default(),
            completed_at: now,
            stdout_summary: String::new(),
            stderr_summary: String::new(),
            timed_out: false,
            verdict,
        }
    }

    /// Creates a result for a command that hit the timeout.
    pub fn timed_out(command: impl Into<String>, timeout: Duration) -> Self {
        let verdict = Verdict::fail(
            Outcome::ExecutionFailed,
            0,
            format!("test failed: timed out after {:?}", timeout),
        );
        let mut result = Self::new(command, -1, timeout, verdict);
        result.timed_out = true;
        result
    }

    /// Sets the captured stdout.
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout_summary = truncate_string(stdout.into(), MAX_CAPTURE_LEN);
        self
    }

    /// Sets the captured stderr.
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr_summary = truncate_string(stderr.into(), MAX_CAPTURE_LEN);
        self
    }

    /// Returns true if the case passed.
    pub fn is_success(&self) -> bool {
        self.verdict.passed
    }
}

/// Truncates a string to a maximum length.
fn truncate_string(s: String, max_len: usize) -> String {
    if s.len() <= max_len {
        s
    } else {
        format!("{}... [truncated]", &s[..max_len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn test_case_result_carries_verdict() {
        let verdict = classify(0, "pass: case1");
        let result = CaseResult::new("echo 'pass: case1'", 0, Duration::from_millis(5), verdict);

        assert!(result.is_success());
        assert!(result.case_id.starts_with("case-"));
        assert!(!result.timed_out);
        assert!(result.completed_at >= result.started_at);
    }

    #[test]
    fn test_timed_out_result_fails() {
        let result = CaseResult::timed_out("sleep 60", Duration::from_secs(1));
        assert!(!result.is_success());
        assert!(result.timed_out);
        assert_eq!(result.exit_code, -1);
        assert_eq!(result.verdict.outcome, Outcome::ExecutionFailed);
    }

    #[test]
    fn test_capture_truncation() {
        let long = "x".repeat(MAX_CAPTURE_LEN + 100);
        let result = CaseResult::new("noop", 0, Duration::ZERO, classify(0, ""))
            .with_stdout(long)
            .with_stderr("short");

        assert!(result.stdout_summary.ends_with("... [truncated]"));
        assert_eq!(result.stderr_summary, "short");
    }
}
