//! Pass/fail classification of captured test-run output.
//!
//! A non-zero exit code fails outright; otherwise the captured output is
//! scanned line-by-line for failure markers, then for success markers, and
//! output without any recognized marker passes by default.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A line is a failure marker if it carries a standalone `fault` or `error`
/// (bounded by whitespace or line edges), starts with `fail ` or `fail!`, or
/// contains the literal phrase `Segmentation fault`.
static FAILURE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(?:fault|error)(?:\s|$)|^fail[ !]|segmentation fault")
        .expect("Invalid failure marker regex")
});

/// A line is a success marker if it starts with `pass` or `success`.
static SUCCESS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:pass|success)").expect("Invalid success marker regex"));

/// Which branch of the decision policy produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The command itself exited non-zero; output was not inspected.
    ExecutionFailed,
    /// One or more failure marker lines were found in the output.
    FailureMarkers,
    /// One or more success marker lines were found in the output.
    SuccessMarkers,
    /// No recognized markers; passed under the default-success policy.
    NoMarkers,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::ExecutionFailed => write!(f, "execution_failed"),
            Outcome::FailureMarkers => write!(f, "failure_markers"),
            Outcome::SuccessMarkers => write!(f, "success_markers"),
            Outcome::NoMarkers => write!(f, "no_markers"),
        }
    }
}

/// Classification of a single test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the run counts as a pass.
    pub passed: bool,
    /// The decision branch that produced this verdict.
    pub outcome: Outcome,
    /// Number of marker lines behind the verdict (0 for the other branches).
    pub marker_lines: usize,
    /// Human-readable explanation; not meant for machine parsing.
    pub message: String,
}

impl Verdict {
    /// Creates a passing verdict.
    pub fn pass(outcome: Outcome, marker_lines: usize, message: impl Into<String>) -> Self {
        Self {
            passed: true,
            outcome,
            marker_lines,
            message: message.into(),
        }
    }

    /// Creates a failing verdict.
    pub fn fail(outcome: Outcome, marker_lines: usize, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            outcome,
            marker_lines,
            message: message.into(),
        }
    }

    /// Applies the strict marker policy: a pass that rested on the
    /// default-success rule (no explicit markers) becomes a failure.
    pub fn strict(self) -> Self {
        if self.passed && self.outcome == Outcome::NoMarkers {
            Verdict::fail(
                Outcome::NoMarkers,
                0,
                "test failed: no explicit markers in output (strict mode)",
            )
        } else {
            self
        }
    }
}

/// Classifies a test run from its exit code and captured output.
///
/// Decision policy, first match wins:
/// 1. non-zero `exit_code` fails without inspecting the output;
/// 2. any failure marker lines fail with their line count;
/// 3. any success marker lines pass with their line count;
/// 4. everything else passes under the default-success policy.
///
/// Pure and total: no I/O, no logging, no retained state between calls.
pub fn classify(exit_code: i32, captured: &str) -> Verdict {
    if exit_code != 0 {
        return Verdict::fail(
            Outcome::ExecutionFailed,
            0,
            format!("test failed: command exited with code {}", exit_code),
        );
    }

    let failures = matching_lines(captured, &FAILURE_MARKER);
    if failures > 0 {
        return Verdict::fail(
            Outcome::FailureMarkers,
            failures,
            format!("test failed: {} failure marker line(s)", failures),
        );
    }

    let successes = matching_lines(captured, &SUCCESS_MARKER);
    if successes > 0 {
        return Verdict::pass(
            Outcome::SuccessMarkers,
            successes,
            format!("test passed: {} success marker line(s)", successes),
        );
    }

    Verdict::pass(Outcome::NoMarkers, 0, "test passed: no explicit markers")
}

/// Counts lines of `captured` matching `marker`. A line with several matches
/// still counts once.
fn matching_lines(captured: &str, marker: &Regex) -> usize {
    captured.lines().filter(|line| marker.is_match(line)).count()
}
