//! Suite files and aggregate summaries.
//!
//! A suite file lists one shell command per line; `#` comments and blank
//! lines are skipped, so suites can keep disabled cases inline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::executor::RunnerError;
use super::result::CaseResult;

/// Loads the commands of a suite file.
pub fn load_suite(path: &Path) -> Result<Vec<String>, RunnerError> {
    let content = fs::read_to_string(path)?;
    let commands: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    if commands.is_empty() {
        return Err(RunnerError::EmptySuite(path.display().to_string()));
    }
    Ok(commands)
}

/// Aggregate outcome of a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSummary {
    /// Total number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// All individual case results.
    pub results: Vec<CaseResult>,
}

impl SuiteSummary {
    /// Creates a summary from a list of case results.
    pub fn from_results(results: Vec<CaseResult>) -> Self {
        let passed = results.iter().filter(|r| r.is_success()).count();
        let failed = results.len() - passed;

        Self {
            total: results.len(),
            passed,
            failed,
            results,
        }
    }

    /// Check if all cases passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Get only the failed case results.
    pub fn failures(&self) -> Vec<&CaseResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }
}
