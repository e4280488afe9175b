//! Batch reports.
//!
//! Reports are renderings only; they never change a result.

pub mod json;
pub mod text;

pub use json::{render_json, JsonReport};
pub use text::render_text;

use serde::{Deserialize, Serialize};

use crate::runner::ExecutionResult;

/// Pass/fail counts for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
