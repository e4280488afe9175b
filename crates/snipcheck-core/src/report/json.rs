//! JSON report for CI and tooling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core_types::RunId;
use crate::errors::Result;
use crate::report::BatchSummary;
use crate::runner::ExecutionResult;

/// Top-level JSON document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonReport {
    pub generated_at: DateTime<Utc>,
    pub run_id: RunId,
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub results: Vec<ExecutionResult>,
}

impl JsonReport {
    pub fn new(run_id: RunId, results: Vec<ExecutionResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            run_id,
            summary: BatchSummary::from_results(&results),
            results,
        }
    }
}

/// Render `results` as pretty-printed JSON
///
/// # Errors
///
/// Returns `Serialization` if encoding fails.
pub fn render_json(run_id: &RunId, results: &[ExecutionResult]) -> Result<String> {
    let report = JsonReport::new(run_id.clone(), results.to_vec());
    Ok(serde_json::to_string_pretty(&report)?)
}
