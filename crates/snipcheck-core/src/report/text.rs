//! Plain-text report for terminals.

use crate::diff::{DiffEntry, DiffKind};
use crate::report::BatchSummary;
use crate::runner::ExecutionResult;

/// Render one line per snippet, diff details under failures, and a summary.
///
/// ```text
/// PASS 01_basics/04_comparision
/// FAIL 02_basics/01_arrays
///   [3] expected: [1, 2, 3]
///       actual:   [ 1, 2, 3 ]
///
/// 1 passed, 1 failed
/// ```
pub fn render_text(results: &[ExecutionResult]) -> String {
    let mut out = String::new();

    for result in results {
        let label = if result.passed { "PASS" } else { "FAIL" };
        out.push_str(&format!("{} {}\n", label, result.snippet_id));
        for entry in &result.diff {
            render_entry(&mut out, entry);
        }
    }

    let summary = BatchSummary::from_results(results);
    out.push_str(&format!(
        "\n{} passed, {} failed\n",
        summary.passed, summary.failed
    ));
    out
}

fn render_entry(out: &mut String, entry: &DiffEntry) {
    let prefix = format!("  [{}]", entry.line_index);
    let pad = " ".repeat(prefix.len());
    match entry.kind {
        DiffKind::ExecutionError => {
            out.push_str(&format!(
                "{} error:    {}\n",
                prefix,
                entry.actual.as_deref().unwrap_or("")
            ));
        }
        DiffKind::Mismatch => {
            out.push_str(&format!(
                "{} expected: {}\n{} actual:   {}\n",
                prefix,
                entry.expected.as_deref().unwrap_or(""),
                pad,
                entry.actual.as_deref().unwrap_or("")
            ));
        }
        DiffKind::MissingLine => {
            out.push_str(&format!(
                "{} expected: {}\n{} actual:   <no output>\n",
                prefix,
                entry.expected.as_deref().unwrap_or(""),
                pad
            ));
        }
        DiffKind::UnexpectedLine => {
            out.push_str(&format!(
                "{} expected: <nothing>\n{} actual:   {}\n",
                prefix,
                pad,
                entry.actual.as_deref().unwrap_or("")
            ));
        }
    }
}
