//! Diff output types.

use serde::{Deserialize, Serialize};

/// Classification of a single diff entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Both sides have a line at this index and they differ
    Mismatch,
    /// An expected line was never printed
    MissingLine,
    /// A line was printed past the end of the expectations
    UnexpectedLine,
    /// The snippet body raised; `actual` carries the error message
    ExecutionError,
}

/// One mismatch between expected and actual output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffEntry {
    /// Zero-based output line index
    pub line_index: usize,
    pub kind: DiffKind,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl DiffEntry {
    /// Entry for a body that raised after printing `lines_before` lines
    pub fn execution_error(lines_before: usize, message: impl Into<String>) -> Self {
        Self {
            line_index: lines_before,
            kind: DiffKind::ExecutionError,
            expected: None,
            actual: Some(message.into()),
        }
    }

    /// `(line_index, expected, actual)` with absent sides as empty strings
    pub fn as_triple(&self) -> (usize, &str, &str) {
        (
            self.line_index,
            self.expected.as_deref().unwrap_or(""),
            self.actual.as_deref().unwrap_or(""),
        )
    }
}
