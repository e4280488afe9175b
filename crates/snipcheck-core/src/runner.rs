//! Snippet runner
//!
//! `run(id)`: resolve the snippet, execute its body under an output capture,
//! and diff the captured lines against the snippet's expectations. A body
//! that raises (error value or panic) yields a failed result with a single
//! `ExecutionError` diff entry; it never aborts a batch.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::capture::with_capture;
use crate::core_types::schema::{OP_RUN_BATCH, OP_RUN_SNIPPET};
use crate::core_types::RunId;
use crate::diff::{compute_line_diff, DiffEntry};
use crate::errors::Result;
use crate::executor::Executor;
use crate::registry::SnippetRegistry;
use crate::snippet::Snippet;
use crate::{log_op_end, log_op_error, log_op_start};

/// Outcome of one snippet run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub snippet_id: String,
    pub expected_lines: Vec<String>,
    /// Captured output in emission order
    pub actual_lines: Vec<String>,
    pub passed: bool,
    pub diff: Vec<DiffEntry>,
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// The body raised instead of completing
    pub fn execution_error(&self) -> Option<&DiffEntry> {
        self.diff
            .iter()
            .find(|d| d.kind == crate::diff::DiffKind::ExecutionError)
    }
}

/// Runs snippets from a registry through an executor
#[derive(Debug)]
pub struct Runner<'r, E> {
    registry: &'r SnippetRegistry,
    executor: E,
}

impl<'r, E: Executor> Runner<'r, E> {
    pub fn new(registry: &'r SnippetRegistry, executor: E) -> Self {
        Self { registry, executor }
    }

    pub fn registry(&self) -> &'r SnippetRegistry {
        self.registry
    }

    /// Run one snippet by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `ReentrantCapture` when
    /// called from inside an active capture. Snippet failures are reported
    /// in the result, not as errors.
    pub fn run(&self, id: &str) -> Result<ExecutionResult> {
        let snippet = self.registry.get(id)?;
        self.run_snippet(snippet)
    }

    /// Run a snippet that need not belong to the registry
    pub fn run_snippet(&self, snippet: &Snippet) -> Result<ExecutionResult> {
        let started = Instant::now();
        log_op_start!(OP_RUN_SNIPPET, snippet_id = snippet.id());

        let captured = match with_capture(|| {
            panic::catch_unwind(AssertUnwindSafe(|| self.executor.execute(snippet)))
        }) {
            Ok(captured) => captured,
            Err(err) => {
                log_op_error!(
                    OP_RUN_SNIPPET,
                    &err,
                    duration_ms = started.elapsed().as_millis() as u64,
                    snippet_id = snippet.id()
                );
                return Err(err);
            }
        };

        let outcome = match captured.value {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(err.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        };
        let actual_lines = captured.lines;
        let expected = snippet.expected_lines();

        let diff = match &outcome {
            Err(message) => {
                tracing::warn!(
                    op = OP_RUN_SNIPPET,
                    snippet_id = snippet.id(),
                    error = %message,
                    "snippet body raised"
                );
                vec![DiffEntry::execution_error(actual_lines.len(), message.clone())]
            }
            // Nothing annotated: only a clean run is checked.
            Ok(()) if expected.is_empty() => Vec::new(),
            Ok(()) => compute_line_diff(expected, &actual_lines),
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        let result = ExecutionResult {
            snippet_id: snippet.id().to_string(),
            expected_lines: expected.to_vec(),
            actual_lines,
            passed: diff.is_empty(),
            diff,
            duration_ms,
        };

        log_op_end!(
            OP_RUN_SNIPPET,
            duration_ms = duration_ms,
            snippet_id = snippet.id(),
            passed = result.passed,
            actual_len = result.actual_lines.len(),
            diff_len = result.diff.len()
        );
        Ok(result)
    }

    /// Run every registered snippet, in id order
    pub fn run_all(&self) -> Result<Vec<ExecutionResult>> {
        self.run_ids(self.registry.list())
    }

    /// Run the named snippets sequentially, in the given order
    ///
    /// # Errors
    ///
    /// Stops at the first unknown id (`NotFound`) or capture misuse.
    pub fn run_ids<I, S>(&self, ids: I) -> Result<Vec<ExecutionResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_batch(&RunId::new(), ids)
    }

    /// Like [`run_ids`](Self::run_ids), tagging the batch's log events with
    /// `run_id`
    pub fn run_batch<I, S>(&self, run_id: &RunId, ids: I) -> Result<Vec<ExecutionResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let span = tracing::info_span!("batch", run_id = %run_id);
        let _entered = span.enter();
        log_op_start!(OP_RUN_BATCH);

        let mut results = Vec::new();
        for id in ids {
            match self.run(id.as_ref()) {
                Ok(result) => results.push(result),
                Err(err) => {
                    log_op_error!(
                        OP_RUN_BATCH,
                        &err,
                        duration_ms = started.elapsed().as_millis() as u64
                    );
                    return Err(err);
                }
            }
        }

        log_op_end!(
            OP_RUN_BATCH,
            duration_ms = started.elapsed().as_millis() as u64,
            snippet_count = results.len(),
            failed = results.iter().filter(|r| !r.passed).count()
        );
        Ok(results)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {}", s)
    } else {
        "panic: <non-string payload>".to_string()
    }
}
