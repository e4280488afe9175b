//! Canonical schema constants for structured logging and reports
//!
//! These constants keep field names consistent between log events and the
//! JSON report.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Entity identifiers
pub const FIELD_SNIPPET_ID: &str = "snippet_id";
pub const FIELD_PATH: &str = "path";

// Collection sizes
pub const FIELD_SNIPPET_COUNT: &str = "snippet_count";
pub const FIELD_EXPECTED_LEN: &str = "expected_len";
pub const FIELD_ACTUAL_LEN: &str = "actual_len";
pub const FIELD_DIFF_LEN: &str = "diff_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_LOAD_REGISTRY: &str = "load_registry";
pub const OP_RUN_SNIPPET: &str = "run_snippet";
pub const OP_RUN_BATCH: &str = "run_batch";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_SNIPPET_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_are_distinct() {
        assert_ne!(OP_LOAD_REGISTRY, OP_RUN_SNIPPET);
        assert_ne!(OP_RUN_SNIPPET, OP_RUN_BATCH);
    }
}
