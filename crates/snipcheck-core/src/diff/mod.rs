//! Line diff between expected and actual console output.
//!
//! ## Entry point
//!
//! ```
//! use snipcheck_core::diff::compute_line_diff;
//!
//! let expected = vec!["y".to_string()];
//! let actual = vec!["x".to_string()];
//! let diff = compute_line_diff(&expected, &actual);
//! assert_eq!(diff.len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Line-indexed**: line `i` is only ever compared with line `i`; there is
//!   no alignment or set matching.
//! - **Exact**: an entry exists for exactly the indices where the two sides
//!   differ, a missing line counting as different.

pub mod engine;
pub mod model;

pub use engine::compute_line_diff;
pub use model::{DiffEntry, DiffKind};
