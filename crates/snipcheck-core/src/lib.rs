//! snipcheck core - run annotated example snippets and check their output
//!
//! A snippet is a standalone example file whose print statements carry the
//! expected output as trailing comments. This crate provides:
//! - `SnippetRegistry`: loads a directory of snippets and serves them by id
//! - `ExpectationParser`: extracts the expected transcript from comments
//! - `capture`: the console sink and its scoped, non-reentrant capture
//! - `Runner`: executes a snippet under capture and diffs the output
//! - Executors for in-process closures and external interpreters
//! - Text and JSON reports, `snipcheck.toml` configuration
//! - Error and logging facilities shared with the CLI

pub mod capture;
pub mod config;
pub mod diff;
pub mod errors;
pub mod executor;
pub mod expectation;
pub mod logging_facility;
pub mod registry;
pub mod report;
pub mod runner;
pub mod snippet;

pub use snipcheck_core_types as core_types;

#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use capture::{emit, with_capture, Captured};
pub use config::SnipConfig;
pub use diff::{DiffEntry, DiffKind};
pub use errors::{ExError, ExErrorKind, Result, SnipError};
pub use executor::{CommandExecutor, Executor, InlineExecutor};
pub use expectation::{ExpectationParser, ExpectationSyntax};
pub use registry::{RegistryOptions, SnippetRegistry};
pub use runner::{ExecutionResult, Runner};
pub use snippet::Snippet;
