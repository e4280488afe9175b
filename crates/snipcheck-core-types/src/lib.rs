//! Core types shared across snipcheck facilities
//!
//! This crate provides the small set of types used by both the runner and
//! the logging facility:
//!
//! - **Correlation types**: RunId for tying a batch's events together
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
