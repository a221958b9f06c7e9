//! qa-catalog - maintenance tools for the QA scenario catalogue
//!
//! Parses scenario seed SQL, rewrites developer jargon in step text into
//! tester-facing instructions, emits the corresponding UPDATE migration, and
//! builds the tester guide from the live catalogue.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod common;
pub mod guide;
pub mod migration;
pub mod rewrite;
pub mod seed;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use catalog::{Role, Scenario, Step};
