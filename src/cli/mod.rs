//! CLI support for esql-ast
//!
//! Provides programmatic access to the `check` and `print` commands for
//! embedding in other tools. Inputs are passed in as strings; reading
//! files and stdin is left to the caller.

mod check;
mod print;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use print::{PrintOptions, execute_print};

use std::io;

use thiserror::Error;

use crate::convert::DecodeError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Input is not JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON that is not a syntax tree
    #[error("Invalid syntax tree: {0}")]
    Decode(#[from] DecodeError),

    /// No input provided
    #[error("No input provided. Pass a file or pipe a JSON tree to stdin.")]
    NoInput,

    /// Validation found errors
    #[error("Validation failed with {0} error(s)")]
    Invalid(usize),
}
