//! CLI support for dotsel
//!
//! Provides programmatic access to the `select`, `put` and `delete` commands
//! so they can be embedded in other tools.

mod execute;

pub use execute::{ExecuteOptions, Operation, ValueType, execute, parse_value};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Selection error: {0}")]
    Select(#[from] crate::SelectError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Unknown value type: '{0}' (expected string, int, float, bool or json)")]
    UnknownValueType(String),

    #[error("Cannot read '{value}' as {expected}")]
    InvalidValue { value: String, expected: ValueType },
}
