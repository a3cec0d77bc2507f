//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors produced while turning one trace line into an event.
///
/// These are always recovered by the driver (skip and continue).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed trace line (expected '<LABEL>, <VALUE>'): {0:?}")]
    MissingOperand(String),

    #[error("Operand is not an integer in line {line:?}: {operand:?}")]
    InvalidOperand { line: String, operand: String },

    #[error("CPU burst duration cannot be negative: {0}")]
    NegativeDuration(i64),

    #[error("Trace line is not valid UTF-8: {0:?}")]
    InvalidEncoding(String),
}

/// Conditions reported by a single timeline step.
///
/// A step that fails emits no records and leaves the clock untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("Invalid device {index} for {kind} (valid range 0..{limit})")]
    InvalidDeviceIndex {
        kind: &'static str,
        index: i64,
        limit: usize,
    },

    #[error("Simulated clock overflow at t={clock}")]
    ClockOverflow { clock: u64 },
}

/// Errors that can occur while loading the vector or device table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Table source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading table")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid table entry on line {line}: {content:?}")]
    InvalidEntry { line: usize, content: String },
}

/// Errors that can occur while reading the trace
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Trace source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading trace")]
    ReadFailed(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
