//! Trace parsing.
//!
//! This module handles:
//! - Reading raw trace lines in file order
//! - Turning each line into a typed `TraceEvent`

pub mod event;
pub mod trace;

// Re-export main types
pub use event::{parse_line, TraceEvent};
pub use trace::{lines_from, read_trace, read_trace_file, TraceLine};
