//! Timeline construction.
//!
//! This module turns typed trace events into:
//! - Timed records (start, duration, description)
//! - An append-only execution log
//! - Run statistics

pub mod builder;
pub mod metrics;
pub mod record;

// Re-export main types and functions
pub use builder::{post_check_time, vector_address, EntryVariant, InterruptKind, TimelineBuilder};
pub use metrics::{generate_text_summary, RunSummary};
pub use record::{ExecutionLog, TimedRecord};
