//! Output writers for execution logs and run reports.
//!
//! This module handles writing data to disk in various formats:
//! - Execution logs (`<start>, <duration>, <description>` per line)
//! - JSON run reports

pub mod json;
pub mod schema;
pub mod sink;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use schema::{to_report, SimulationReport};
pub use sink::{write_execution, LogSink, MemorySink, TextFileSink};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of an output file
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
