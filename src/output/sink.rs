//! Execution log sinks.
//!
//! The driver hands its finished log to a `LogSink` exactly once.

use super::{ensure_parent_dir, validate_path};
use crate::timeline::ExecutionLog;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Destination for a finished execution log
pub trait LogSink {
    fn write_log(&mut self, log: &ExecutionLog) -> Result<(), OutputError>;
}

/// Writes the log as text, one `<start>, <duration>, <description>` line per record
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for TextFileSink {
    fn write_log(&mut self, log: &ExecutionLog) -> Result<(), OutputError> {
        write_execution(log, &self.path)
    }
}

/// Keeps rendered lines in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
    writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// How many times a log was handed over
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl LogSink for MemorySink {
    fn write_log(&mut self, log: &ExecutionLog) -> Result<(), OutputError> {
        self.lines = log.to_lines();
        self.writes += 1;
        Ok(())
    }
}

/// Write an execution log to a text file
///
/// **Public** - main entry point for log output
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, directory, or parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_execution(
    log: &ExecutionLog,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing execution log to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    log.write_to(BufWriter::new(file)).map_err(OutputError::WriteFailed)?;

    info!("Execution log written ({} records)", log.len());

    Ok(())
}
