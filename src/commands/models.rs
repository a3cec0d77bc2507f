use crate::timeline::EntryVariant;
use crate::utils::config::{
    DEFAULT_DEVICE_TABLE, DEFAULT_OUTPUT_FILE, DEFAULT_TRACE_FILE, DEFAULT_VECTOR_TABLE,
};
use std::path::PathBuf;

/// Arguments for the simulate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SimulateArgs {
    /// Vector table (one ISR address per line)
    pub vector_table: PathBuf,

    /// Device table (one service delay per line)
    pub device_table: PathBuf,

    /// Trace to simulate
    pub trace: PathBuf,

    /// Output path for the execution log
    pub output: PathBuf,

    /// Output path for the JSON report (optional)
    pub report: Option<PathBuf>,

    /// Interrupt entry sequence
    pub variant: EntryVariant,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Fail the run when any line produced a diagnostic
    pub strict: bool,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            vector_table: PathBuf::from(DEFAULT_VECTOR_TABLE),
            device_table: PathBuf::from(DEFAULT_DEVICE_TABLE),
            trace: PathBuf::from(DEFAULT_TRACE_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            report: None,
            variant: EntryVariant::Plain,
            print_summary: false,
            strict: false,
        }
    }
}
