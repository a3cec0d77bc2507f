//! JSON report schema.
//!
//! Schema is versioned to allow future evolution.

use crate::simulator::{Diagnostic, SimulationOutcome};
use crate::timeline::{EntryVariant, RunSummary, TimedRecord};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the trace came from
    pub trace_source: String,

    /// Interrupt entry sequence used for the run
    pub variant: EntryVariant,

    /// Clock value after the last event
    pub final_clock: u64,

    pub summary: RunSummary,

    /// Execution log in emission order
    pub records: Vec<TimedRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Convert a finished run into the report format
///
/// **Public** - used by commands to create final output
pub fn to_report(outcome: &SimulationOutcome, trace_source: &str) -> SimulationReport {
    use chrono::Utc;

    SimulationReport {
        version: SCHEMA_VERSION.to_string(),
        trace_source: trace_source.to_string(),
        variant: outcome.variant,
        final_clock: outcome.final_clock(),
        summary: outcome.summary.clone(),
        records: outcome.log.records().to_vec(),
        diagnostics: outcome.diagnostics.clone(),
        generated_at: Utc::now().to_rfc3339(),
    }
}
