//! Driver loop.
//!
//! Feeds trace lines, in order, through the parser and the timeline builder.
//! Malformed lines and rejected device events never abort the run: they are
//! logged, collected as diagnostics, and processing continues with the next
//! line.

use crate::output::LogSink;
use crate::parser::{parse_line, TraceLine};
use crate::tables::DeviceTable;
use crate::timeline::{EntryVariant, ExecutionLog, RunSummary, TimelineBuilder};
use crate::utils::error::{OutputError, ParseError, TimelineError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Why a line did not simulate normally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedLine,
    InvalidDevice,
    ClockOverflow,
}

/// A recoverable problem attached to a trace line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number in the trace
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub log: ExecutionLog,
    pub summary: RunSummary,
    pub diagnostics: Vec<Diagnostic>,
    pub variant: EntryVariant,
}

impl SimulationOutcome {
    pub fn final_clock(&self) -> u64 {
        self.summary.final_clock
    }
}

/// Runs traces against a fixed set of device tables
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'t> {
    tables: &'t DeviceTable,
    variant: EntryVariant,
}

impl<'t> Simulator<'t> {
    pub fn new(tables: &'t DeviceTable) -> Self {
        Self {
            tables,
            variant: EntryVariant::default(),
        }
    }

    pub fn with_variant(mut self, variant: EntryVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Simulate a whole trace
    ///
    /// **Public** - main entry point for the driver
    ///
    /// # Arguments
    /// * `lines` - Trace lines in file order
    ///
    /// # Returns
    /// The execution log with run statistics and per-line diagnostics
    pub fn run(&self, lines: &[TraceLine]) -> SimulationOutcome {
        let mut builder = TimelineBuilder::new(self.tables).with_variant(self.variant);
        let mut log = ExecutionLog::new();
        let mut summary = RunSummary::new();
        let mut diagnostics = Vec::new();

        debug!(
            "Simulating {} lines ({} devices, {} entry)",
            lines.len(),
            self.tables.len(),
            self.variant
        );

        for line in lines {
            if line.is_blank() {
                continue;
            }

            let parsed = if line.invalid_utf8 {
                Err(ParseError::InvalidEncoding(line.text.trim().to_string()))
            } else {
                parse_line(&line.text)
            };

            let event = match parsed {
                Ok(event) => event,
                Err(e) => {
                    warn!("Line {}: {}", line.number, e);
                    log.push(builder.unknown(line.text.trim()));
                    summary.record_malformed();
                    diagnostics.push(Diagnostic {
                        line: line.number,
                        kind: DiagnosticKind::MalformedLine,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            match builder.step(&event) {
                Ok(records) => {
                    summary.record_event(&event, &records);
                    log.append(records);
                }
                Err(e) => {
                    warn!("Line {}: {}", line.number, e);
                    summary.record_rejected();
                    diagnostics.push(Diagnostic {
                        line: line.number,
                        kind: diagnostic_kind(&e),
                        message: e.to_string(),
                    });
                }
            }
        }

        summary.final_clock = builder.clock();
        info!("Simulation finished: {}", summary.summary());

        SimulationOutcome {
            log,
            summary,
            diagnostics,
            variant: self.variant,
        }
    }

    /// Simulate a trace and hand the finished log to `sink` exactly once
    pub fn run_into<S: LogSink + ?Sized>(
        &self,
        lines: &[TraceLine],
        sink: &mut S,
    ) -> Result<SimulationOutcome, OutputError> {
        let outcome = self.run(lines);
        sink.write_log(&outcome.log)?;
        Ok(outcome)
    }
}

fn diagnostic_kind(error: &TimelineError) -> DiagnosticKind {
    match error {
        TimelineError::InvalidDeviceIndex { .. } => DiagnosticKind::InvalidDevice,
        TimelineError::ClockOverflow { .. } => DiagnosticKind::ClockOverflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use crate::parser::lines_from;

    fn tables() -> DeviceTable {
        DeviceTable::new(vec!["0x0000".to_string()], vec![90])
    }

    #[test]
    fn test_blank_lines_skipped() {
        let tables = tables();
        let outcome = Simulator::new(&tables).run(&lines_from(["", "   ", "CPU, 5"]));

        assert_eq!(outcome.log.len(), 1);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.final_clock(), 5);
    }

    #[test]
    fn test_malformed_line_logged_as_unknown() {
        let tables = tables();
        let outcome = Simulator::new(&tables).run(&lines_from(["CPU, 10", "FOO", "CPU, 5"]));

        assert_eq!(outcome.log.to_lines()[1], "10, 0, Unknown activity: FOO");
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].line, 2);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MalformedLine);
        assert_eq!(outcome.summary.malformed_lines, 1);
        assert_eq!(outcome.final_clock(), 15);
    }

    #[test]
    fn test_invalid_utf8_line_is_malformed() {
        let tables = tables();
        let lines = vec![
            TraceLine::new(1, "CPU, 3"),
            TraceLine::from_bytes(2, b"\xfe 1"),
        ];

        let outcome = Simulator::new(&tables).run(&lines);

        assert_eq!(outcome.log.to_lines()[1], "3, 0, Unknown activity: \u{FFFD} 1");
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MalformedLine);
    }

    #[test]
    fn test_invalid_device_continues() {
        let tables = tables();
        let outcome =
            Simulator::new(&tables).run(&lines_from(["SYSCALL, 3", "END_IO, -1", "CPU, 4"]));

        assert_eq!(outcome.log.len(), 1);
        assert_eq!(outcome.log.records()[0].start, 0);
        assert_eq!(outcome.summary.rejected_events, 2);
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::InvalidDevice));
    }

    #[test]
    fn test_run_into_sink() {
        let tables = tables();
        let mut sink = MemorySink::new();

        let outcome = Simulator::new(&tables)
            .run_into(&lines_from(["CPU, 15", "SYSCALL, 0"]), &mut sink)
            .unwrap();

        assert_eq!(sink.writes(), 1);
        assert_eq!(sink.lines().len(), outcome.log.len());
        assert_eq!(sink.lines().last().unwrap(), "125, 1, IRET");
    }
}
