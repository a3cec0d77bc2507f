//! Run statistics gathered while the timeline is built.
//!
//! The driver feeds every applied event (and every rejected one) into a
//! `RunSummary`; the summary ends up in the JSON report and in the optional
//! text summary printed by the CLI.

use super::record::TimedRecord;
use crate::parser::TraceEvent;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of CPU bursts simulated
    pub cpu_bursts: u64,

    /// Number of SYSCALL interrupts expanded
    pub syscalls: u64,

    /// Number of END_IO interrupts expanded
    pub end_ios: u64,

    /// Lines with an unrecognised label
    pub unknown_activities: u64,

    /// Lines that could not be parsed
    pub malformed_lines: u64,

    /// Device events dropped because of an invalid device index or clock overflow
    pub rejected_events: u64,

    /// Simulated time spent in user code
    pub cpu_time: u64,

    /// Simulated time spent servicing interrupts (entry, ISR, exit)
    pub interrupt_time: u64,

    /// Clock value at the end of the run
    pub final_clock: u64,

    /// Total records in the execution log
    pub record_count: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for an event that was applied successfully
    pub fn record_event(&mut self, event: &TraceEvent, records: &[TimedRecord]) {
        let charged: u64 = records.iter().map(|r| r.duration).sum();
        self.record_count += records.len() as u64;

        match event {
            TraceEvent::CpuBurst(_) => {
                self.cpu_bursts += 1;
                self.cpu_time += charged;
            }
            TraceEvent::SyscallDevice(_) => {
                self.syscalls += 1;
                self.interrupt_time += charged;
            }
            TraceEvent::EndIoDevice(_) => {
                self.end_ios += 1;
                self.interrupt_time += charged;
            }
            TraceEvent::Unknown(_) => self.unknown_activities += 1,
        }
    }

    /// Account for a line that could not be parsed (logged as a zero-length record)
    pub fn record_malformed(&mut self) {
        self.malformed_lines += 1;
        self.record_count += 1;
    }

    pub fn record_rejected(&mut self) {
        self.rejected_events += 1;
    }

    /// Share of simulated time spent in CPU bursts, in percent
    pub fn cpu_utilization(&self) -> f64 {
        if self.final_clock > 0 {
            (self.cpu_time as f64 / self.final_clock as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging
    pub fn summary(&self) -> String {
        format!(
            "Clock: {} | Records: {} | CPU: {} ({:.1}%) | Interrupts: {} | Rejected: {} | Malformed: {}",
            self.final_clock,
            self.record_count,
            self.cpu_time,
            self.cpu_utilization(),
            self.interrupt_time,
            self.rejected_events,
            self.malformed_lines
        )
    }
}

/// Render a boxed text table of the run for the terminal
pub fn generate_text_summary(summary: &RunSummary) -> String {
    let rows = [
        ("CPU bursts", summary.cpu_bursts.to_string()),
        ("SYSCALL interrupts", summary.syscalls.to_string()),
        ("END_IO interrupts", summary.end_ios.to_string()),
        ("Unknown activities", summary.unknown_activities.to_string()),
        ("Malformed lines", summary.malformed_lines.to_string()),
        ("Rejected events", summary.rejected_events.to_string()),
        ("CPU time", summary.cpu_time.to_string()),
        ("Interrupt time", summary.interrupt_time.to_string()),
        ("Final clock", summary.final_clock.to_string()),
        ("CPU utilization", format!("{:.1}%", summary.cpu_utilization())),
    ];

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━┓".to_string());
    lines.push(format!("  ┃ {:<24} ┃ {:^12} ┃", "Metric", "Value"));
    lines.push("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━┫".to_string());
    for (name, value) in rows {
        lines.push(format!("  ┃ {:<24} ┃ {:>12} ┃", name, value));
    }
    lines.push("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━┛".to_string());

    lines.join("\n")
}
