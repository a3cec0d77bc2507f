//! Timed records and the append-only execution log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

/// One line of the execution log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedRecord {
    /// Simulated clock value when the record was emitted
    pub start: u64,

    /// Time charged by this micro-operation
    pub duration: u64,

    /// Human-readable description
    pub description: String,
}

impl TimedRecord {
    pub fn new(start: u64, duration: u64, description: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            description: description.into(),
        }
    }

    /// Clock value once this record has been charged
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }
}

impl fmt::Display for TimedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.start, self.duration, self.description)
    }
}

/// Ordered, append-only sequence of timed records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionLog {
    records: Vec<TimedRecord>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TimedRecord) {
        self.records.push(record);
    }

    /// Append records in emission order
    pub fn append(&mut self, records: impl IntoIterator<Item = TimedRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[TimedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedRecord> {
        self.records.iter()
    }

    /// End time of the last record, 0 for an empty log
    pub fn end_time(&self) -> u64 {
        self.records.last().map(TimedRecord::end).unwrap_or(0)
    }

    /// Write every record as `<start>, <duration>, <description>`, one per line
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for record in &self.records {
            writeln!(writer, "{}", record)?;
        }
        writer.flush()
    }

    /// Render the whole log as lines (mostly useful for tests and in-memory sinks)
    pub fn to_lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    pub fn into_records(self) -> Vec<TimedRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ExecutionLog {
    type Item = &'a TimedRecord;
    type IntoIter = std::slice::Iter<'a, TimedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<TimedRecord>> for ExecutionLog {
    fn from(records: Vec<TimedRecord>) -> Self {
        Self { records }
    }
}
