//! Interrupt-expansion state machine.
//!
//! The builder owns the simulated clock. Each trace event expands into a
//! fixed sequence of timed micro-operations; every record starts where the
//! previous one ended.
//!
//! Plain expansion of a device event:
//!
//! ```text
//! Context save (<KIND>)          CONTEXT_SAVE_TIME
//! <KIND>: run ISR <address>      ISR_TIME
//! Transfer data ... memory       TRANSFER_TIME        (SYSCALL only)
//! Check for errors / status      max(0, delay - consumed)
//! Context restored               CONTEXT_SAVE_TIME
//! IRET                           IRET_TIME
//! ```
//!
//! The kernel-entry variant replaces the first step with an explicit mode
//! switch, context save, vector lookup and PC load.

use super::record::TimedRecord;
use crate::parser::TraceEvent;
use crate::tables::{DeviceEntry, DeviceTable};
use crate::utils::config::{
    ADDR_BASE, CONTEXT_SAVE_TIME, IRET_TIME, ISR_TIME, KERNEL_SWITCH_TIME, LOAD_PC_TIME,
    TRANSFER_TIME, VECTOR_LOOKUP_TIME, VECTOR_SIZE,
};
use crate::utils::error::TimelineError;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LABEL_CPU_BURST: &str = "CPU Burst";
pub const LABEL_TRANSFER: &str = "Transfer data from device to memory";
pub const LABEL_CHECK_ERRORS: &str = "Check for errors";
pub const LABEL_CHECK_STATUS: &str = "Check device status";
pub const LABEL_CONTEXT_RESTORED: &str = "Context restored";
pub const LABEL_IRET: &str = "IRET";
pub const LABEL_KERNEL_SWITCH: &str = "switch to kernel mode";
pub const LABEL_CONTEXT_SAVED: &str = "context saved";

/// Which entry sequence device interrupts use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryVariant {
    /// `Context save (<KIND>)` then the ISR
    #[default]
    Plain,

    /// Kernel mode switch, context save, vector lookup and PC load before the ISR
    ///
    /// These four steps take the place of `Context save (<KIND>)`, so a SYSCALL
    /// emits 9 records and an END_IO emits 8.
    KernelEntry,
}

impl fmt::Display for EntryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryVariant::Plain => write!(f, "plain"),
            EntryVariant::KernelEntry => write!(f, "kernel_entry"),
        }
    }
}

/// Device interrupt flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptKind {
    Syscall,
    EndIo,
}

impl InterruptKind {
    pub fn label(self) -> &'static str {
        match self {
            InterruptKind::Syscall => "SYSCALL",
            InterruptKind::EndIo => "END_IO",
        }
    }

    /// Time already charged before the post-check step
    pub fn consumed(self) -> u64 {
        match self {
            InterruptKind::Syscall => ISR_TIME + TRANSFER_TIME,
            InterruptKind::EndIo => ISR_TIME,
        }
    }

    fn check_label(self) -> &'static str {
        match self {
            InterruptKind::Syscall => LABEL_CHECK_ERRORS,
            InterruptKind::EndIo => LABEL_CHECK_STATUS,
        }
    }
}

/// Duration of the post-check step, clamped at zero
pub fn post_check_time(kind: InterruptKind, service_delay: u64) -> u64 {
    service_delay.saturating_sub(kind.consumed())
}

/// Memory position of a device's vector table entry, e.g. `0x0004`
pub fn vector_address(device: usize) -> String {
    format!("0x{:04X}", ADDR_BASE + device as u64 * VECTOR_SIZE)
}

/// Stateful timeline builder
///
/// **Public** - the core of the simulator; the driver feeds it one event at a time
#[derive(Debug, Clone)]
pub struct TimelineBuilder<'t> {
    clock: u64,
    tables: &'t DeviceTable,
    variant: EntryVariant,
}

impl<'t> TimelineBuilder<'t> {
    /// Create a builder at t=0 using the plain entry sequence
    pub fn new(tables: &'t DeviceTable) -> Self {
        Self {
            clock: 0,
            tables,
            variant: EntryVariant::default(),
        }
    }

    /// Builder pattern: set the entry variant
    pub fn with_variant(mut self, variant: EntryVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Builder pattern: start from a non-zero clock
    pub fn starting_at(mut self, clock: u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn variant(&self) -> EntryVariant {
        self.variant
    }

    /// Apply one event
    ///
    /// # Returns
    /// Records emitted, in order. The clock has advanced by the sum of their durations.
    ///
    /// # Errors
    /// * `TimelineError::InvalidDeviceIndex` - device outside both tables
    /// * `TimelineError::ClockOverflow` - expansion would overflow the clock
    ///
    /// On error nothing is emitted and the clock is unchanged.
    pub fn step(&mut self, event: &TraceEvent) -> Result<Vec<TimedRecord>, TimelineError> {
        let mut expansion = Expansion::at(self.clock);

        match event {
            TraceEvent::CpuBurst(duration) => expansion.push(*duration, LABEL_CPU_BURST)?,
            TraceEvent::SyscallDevice(device) => {
                let entry = self.resolve(InterruptKind::Syscall, *device)?;
                self.expand_interrupt(&mut expansion, InterruptKind::Syscall, entry)?;
            }
            TraceEvent::EndIoDevice(device) => {
                let entry = self.resolve(InterruptKind::EndIo, *device)?;
                self.expand_interrupt(&mut expansion, InterruptKind::EndIo, entry)?;
            }
            TraceEvent::Unknown(label) => expansion.push(0, unknown_description(label))?,
        }

        trace!(
            "{} advanced clock {} -> {} ({} records)",
            event.kind(),
            self.clock,
            expansion.clock,
            expansion.records.len()
        );

        self.clock = expansion.clock;
        Ok(expansion.records)
    }

    /// Record an activity that could not be simulated (duration 0, clock unchanged)
    pub fn unknown(&self, label: &str) -> TimedRecord {
        TimedRecord::new(self.clock, 0, unknown_description(label))
    }

    /// **Private** - bounds-check a device against both tables
    fn resolve(&self, kind: InterruptKind, device: i64) -> Result<DeviceEntry<'t>, TimelineError> {
        self.tables
            .lookup(device)
            .ok_or_else(|| TimelineError::InvalidDeviceIndex {
                kind: kind.label(),
                index: device,
                limit: self.tables.len(),
            })
    }

    /// **Private** - the fixed micro-operation sequence for SYSCALL / END_IO
    fn expand_interrupt(
        &self,
        expansion: &mut Expansion,
        kind: InterruptKind,
        entry: DeviceEntry<'_>,
    ) -> Result<(), TimelineError> {
        let label = kind.label();

        match self.variant {
            EntryVariant::Plain => {
                expansion.push(CONTEXT_SAVE_TIME, format!("Context save ({})", label))?;
            }
            EntryVariant::KernelEntry => {
                expansion.push(KERNEL_SWITCH_TIME, LABEL_KERNEL_SWITCH)?;
                expansion.push(CONTEXT_SAVE_TIME, LABEL_CONTEXT_SAVED)?;
                expansion.push(
                    VECTOR_LOOKUP_TIME,
                    format!(
                        "find vector {} in memory position {}",
                        entry.index,
                        vector_address(entry.index)
                    ),
                )?;
                expansion.push(
                    LOAD_PC_TIME,
                    format!("load address {} into the PC", entry.isr_address),
                )?;
            }
        }

        expansion.push(ISR_TIME, format!("{}: run ISR {}", label, entry.isr_address))?;

        if kind == InterruptKind::Syscall {
            expansion.push(TRANSFER_TIME, LABEL_TRANSFER)?;
        }

        expansion.push(post_check_time(kind, entry.service_delay), kind.check_label())?;
        expansion.push(CONTEXT_SAVE_TIME, LABEL_CONTEXT_RESTORED)?;
        expansion.push(IRET_TIME, LABEL_IRET)?;

        Ok(())
    }
}

fn unknown_description(label: &str) -> String {
    format!("Unknown activity: {}", label)
}

/// Scratch clock and records for one event; committed only on success
struct Expansion {
    clock: u64,
    records: Vec<TimedRecord>,
}

impl Expansion {
    fn at(clock: u64) -> Self {
        Self {
            clock,
            records: Vec::new(),
        }
    }

    fn push(&mut self, duration: u64, description: impl Into<String>) -> Result<(), TimelineError> {
        let next = self
            .clock
            .checked_add(duration)
            .ok_or(TimelineError::ClockOverflow { clock: self.clock })?;

        self.records.push(TimedRecord::new(self.clock, duration, description));
        self.clock = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> DeviceTable {
        DeviceTable::new(
            vec!["0x0000".to_string(), "0x01E3".to_string()],
            vec![90, 30],
        )
    }

    fn labels(records: &[TimedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn test_cpu_burst() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables).starting_at(5);

        let records = builder.step(&TraceEvent::CpuBurst(20)).unwrap();

        assert_eq!(records, vec![TimedRecord::new(5, 20, LABEL_CPU_BURST)]);
        assert_eq!(builder.clock(), 25);
    }

    #[test]
    fn test_syscall_plain_sequence() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables);

        let records = builder.step(&TraceEvent::SyscallDevice(0)).unwrap();

        assert_eq!(
            labels(&records),
            vec![
                "Context save (SYSCALL)",
                "SYSCALL: run ISR 0x0000",
                LABEL_TRANSFER,
                LABEL_CHECK_ERRORS,
                LABEL_CONTEXT_RESTORED,
                LABEL_IRET,
            ]
        );
        // 90 - (40 + 40)
        assert_eq!(records[3].duration, 10);
        assert_eq!(builder.clock(), 10 + 40 + 40 + 10 + 10 + 1);
    }

    #[test]
    fn test_end_io_plain_sequence() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables);

        let records = builder.step(&TraceEvent::EndIoDevice(0)).unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].description, "Context save (END_IO)");
        assert_eq!(records[1].description, "END_IO: run ISR 0x0000");
        assert_eq!(records[2], TimedRecord::new(50, 50, LABEL_CHECK_STATUS));
        assert_eq!(builder.clock(), 10 + 40 + 50 + 10 + 1);
    }

    #[test]
    fn test_post_check_clamped_to_zero() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables);

        let records = builder.step(&TraceEvent::SyscallDevice(1)).unwrap();
        assert_eq!(records[3].duration, 0);

        let records = builder.step(&TraceEvent::EndIoDevice(1)).unwrap();
        assert_eq!(records[2].duration, 0);
    }

    #[test]
    fn test_kernel_entry_sequence() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables).with_variant(EntryVariant::KernelEntry);

        let records = builder.step(&TraceEvent::SyscallDevice(1)).unwrap();

        assert_eq!(
            labels(&records),
            vec![
                LABEL_KERNEL_SWITCH,
                LABEL_CONTEXT_SAVED,
                "find vector 1 in memory position 0x0002",
                "load address 0x01E3 into the PC",
                "SYSCALL: run ISR 0x01E3",
                LABEL_TRANSFER,
                LABEL_CHECK_ERRORS,
                LABEL_CONTEXT_RESTORED,
                LABEL_IRET,
            ]
        );
        assert_eq!(records[0].duration, KERNEL_SWITCH_TIME);
        assert_eq!(records[2].duration, VECTOR_LOOKUP_TIME);
    }

    #[test]
    fn test_invalid_device_leaves_clock() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables).starting_at(42);

        let err = builder.step(&TraceEvent::EndIoDevice(2)).unwrap_err();

        assert_eq!(
            err,
            TimelineError::InvalidDeviceIndex {
                kind: "END_IO",
                index: 2,
                limit: 2
            }
        );
        assert_eq!(builder.clock(), 42);
    }

    #[test]
    fn test_overflow_is_atomic() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables).starting_at(u64::MAX - 20);

        let err = builder.step(&TraceEvent::SyscallDevice(0)).unwrap_err();

        assert!(matches!(err, TimelineError::ClockOverflow { .. }));
        assert_eq!(builder.clock(), u64::MAX - 20);
    }

    #[test]
    fn test_unknown_activity() {
        let tables = tables();
        let mut builder = TimelineBuilder::new(&tables).starting_at(7);

        let records = builder.step(&TraceEvent::Unknown("FORK".to_string())).unwrap();

        assert_eq!(records, vec![TimedRecord::new(7, 0, "Unknown activity: FORK")]);
        assert_eq!(builder.clock(), 7);
    }

    #[test]
    fn test_vector_address_format() {
        assert_eq!(vector_address(0), "0x0000");
        assert_eq!(vector_address(5), "0x000A");
        assert_eq!(vector_address(0x900), "0x1200");
    }
}
