//! Configuration and constants for the simulator.
//!
//! Every timing constant the timeline builder charges lives here so the
//! arithmetic of an interrupt expansion can be audited in one place.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Fixed kernel bookkeeping costs (simulated time units)
pub const CONTEXT_SAVE_TIME: u64 = 10;
pub const ISR_TIME: u64 = 40;
pub const TRANSFER_TIME: u64 = 40;
pub const KERNEL_SWITCH_TIME: u64 = 1;
pub const VECTOR_LOOKUP_TIME: u64 = 1;
pub const LOAD_PC_TIME: u64 = 1;
pub const IRET_TIME: u64 = 1;

// Vector table memory layout: entry `n` lives at ADDR_BASE + n * VECTOR_SIZE
pub const ADDR_BASE: u64 = 0;
pub const VECTOR_SIZE: u64 = 2;

// Default collaborator locations used by the CLI (never by the core)
pub const DEFAULT_VECTOR_TABLE: &str = "vector_table.txt";
pub const DEFAULT_DEVICE_TABLE: &str = "device_table.txt";
pub const DEFAULT_TRACE_FILE: &str = "trace.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "execution.txt";

// Environment overrides for the collaborator locations
pub const ENV_VECTOR_TABLE: &str = "INTERRUPT_SIM_VECTORS";
pub const ENV_DEVICE_TABLE: &str = "INTERRUPT_SIM_DEVICES";
pub const ENV_TRACE_FILE: &str = "INTERRUPT_SIM_TRACE";
pub const ENV_OUTPUT_FILE: &str = "INTERRUPT_SIM_OUTPUT";

/// All named timing constants, in display order
pub const TIMING_CONSTANTS: &[(&str, u64)] = &[
    ("CONTEXT_SAVE_TIME", CONTEXT_SAVE_TIME),
    ("ISR_TIME", ISR_TIME),
    ("TRANSFER_TIME", TRANSFER_TIME),
    ("KERNEL_SWITCH_TIME", KERNEL_SWITCH_TIME),
    ("VECTOR_LOOKUP_TIME", VECTOR_LOOKUP_TIME),
    ("LOAD_PC_TIME", LOAD_PC_TIME),
    ("IRET_TIME", IRET_TIME),
    ("ADDR_BASE", ADDR_BASE),
    ("VECTOR_SIZE", VECTOR_SIZE),
];
