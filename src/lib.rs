//! Interrupt Trace
//!
//! Trace-driven simulation of how a simplified CPU/OS handles CPU bursts,
//! system calls and I/O completions.
//!
//! A trace is a list of activities (`CPU, 50`, `SYSCALL, 4`, `END_IO, 4`).
//! Each activity expands into a fixed sequence of timed micro-operations
//! (context save, ISR dispatch, device work, context restore, IRET) that
//! advance a simulated clock. The result is an execution log of
//! `<start>, <duration>, <description>` records.
//!
//! ## Getting Started
//!
//! ```bash
//! interrupt-sim simulate --vectors vector_table.txt --devices device_table.txt \
//!     --trace trace.txt --output execution.txt
//! ```
//!
//! Or from code:
//!
//! ```
//! use interrupt_trace::parser::lines_from;
//! use interrupt_trace::simulator::Simulator;
//! use interrupt_trace::tables::DeviceTable;
//!
//! let tables = DeviceTable::new(vec!["0x0000".to_string()], vec![90]);
//! let outcome = Simulator::new(&tables).run(&lines_from(["CPU, 15", "SYSCALL, 0"]));
//! assert_eq!(outcome.final_clock(), 126);
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod simulator;
pub mod tables;
pub mod timeline;
pub mod utils;
