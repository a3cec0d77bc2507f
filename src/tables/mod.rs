//! Device tables.
//!
//! Two parallel ordered lookups keyed by device index:
//! - ISR address (the vector table)
//! - average service delay (the device table)

pub mod device_table;
pub mod loader;

pub use device_table::{DeviceEntry, DeviceTable};
pub use loader::{load_delay_file, load_delays, load_tables, load_vector_file, load_vectors};
