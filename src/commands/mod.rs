//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod simulate;
pub mod utils;

// Re-export main command functions
pub use models::SimulateArgs;
pub use simulate::{execute_simulate, validate_args};
pub use utils::{display_constants, display_version, validate_report_file};
