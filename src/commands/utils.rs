use crate::output::read_report;
use crate::utils::config::{SCHEMA_VERSION, TIMING_CONSTANTS};
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    let contiguous = report
        .records
        .windows(2)
        .all(|pair| pair[0].end() == pair[1].start);
    if !contiguous {
        anyhow::bail!("Records in {} are not in clock order", file_path.display());
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Trace: {}", report.trace_source);
    println!("  Entry: {}", report.variant);
    println!("  Final Clock: {}", report.final_clock);
    println!("  Records: {}", report.records.len());
    println!("  Diagnostics: {}", report.diagnostics.len());

    Ok(())
}

/// Display the fixed timing policy
pub fn display_constants() {
    println!("Interrupt timing constants");
    println!();
    for (name, value) in TIMING_CONSTANTS {
        println!("  {:<20} {}", name, value);
    }
}

/// Display version information
pub fn display_version() {
    println!("Interrupt Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Trace-driven interrupt simulator for a simplified CPU/OS.");
}
