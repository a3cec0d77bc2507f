//! Simulate command implementation.
//!
//! The simulate command:
//! 1. Loads the vector and device tables
//! 2. Reads the trace
//! 3. Builds the timeline
//! 4. Writes the execution log (and optional JSON report)

use super::models::SimulateArgs;
use crate::output::{to_report, write_report, TextFileSink};
use crate::parser::read_trace_file;
use crate::simulator::{SimulationOutcome, Simulator};
use crate::tables::load_tables;
use crate::timeline::generate_text_summary;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the simulate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Missing or unreadable table/trace files
/// * Output write errors
/// * Any diagnostic when `strict` is set
pub fn execute_simulate(args: SimulateArgs) -> Result<SimulationOutcome> {
    let start_time = Instant::now();

    info!("Starting simulation of: {}", args.trace.display());

    info!("Step 1/4: Loading device tables...");
    let tables = load_tables(&args.vector_table, &args.device_table)
        .context("Failed to load device tables")?;

    info!("Step 2/4: Reading trace...");
    let lines = read_trace_file(&args.trace).context("Failed to read trace")?;

    info!("Step 3/4: Building timeline ({} entry)...", args.variant);
    let mut sink = TextFileSink::new(&args.output);
    let outcome = Simulator::new(&tables)
        .with_variant(args.variant)
        .run_into(&lines, &mut sink)
        .context("Failed to write execution log")?;

    info!("✓ Execution log written to: {}", sink.path().display());

    info!("Step 4/4: Writing report...");
    if let Some(report_path) = &args.report {
        let report = to_report(&outcome, &args.trace.display().to_string());
        write_report(&report, report_path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", report_path.display());
    } else {
        debug!("No report requested");
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(48));
        println!("SIMULATION SUMMARY");
        println!("{}", "=".repeat(48));
        println!("Trace:   {}", args.trace.display());
        println!("Entry:   {}", outcome.variant);
        println!("Records: {}", outcome.log.len());
        println!("\n{}", generate_text_summary(&outcome.summary));
        for diagnostic in &outcome.diagnostics {
            println!("  line {}: {}", diagnostic.line, diagnostic.message);
        }
        println!("{}", "=".repeat(48));
    }

    if args.strict && !outcome.diagnostics.is_empty() {
        anyhow::bail!(
            "{} trace line(s) could not be simulated (strict mode)",
            outcome.diagnostics.len()
        );
    }

    let elapsed = start_time.elapsed();
    info!("Simulation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(outcome)
}

/// Validate simulate arguments
///
/// **Public** - can be called before execute_simulate for early validation
pub fn validate_args(args: &SimulateArgs) -> Result<()> {
    for (name, path) in [
        ("Vector table", &args.vector_table),
        ("Device table", &args.device_table),
        ("Trace", &args.trace),
    ] {
        if path.as_os_str().is_empty() {
            anyhow::bail!("{} path cannot be empty", name);
        }
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output == args.trace {
        anyhow::bail!("Output path would overwrite the trace");
    }

    if let Some(report) = &args.report {
        if report == &args.output {
            anyhow::bail!("Report path must differ from the execution log path");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_defaults() {
        assert!(validate_args(&SimulateArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_trace() {
        let args = SimulateArgs {
            trace: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_overwrites_trace() {
        let args = SimulateArgs {
            trace: PathBuf::from("run.txt"),
            output: PathBuf::from("run.txt"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_report_same_as_output() {
        let args = SimulateArgs {
            report: Some(PathBuf::from("execution.txt")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
