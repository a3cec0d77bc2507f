//! Interrupt Trace CLI
//!
//! Simulates interrupt handling for a trace of CPU/device activity and
//! writes a timed execution log.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use interrupt_trace::commands::{
    display_constants, display_version, execute_simulate, validate_args, validate_report_file,
    SimulateArgs,
};
use interrupt_trace::timeline::EntryVariant;
use interrupt_trace::utils::config::{
    DEFAULT_DEVICE_TABLE, DEFAULT_OUTPUT_FILE, DEFAULT_TRACE_FILE, DEFAULT_VECTOR_TABLE,
    ENV_DEVICE_TABLE, ENV_OUTPUT_FILE, ENV_TRACE_FILE, ENV_VECTOR_TABLE,
};
use std::path::PathBuf;

/// Interrupt Trace - timed execution logs for simulated interrupts
#[derive(Parser, Debug)]
#[command(name = "interrupt-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a trace and write the execution log
    Simulate {
        /// Vector table: one ISR address per line
        #[arg(long, env = ENV_VECTOR_TABLE, default_value = DEFAULT_VECTOR_TABLE)]
        vectors: PathBuf,

        /// Device table: one average service delay per line
        #[arg(long, env = ENV_DEVICE_TABLE, default_value = DEFAULT_DEVICE_TABLE)]
        devices: PathBuf,

        /// Trace file to simulate
        #[arg(short, long, env = ENV_TRACE_FILE, default_value = DEFAULT_TRACE_FILE)]
        trace: PathBuf,

        /// Output path for the execution log
        #[arg(short, long, env = ENV_OUTPUT_FILE, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Output path for a JSON report (optional)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Use the kernel-entry sequence (mode switch, vector lookup, PC load)
        #[arg(long)]
        kernel_entry: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Exit with an error if any trace line was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the timing constants
    Constants,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Simulate {
            vectors,
            devices,
            trace,
            output,
            report,
            kernel_entry,
            summary,
            strict,
        } => {
            let variant = if kernel_entry {
                EntryVariant::KernelEntry
            } else {
                EntryVariant::Plain
            };

            let args = SimulateArgs {
                vector_table: vectors,
                device_table: devices,
                trace,
                output,
                report,
                variant,
                print_summary: summary,
                strict,
            };

            validate_args(&args)?;
            execute_simulate(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Constants => {
            display_constants();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
