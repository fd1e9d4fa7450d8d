//! Bell Pair Demo
//!
//! Encodes a small circuit, runs it on the local QuiC endpoint and prints
//! the histogram.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use quic_demos::{
    RunReport, Workload, print_header, print_report, print_success, run_local, scenario_circuit,
};
use quic_hal::BackendConfig;
use quic_ir::Circuit;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// X(q0); CX(q0, q1); measure both
    Scenario,
    /// H(q0); CX(q0, q1); measure both
    Bell,
}

#[derive(Parser, Debug)]
#[command(name = "demo-bell")]
#[command(about = "Run a two-qubit circuit on the local QuiC endpoint")]
struct Args {
    /// Circuit to run
    #[arg(short, long, value_enum, default_value = "bell")]
    preset: Preset,

    /// Run this wire string instead of a preset
    #[arg(short, long)]
    wire: Option<String>,

    /// Number of shots (defaults to the configured default_shots)
    #[arg(short, long)]
    shots: Option<u32>,

    /// Backend seed
    #[arg(long)]
    seed: Option<u64>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Qubits allocated by the local endpoint
    #[arg(long, default_value = "2")]
    qubits: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = BackendConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    // Local shots finish in microseconds.
    config.poll_interval_ms = config.poll_interval_ms.min(10);

    let workload = match (args.wire, args.preset) {
        (Some(wire), _) => Workload::Wire(wire),
        (None, Preset::Scenario) => Workload::Circuit(scenario_circuit()?),
        (None, Preset::Bell) => Workload::Circuit(Circuit::bell()?),
    };

    let report: RunReport = run_local(workload, args.qubits, args.shots, config).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print_header("QuiC Bell Pair Demo");
            print_report(&report);
            println!();
            print_success("Demo complete!");
        }
    }
    Ok(())
}
