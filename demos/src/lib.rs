//! QuiC Demo Suite
//!
//! Runs small circuits end to end on the in-process endpoint:
//!
//! - **Scenario**: `X(q0); CX(q0, q1); measure both`, always `"11"`
//! - **Bell pair**: `H(q0); CX(q0, q1); measure both`, `"00"` or `"11"`
//! - **Raw wire script**: any well-formed wire string

use std::sync::Arc;

use console::style;
use serde::Serialize;
use tracing::info;

use quic_adapter_sim::LocalEndpoint;
use quic_hal::{BackendConfig, ExecutionResult, HalResult, QuicBackend, RunOptions};
use quic_ir::{Circuit, IrResult, QubitId};

/// What to run.
#[derive(Debug, Clone)]
pub enum Workload {
    /// A circuit, synthesized and encoded by the backend.
    Circuit(Circuit),
    /// An already encoded wire string.
    Wire(String),
}

/// Summary of one demo run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Backend the job ran on.
    pub backend: String,
    /// The job identifier.
    pub job_id: String,
    /// Wire string sent to the endpoint.
    pub wire: String,
    /// Number of shots.
    pub shots: u32,
    /// Job seed.
    pub seed: u64,
    /// Outcomes, most frequent first.
    pub counts: Vec<(String, u64)>,
    /// Execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl RunReport {
    fn new(wire: String, result: &ExecutionResult) -> Self {
        Self {
            backend: result.backend_name.clone(),
            job_id: result.job_id.to_string(),
            wire,
            shots: result.shots,
            seed: result.seed,
            counts: result
                .counts
                .sorted()
                .into_iter()
                .map(|(bitstring, &count)| (bitstring.clone(), count))
                .collect(),
            execution_time_ms: result.execution_time_ms,
        }
    }
}

/// `X(q0); CX(q0, q1); measure(q0); measure(q1)`.
pub fn scenario_circuit() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("scenario", 2);
    circuit
        .x(QubitId(0))?
        .cx(QubitId(0), QubitId(1))?
        .measure(QubitId(0))?
        .measure(QubitId(1))?;
    Ok(circuit)
}

/// Connect to a local endpoint of `num_qubits` qubits and run `workload`.
pub async fn run_local(
    workload: Workload,
    num_qubits: u32,
    shots: Option<u32>,
    config: BackendConfig,
) -> HalResult<RunReport> {
    let endpoint = Arc::new(LocalEndpoint::new(num_qubits));
    let backend = QuicBackend::connect(endpoint, config).await?;
    let options = RunOptions {
        shots,
        add_measurements: false,
    };

    let job = match &workload {
        Workload::Circuit(circuit) => backend.run(circuit, options)?,
        Workload::Wire(script) => backend.run_wire_script(script, options)?,
    };
    info!(job_id = %job.id(), wire = %job.wire(), "Submitted demo job");

    let result = job.result(backend.config().retrieval_options()).await?;
    Ok(RunReport::new(job.wire().to_string(), &result))
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a report as text.
pub fn print_report(report: &RunReport) {
    print_section("Job");
    print_result("Backend", &report.backend);
    print_result("Job ID", &report.job_id);
    print_result("Wire", &report.wire);
    print_result("Shots", report.shots);
    print_result("Seed", report.seed);
    if let Some(ms) = report.execution_time_ms {
        print_result("Execution time", format!("{ms} ms"));
    }

    print_section("Histogram (qubit 0 first)");
    let width = report.counts.iter().map(|(b, _)| b.len()).max().unwrap_or(0);
    for (bitstring, count) in &report.counts {
        let bar = "█".repeat((40 * count / u64::from(report.shots.max(1))) as usize);
        println!("  {bitstring:>width$}  {count:>6}  {}", style(bar).cyan());
    }
}
