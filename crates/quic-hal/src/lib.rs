//! QuiC Hardware Abstraction Layer
//!
//! This crate connects circuits to QuiC execution endpoints: it turns a
//! circuit into a wire string, runs it shot by shot through an
//! [`ExecutionTransport`], and aggregates the outcomes into a histogram.
//!
//! # Overview
//!
//! - [`ExecutionTransport`]: the endpoint seam (describe, run one shot)
//! - [`QuicBackend`]: one connected endpoint with its [`CapabilitySet`](quic_compile::CapabilitySet),
//!   synthesis pass and job table
//! - [`Job`]: the `Initializing → Running → Done | Error` state machine,
//!   with polling ([`Job::result`]) and signalled ([`Job::wait`]) retrieval
//! - [`Provider`]: connected backends by name
//! - [`BackendConfig`]: shots, seeding, polling and synthesis settings
//!
//! # Bit order
//!
//! Endpoints answer each shot with an integer whose bit `i` is qubit `i`.
//! Bit strings in [`Counts`] are written qubit 0 first, so `"10"` means
//! qubit 0 measured 1 and qubit 1 measured 0.
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use std::sync::Arc;
//! use quic_adapter_sim::LocalEndpoint;
//! use quic_hal::{BackendConfig, QuicBackend, RunOptions};
//! use quic_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let endpoint = Arc::new(LocalEndpoint::new(2));
//!     let backend = QuicBackend::connect(endpoint, BackendConfig::default()).await?;
//!
//!     let job = backend.run(&Circuit::bell()?, RunOptions::default().with_shots(100))?;
//!     let result = job.wait(None).await?;
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {bitstring} ({count} times)");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Transport
//!
//! ```ignore
//! use async_trait::async_trait;
//! use quic_hal::{EndpointInfo, ExecutionTransport, HalResult};
//!
//! struct MyEndpoint;
//!
//! #[async_trait]
//! impl ExecutionTransport for MyEndpoint {
//!     async fn describe(&self) -> HalResult<EndpointInfo> {
//!         Ok(EndpointInfo {
//!             name: "my_endpoint".into(),
//!             num_qubits: 5,
//!             gate_names: vec!["X".into(), "H".into(), "CN".into(), "m".into()],
//!         })
//!     }
//!
//!     async fn run_script(&self, num_qubits: u32, script: &str, seed: u64) -> HalResult<u64> {
//!         todo!("send the script to the endpoint")
//!     }
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod job;
pub mod provider;
pub mod result;
pub mod transport;

pub use backend::{QuicBackend, RunOptions};
pub use config::BackendConfig;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobInfo, JobSpec, JobStatus, RetrievalOptions, SEED_BOUND};
pub use provider::Provider;
pub use result::{Counts, ExecutionResult, outcome_to_bitstring};
pub use transport::{EndpointInfo, ExecutionTransport};
