//! QuiC Local Statevector Endpoint
//!
//! This crate provides an in-process QuiC endpoint for testing, development
//! and small experiments. It implements [`ExecutionTransport`](quic_hal::ExecutionTransport)
//! by decoding the wire string and running it on a full statevector, so it
//! is limited to [`MAX_QUBITS`] qubits.
//!
//! # Features
//!
//! - **Every registered gate**: reports all wire symbols on `describe`
//! - **Seeded measurement**: each `m` samples and collapses with a PRNG
//!   seeded by the shot seed
//! - **Endpoint register convention**: bit `i` of the returned integer is
//!   qubit `i`'s last measured value
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quic_adapter_sim::LocalEndpoint;
//! use quic_hal::{BackendConfig, QuicBackend, RunOptions};
//! use quic_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = QuicBackend::connect(Arc::new(LocalEndpoint::new(2)), BackendConfig::default()).await?;
//!
//!     let job = backend.run(&Circuit::bell()?, RunOptions::default().with_shots(1000))?;
//!     let result = job.wait(None).await?;
//!
//!     // Expect ~50% "00" and ~50% "11"
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod endpoint;
mod statevector;

pub use endpoint::{DEFAULT_NAME, LocalEndpoint, MAX_QUBITS};
