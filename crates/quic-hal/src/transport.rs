//! The execution transport seam.
//!
//! A QuiC endpoint runs one shot per call: it receives the qubit count, the
//! wire string and a seed, and answers with the measured register as an
//! integer whose bit `i` is qubit `i`. How the call reaches the endpoint
//! (in-process simulator, RPC, contract call) is the transport's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HalResult;

/// What an endpoint reports about itself on connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// Endpoint name, used as the backend name.
    pub name: String,
    /// Number of qubits the endpoint can allocate.
    pub num_qubits: u32,
    /// Supported gates as wire symbols (legacy `P45`-style names allowed).
    pub gate_names: Vec<String>,
}

/// A connection to one execution endpoint.
///
/// Implementations must be safe to call from many jobs at once; each call
/// is an independent shot.
#[async_trait]
pub trait ExecutionTransport: Send + Sync {
    /// Describe the endpoint.
    async fn describe(&self) -> HalResult<EndpointInfo>;

    /// Execute `script` once on `num_qubits` qubits with `seed`, returning
    /// the raw measurement register.
    ///
    /// Failures should be reported as [`HalError::Transport`](crate::HalError::Transport).
    async fn run_script(&self, num_qubits: u32, script: &str, seed: u64) -> HalResult<u64>;
}
