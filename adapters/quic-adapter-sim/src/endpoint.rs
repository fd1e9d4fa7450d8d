//! In-process QuiC endpoint.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use quic_hal::{EndpointInfo, ExecutionTransport, HalError, HalResult};
use quic_ir::GateRegistry;

use crate::statevector::Statevector;

/// Name the endpoint reports.
pub const DEFAULT_NAME: &str = "quic_simulator";

/// Widest register the endpoint allocates.
pub const MAX_QUBITS: u32 = 20;

/// Local endpoint.
///
/// Executes wire strings on a statevector, one shot per call. Every `m`
/// samples and collapses its qubit with a PRNG seeded by the shot seed, so
/// a given (script, seed) pair always produces the same register.
#[derive(Debug, Clone)]
pub struct LocalEndpoint {
    name: String,
    num_qubits: u32,
}

impl LocalEndpoint {
    /// Create an endpoint that allocates up to `num_qubits` qubits, capped at
    /// [`MAX_QUBITS`].
    pub fn new(num_qubits: u32) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            num_qubits: num_qubits.min(MAX_QUBITS),
        }
    }

    /// Report a different name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Qubit capacity.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Run one shot of `script` on `num_qubits` qubits.
    ///
    /// Returns the register whose bit `i` is the last value measured on
    /// qubit `i`; unmeasured qubits read 0.
    pub fn execute(&self, num_qubits: u32, script: &str, seed: u64) -> HalResult<u64> {
        if num_qubits > self.num_qubits {
            return Err(HalError::Transport(format!(
                "{num_qubits} qubits requested but {} has {}",
                self.name, self.num_qubits
            )));
        }
        let circuit = quic_wire::decode(script)
            .map_err(|e| HalError::Transport(format!("rejected script: {e}")))?;
        if circuit.num_qubits() > num_qubits {
            return Err(HalError::Transport(format!(
                "script is {} qubits wide but only {num_qubits} were allocated",
                circuit.num_qubits()
            )));
        }

        let mut state = Statevector::new(num_qubits as usize);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut register = 0u64;

        for (kind, qubits) in circuit.applications() {
            if !kind.is_measurement() {
                state.apply(kind, qubits);
                continue;
            }
            let &[qubit] = qubits else {
                continue;
            };
            let bit = 1u64 << qubit.index();
            if state.measure(qubit.index(), &mut rng) {
                register |= bit;
            } else {
                register &= !bit;
            }
        }

        Ok(register)
    }
}

impl Default for LocalEndpoint {
    fn default() -> Self {
        Self::new(MAX_QUBITS)
    }
}

#[async_trait]
impl ExecutionTransport for LocalEndpoint {
    async fn describe(&self) -> HalResult<EndpointInfo> {
        Ok(EndpointInfo {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            gate_names: GateRegistry::builtin()
                .all()
                .iter()
                .map(|kind| kind.wire_symbol().to_string())
                .collect(),
        })
    }

    #[instrument(level = "trace", skip(self, script))]
    async fn run_script(&self, num_qubits: u32, script: &str, seed: u64) -> HalResult<u64> {
        let register = self.execute(num_qubits, script, seed)?;
        debug!(register, "Shot executed");
        Ok(register)
    }
}
