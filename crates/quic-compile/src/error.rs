//! Error types for the compilation crate.

use quic_ir::{GateKind, IrError, QubitId};
use thiserror::Error;

/// Errors raised while building a target or fitting a circuit to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// IR error.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// A requested kind acts on more qubits than the target has.
    #[error("Gate '{gate}' needs {arity} qubits but the target has only {num_qubits}")]
    InsufficientQubits {
        /// The offending kind.
        gate: GateKind,
        /// Qubits the kind acts on.
        arity: u32,
        /// Qubits of the target.
        num_qubits: u32,
    },

    /// The circuit uses a kind the target cannot execute or derive.
    #[error("Gate '{0}' is not supported by the target")]
    UnsupportedGate(GateKind),

    /// The kind is supported but not on these qubits.
    #[error("Gate '{gate}' is not allowed on qubits {qubits:?}")]
    IllegalPlacement {
        /// The kind.
        gate: GateKind,
        /// The rejected qubit tuple.
        qubits: Vec<QubitId>,
    },

    /// The circuit is wider than the target.
    #[error("Circuit has {circuit} qubits but the target has only {target}")]
    CircuitTooWide {
        /// Width of the circuit.
        circuit: u32,
        /// Width of the target.
        target: u32,
    },

    /// Invalid synthesis options.
    #[error("Invalid synthesis options: {0}")]
    InvalidOptions(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
