//! Circuit instructions combining gate kinds with operands.

use serde::{Deserialize, Serialize};

use crate::gate::GateKind;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Application of a registered gate kind (measurement included).
    Gate(GateKind),
    /// Scheduling barrier. Produces no wire layer.
    Barrier,
}

/// A complete instruction with operands.
///
/// For a gate application the qubit tuple is ordered: controls first, the
/// target last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate application.
    pub fn gate(kind: GateKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(kind),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a measurement of one qubit.
    pub fn measure(qubit: QubitId) -> Self {
        Self::gate(GateKind::Measure, [qubit])
    }

    /// Create a barrier over `qubits`.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// The gate kind, or `None` for a barrier.
    pub fn gate_kind(&self) -> Option<GateKind> {
        match self.kind {
            InstructionKind::Gate(kind) => Some(kind),
            InstructionKind::Barrier => None,
        }
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        self.gate_kind().is_some_and(GateKind::is_measurement)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> &'static str {
        match self.kind {
            InstructionKind::Gate(kind) => kind.host_name(),
            InstructionKind::Barrier => "barrier",
        }
    }
}
