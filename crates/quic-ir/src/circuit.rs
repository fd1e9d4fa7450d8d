//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateDefinition, GateKind};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;
use crate::unitary::Unitary;

/// A quantum circuit: an ordered sequence of instructions over a fixed
/// number of qubits.
///
/// Every instruction is validated when it is added, so each qubit index is
/// below `num_qubits` and gate applications never repeat a qubit.
/// Deserialization replays the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_qubits: u32,
    instructions: Vec<Instruction>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let mut circuit = Circuit::with_size(raw.name, raw.num_qubits);
        for instruction in raw.instructions {
            circuit.push(instruction)?;
        }
        Ok(circuit)
    }
}

impl<'de> Deserialize<'de> for Circuit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCircuit::deserialize(deserializer)?;
        Circuit::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions, barriers included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Gate applications in program order, barriers skipped.
    pub fn applications(&self) -> impl Iterator<Item = (GateKind, &[QubitId])> {
        self.instructions
            .iter()
            .filter_map(|inst| inst.gate_kind().map(|kind| (kind, inst.qubits.as_slice())))
    }

    /// Count applications per gate kind.
    pub fn count_ops(&self) -> FxHashMap<GateKind, usize> {
        let mut counts = FxHashMap::default();
        for (kind, _) in self.applications() {
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }

    /// Append an instruction after validating its operands.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append an application of `kind` to `qubits` (controls first).
    pub fn apply(
        &mut self,
        kind: GateKind,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(kind, qubits))
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.gate_kind().map(|k| k.host_name().to_string());

        if let InstructionKind::Gate(kind) = instruction.kind {
            let got = instruction.qubits.len() as u32;
            if got != kind.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: kind.host_name().to_string(),
                    expected: kind.num_qubits(),
                    got,
                });
            }
        }

        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name,
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit { qubit, gate_name });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::I, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Z, [qubit])
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::H, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::S, [qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Sdg, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::T, [qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Tdg, [qubit])
    }

    /// Apply the eighth-turn phase gate `P(π/4)`.
    pub fn p45(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::P45, [qubit])
    }

    /// Apply the inverse eighth-turn phase gate `P(−π/4)`.
    pub fn pdg45(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Pdg45, [qubit])
    }

    // =========================================================================
    // Controlled gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CX, [control, target])
    }

    /// Apply Toffoli gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CCX, [c1, c2, target])
    }

    /// Apply controlled-S gate.
    pub fn cs(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CS, [control, target])
    }

    /// Apply controlled-S-dagger gate.
    pub fn csdg(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CSdg, [control, target])
    }

    /// Apply controlled eighth-turn phase gate.
    pub fn cp45(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CP45, [control, target])
    }

    /// Apply controlled inverse eighth-turn phase gate.
    pub fn cpdg45(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CPdg45, [control, target])
    }

    /// Apply controlled-T gate.
    pub fn ct(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CT, [control, target])
    }

    /// Apply controlled-T-dagger gate.
    pub fn ctdg(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CTdg, [control, target])
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit in the computational basis.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit))
    }

    /// Measure every qubit, in index order.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for q in 0..self.num_qubits {
            self.measure(QubitId(q))?;
        }
        Ok(self)
    }

    /// Apply a barrier to the specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Dense unitary of the circuit. Measurements and barriers are skipped.
    pub fn unitary(&self) -> IrResult<Unitary> {
        let mut unitary = Unitary::identity(self.num_qubits)?;
        for (kind, qubits) in self.applications() {
            let GateDefinition::Unitary { controls, matrix } = kind.definition() else {
                continue;
            };
            let split = controls as usize;
            let controls: Vec<usize> = qubits[..split].iter().map(|q| q.index()).collect();
            unitary.apply_controlled(&controls, qubits[split].index(), &matrix);
        }
        Ok(unitary)
    }

    // =========================================================================
    // Common circuits
    // =========================================================================

    /// Create a Bell state circuit with measurements.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2);
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        circuit.h(q0)?.cx(q0, q1)?.measure(q0)?.measure(q1)?;

        Ok(circuit)
    }

    /// Create a GHZ state circuit with measurements.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size(format!("ghz_{n}"), n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all()?;

        Ok(circuit)
    }
}
