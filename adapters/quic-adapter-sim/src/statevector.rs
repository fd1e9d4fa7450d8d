//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use quic_ir::{GateDefinition, GateKind, QubitId, Unitary2x2};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// A statevector representing a quantum state.
///
/// Amplitude index bit `i` is the value of qubit `i`.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Apply a unitary gate. The qubit tuple is controls first, target last.
    ///
    /// Measurements are not unitary and are ignored here; see
    /// [`Statevector::measure`].
    pub fn apply(&mut self, kind: GateKind, qubits: &[QubitId]) {
        let GateDefinition::Unitary { matrix, .. } = kind.definition() else {
            return;
        };
        let Some((target, controls)) = qubits.split_last() else {
            return;
        };
        let control_mask = controls.iter().fold(0, |mask, q| mask | (1 << q.index()));
        self.apply_controlled(control_mask, target.index(), &matrix);
    }

    /// Apply `matrix` to `target` on the subspace where every bit of
    /// `control_mask` is set.
    fn apply_controlled(&mut self, control_mask: usize, target: usize, matrix: &Unitary2x2) {
        let tgt_mask = 1 << target;
        let [m00, m01, m10, m11] = matrix.data;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask != 0 || i & control_mask != control_mask {
                continue;
            }
            let j = i | tgt_mask;
            let a = self.amplitudes[i];
            let b = self.amplitudes[j];
            self.amplitudes[i] = m00 * a + m01 * b;
            self.amplitudes[j] = m10 * a + m11 * b;
        }
    }

    /// Probability of reading 1 on `qubit`.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Measure `qubit` in the computational basis and collapse the state.
    pub fn measure(&mut self, qubit: usize, rng: &mut impl Rng) -> bool {
        let p1 = self.probability_one(qubit);
        let r: f64 = rng.r#gen();
        let outcome = r < p1;

        let mask = 1 << qubit;
        let kept = if outcome { p1 } else { 1.0 - p1 };
        let norm = kept.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) != outcome {
                *amp = ZERO;
            } else if norm > 0.0 {
                *amp /= norm;
            }
        }
        outcome
    }
}
