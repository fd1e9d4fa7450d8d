//! Unitary matrix utilities.
//!
//! [`Unitary2x2`] holds the target-role matrix of every registered gate kind,
//! and [`Unitary`] is the dense `2^n × 2^n` matrix of a whole circuit, used
//! to check that two circuits agree up to a global phase.
//!
//! Basis-state indices are little-endian: bit `i` of an index is the value
//! of qubit `i`.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{IrError, IrResult};

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Widest circuit for which a dense unitary is built.
pub const MAX_DENSE_QUBITS: u32 = 12;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub const fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub const fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub const fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Create a Pauli-Y matrix.
    pub const fn y() -> Self {
        Self::new(
            ZERO,
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            ZERO,
        )
    }

    /// Create a Pauli-Z matrix.
    pub const fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::new(-1.0, 0.0))
    }

    /// Create a phase gate `diag(1, e^{iλ})`.
    pub fn p(lambda: f64) -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, lambda))
    }

    /// Matrix product `self · other`.
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() < tol)
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// Dense unitary of an `n`-qubit circuit, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Unitary {
    num_qubits: u32,
    dim: usize,
    data: Vec<Complex64>,
}

impl Unitary {
    /// The `2^n × 2^n` identity.
    pub fn identity(num_qubits: u32) -> IrResult<Self> {
        if num_qubits > MAX_DENSE_QUBITS {
            return Err(IrError::TooManyQubits(num_qubits));
        }
        let dim = 1usize << num_qubits;
        let mut data = vec![ZERO; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = ONE;
        }
        Ok(Self {
            num_qubits,
            dim,
            data,
        })
    }

    /// Number of qubits the matrix acts on.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Matrix dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Left-multiply by `matrix` acting on `target`, conditioned on every
    /// qubit in `controls` being `|1⟩`.
    ///
    /// Indices must be distinct and below `num_qubits`; the circuit builder
    /// guarantees both.
    pub fn apply_controlled(&mut self, controls: &[usize], target: usize, matrix: &Unitary2x2) {
        let control_mask = controls.iter().fold(0usize, |mask, &c| mask | (1 << c));
        let target_mask = 1usize << target;
        let [m00, m01, m10, m11] = matrix.data;

        for row in 0..self.dim {
            if row & target_mask != 0 || row & control_mask != control_mask {
                continue;
            }
            let partner = row | target_mask;
            for col in 0..self.dim {
                let a = self.data[row * self.dim + col];
                let b = self.data[partner * self.dim + col];
                self.data[row * self.dim + col] = m00 * a + m01 * b;
                self.data[partner * self.dim + col] = m10 * a + m11 * b;
            }
        }
    }

    /// Whether `self` equals `other` up to a global phase factor.
    pub fn equiv(&self, other: &Self, tol: f64) -> bool {
        if self.num_qubits != other.num_qubits {
            return false;
        }

        // Fix the phase on the largest element of `other`.
        let Some((pivot, reference)) = other
            .data
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
        else {
            return true;
        };
        if reference.norm() < tol {
            return self.data.iter().all(|v| v.norm() < tol);
        }

        let phase = self.data[pivot] / reference;
        if (phase.norm() - 1.0).abs() > tol {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - phase * b).norm() < tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_phase_squares() {
        let t = Unitary2x2::p(PI / 4.0);
        let s = Unitary2x2::p(PI / 2.0);
        assert!((t * t).approx_eq(&s, EPSILON));
        assert!((s * s).approx_eq(&Unitary2x2::z(), EPSILON));
    }

    #[test]
    fn test_dagger_inverts() {
        let t = Unitary2x2::p(PI / 4.0);
        assert!((t * t.dagger()).approx_eq(&Unitary2x2::identity(), EPSILON));
        let h = Unitary2x2::h();
        assert!((h * h).approx_eq(&Unitary2x2::identity(), EPSILON));
    }

    #[test]
    fn test_apply_x_on_qubit_one() {
        let mut u = Unitary::identity(2).unwrap();
        u.apply_controlled(&[], 1, &Unitary2x2::x());
        // |00⟩ (index 0) maps to |q1=1⟩ (index 2).
        assert_eq!(u.get(2, 0), ONE);
        assert_eq!(u.get(0, 0), ZERO);
    }

    #[test]
    fn test_controlled_x_respects_control() {
        let mut u = Unitary::identity(2).unwrap();
        u.apply_controlled(&[0], 1, &Unitary2x2::x());
        // Control q0 clear: |00⟩ unchanged.
        assert_eq!(u.get(0, 0), ONE);
        // Control q0 set: index 1 (q0=1) maps to index 3.
        assert_eq!(u.get(3, 1), ONE);
        assert_eq!(u.get(1, 1), ZERO);
    }

    #[test]
    fn test_equiv_ignores_global_phase() {
        let mut a = Unitary::identity(1).unwrap();
        a.apply_controlled(&[], 0, &Unitary2x2::z());
        let mut b = Unitary::identity(1).unwrap();
        let minus_z = Unitary2x2::new(
            Complex64::new(-1.0, 0.0),
            ZERO,
            ZERO,
            Complex64::new(1.0, 0.0),
        );
        b.apply_controlled(&[], 0, &minus_z);
        assert!(a.equiv(&b, 1e-9));

        let mut c = Unitary::identity(1).unwrap();
        c.apply_controlled(&[], 0, &Unitary2x2::x());
        assert!(!a.equiv(&c, 1e-9));
    }

    #[test]
    fn test_width_limit() {
        assert_eq!(
            Unitary::identity(MAX_DENSE_QUBITS + 1),
            Err(IrError::TooManyQubits(MAX_DENSE_QUBITS + 1))
        );
    }
}
