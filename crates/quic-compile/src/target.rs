//! The capability model of one endpoint.
//!
//! A [`CapabilitySet`] answers "may kind `k` run on qubits `(a, b, …)`?".
//! QuiC endpoints are fully connected, so every ordered tuple of distinct
//! qubits of the right length is a legal placement for every requested
//! kind.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

use quic_ir::{Circuit, GateKind, GateRegistry, QubitId};

use crate::equivalence::{EquivalenceRule, derive_rules};
use crate::error::{CompileError, CompileResult};

/// Endpoint gate names kept for older deployments.
const LEGACY_GATE_NAMES: [(&str, GateKind); 4] = [
    ("P45", GateKind::P45),
    ("p45", GateKind::Pdg45),
    ("CP45", GateKind::CP45),
    ("Cp45", GateKind::CPdg45),
];

/// Legal (kind, qubit tuple) pairs for a fixed number of qubits.
///
/// Built once per endpoint connection and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilitySet {
    num_qubits: u32,
    kinds: Vec<GateKind>,
    placements: FxHashMap<GateKind, Vec<Vec<QubitId>>>,
    #[serde(skip)]
    legal: FxHashSet<(GateKind, Vec<QubitId>)>,
    equivalences: Vec<EquivalenceRule>,
    approximation_basis: Vec<GateKind>,
}

impl CapabilitySet {
    /// Build the target for `kinds` on `num_qubits` fully connected qubits.
    ///
    /// Repeated kinds are ignored. Fails with
    /// [`CompileError::InsufficientQubits`] if any kind acts on more qubits
    /// than the target has.
    pub fn new(kinds: impl IntoIterator<Item = GateKind>, num_qubits: u32) -> CompileResult<Self> {
        let mut requested: Vec<GateKind> = vec![];
        for kind in kinds {
            if !requested.contains(&kind) {
                requested.push(kind);
            }
        }

        let mut placements = FxHashMap::default();
        let mut legal = FxHashSet::default();
        for &kind in &requested {
            let arity = kind.num_qubits();
            if arity > num_qubits {
                return Err(CompileError::InsufficientQubits {
                    gate: kind,
                    arity,
                    num_qubits,
                });
            }
            let tuples = permutations(num_qubits, arity as usize);
            for tuple in &tuples {
                legal.insert((kind, tuple.clone()));
            }
            placements.insert(kind, tuples);
        }

        let equivalences = derive_rules(&requested);
        let mut approximation_basis: Vec<GateKind> = requested
            .iter()
            .copied()
            .filter(|k| k.num_qubits() == 1 && k.is_approximation_eligible())
            .collect();
        for rule in &equivalences {
            debug!(derived = %rule.derived, sequence = ?rule.sequence, "Registered equivalence rule");
            approximation_basis.push(rule.derived);
        }

        Ok(Self {
            num_qubits,
            kinds: requested,
            placements,
            legal,
            equivalences,
            approximation_basis,
        })
    }

    /// Build the target from the gate names an endpoint reports.
    ///
    /// Names are wire symbols; `P45`, `p45`, `CP45` and `Cp45` are accepted
    /// as aliases of `P`, `p`, `CP` and `Cp`.
    pub fn from_endpoint_names<S: AsRef<str>>(
        names: impl IntoIterator<Item = S>,
        num_qubits: u32,
    ) -> CompileResult<Self> {
        let kinds = names
            .into_iter()
            .map(|name| resolve_endpoint_gate_name(name.as_ref()))
            .collect::<CompileResult<Vec<_>>>()?;
        Self::new(kinds, num_qubits)
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Requested kinds, in request order.
    pub fn kinds(&self) -> &[GateKind] {
        &self.kinds
    }

    /// Whether `kind` was requested.
    pub fn supports(&self, kind: GateKind) -> bool {
        self.placements.contains_key(&kind)
    }

    /// All legal qubit tuples for `kind`, in lexicographic order.
    pub fn placements(&self, kind: GateKind) -> Option<&[Vec<QubitId>]> {
        self.placements.get(&kind).map(Vec::as_slice)
    }

    /// Whether `kind` may run on `qubits`.
    pub fn is_legal(&self, kind: GateKind, qubits: &[QubitId]) -> bool {
        self.legal.contains(&(kind, qubits.to_vec()))
    }

    /// Derived-gate rules.
    pub fn equivalences(&self) -> &[EquivalenceRule] {
        &self.equivalences
    }

    /// The rule deriving `kind`, if any.
    pub fn equivalence_for(&self, kind: GateKind) -> Option<&EquivalenceRule> {
        self.equivalences.iter().find(|rule| rule.derived == kind)
    }

    /// Single-qubit kinds the synthesis step may build approximations from.
    pub fn approximation_basis(&self) -> &[GateKind] {
        &self.approximation_basis
    }

    /// Check that every application of `circuit` is a legal placement.
    ///
    /// Barriers are ignored; they never reach the endpoint.
    pub fn validate(&self, circuit: &Circuit) -> CompileResult<()> {
        if circuit.num_qubits() > self.num_qubits {
            return Err(CompileError::CircuitTooWide {
                circuit: circuit.num_qubits(),
                target: self.num_qubits,
            });
        }
        for (kind, qubits) in circuit.applications() {
            if !self.supports(kind) {
                return Err(CompileError::UnsupportedGate(kind));
            }
            if !self.is_legal(kind, qubits) {
                return Err(CompileError::IllegalPlacement {
                    gate: kind,
                    qubits: qubits.to_vec(),
                });
            }
        }
        Ok(())
    }
}

/// Map an endpoint gate name to its kind.
pub fn resolve_endpoint_gate_name(name: &str) -> CompileResult<GateKind> {
    if let Some(&(_, kind)) = LEGACY_GATE_NAMES.iter().find(|(legacy, _)| *legacy == name) {
        return Ok(kind);
    }
    Ok(GateRegistry::builtin().lookup_by_wire_symbol(name)?)
}

/// Every ordered tuple of `k` distinct qubits from `0..n`.
fn permutations(n: u32, k: usize) -> Vec<Vec<QubitId>> {
    fn extend(n: u32, k: usize, current: &mut Vec<QubitId>, out: &mut Vec<Vec<QubitId>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for q in (0..n).map(QubitId) {
            if !current.contains(&q) {
                current.push(q);
                extend(n, k, current, out);
                current.pop();
            }
        }
    }

    let mut out = vec![];
    extend(n, k, &mut Vec::with_capacity(k), &mut out);
    out
}
