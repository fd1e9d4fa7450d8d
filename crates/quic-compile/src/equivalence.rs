//! Derived-gate equivalence rules.
//!
//! An endpoint that offers the eighth-turn phase `P` but not `S` can still
//! run `S`, because `P ; P ≡ S`. The target records such facts as
//! [`EquivalenceRule`]s so the synthesis step may use the derived kind and
//! expand it afterwards. Only pair compositions on a single qubit are
//! derived.

use serde::{Deserialize, Serialize};

use quic_ir::{GateKind, Instruction, QubitId};

/// `derived` on a qubit equals applying every kind of `sequence` to that
/// qubit in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceRule {
    /// The kind the rule makes available.
    pub derived: GateKind,
    /// Its realisation in supported kinds.
    pub sequence: Vec<GateKind>,
}

impl EquivalenceRule {
    /// `derived ≡ base ; base`.
    pub fn square(derived: GateKind, base: GateKind) -> Self {
        Self {
            derived,
            sequence: vec![base, base],
        }
    }

    /// The instructions replacing one application of `derived` on `qubit`.
    pub fn expand(&self, qubit: QubitId) -> Vec<Instruction> {
        self.sequence
            .iter()
            .map(|&kind| Instruction::gate(kind, [qubit]))
            .collect()
    }
}

/// Rules available for a set of requested kinds.
///
/// `P` without `S` yields `S ≡ P ; P`, and `p` without `s` yields
/// `s ≡ p ; p`.
pub fn derive_rules(kinds: &[GateKind]) -> Vec<EquivalenceRule> {
    const SQUARES: [(GateKind, GateKind); 2] = [
        (GateKind::S, GateKind::P45),
        (GateKind::Sdg, GateKind::Pdg45),
    ];

    SQUARES
        .iter()
        .filter(|(derived, base)| kinds.contains(base) && !kinds.contains(derived))
        .map(|&(derived, base)| EquivalenceRule::square(derived, base))
        .collect()
}
