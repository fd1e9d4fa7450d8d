//! Property-based tests for the gate registry and circuit builder.

use proptest::prelude::*;
use quic_ir::{Circuit, EPSILON, GateKind, GateRegistry, IrError, QubitId, Unitary};

fn arb_kind() -> impl Strategy<Value = GateKind> {
    prop::sample::select(GateKind::ALL.to_vec())
}

/// Randomly upper/lower-cases each ASCII letter of `s`.
fn arb_case(s: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), s.len()).prop_map(move |flips| {
        s.chars()
            .zip(flips)
            .map(|(c, upper)| {
                if upper {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    })
}

proptest! {
    /// Every name of a kind resolves back to it.
    #[test]
    fn names_resolve_to_their_kind(kind in arb_kind()) {
        let registry = GateRegistry::builtin();
        prop_assert_eq!(registry.lookup_by_wire_symbol(kind.wire_symbol()).unwrap(), kind);
        prop_assert_eq!(registry.lookup_by_canonical_id(kind.canonical_id()).unwrap(), kind);
        prop_assert_eq!(registry.lookup_by_host_name(kind.host_name()).unwrap(), kind);
    }

    /// Canonical id lookup ignores case.
    #[test]
    fn canonical_ids_ignore_case(
        (kind, id) in arb_kind().prop_flat_map(|k| (Just(k), arb_case(k.canonical_id())))
    ) {
        prop_assert_eq!(GateKind::from_canonical_id(&id).unwrap(), kind);
    }

    /// A unitary kind followed by its inverse is the identity.
    #[test]
    fn inverse_cancels(kind in arb_kind()) {
        prop_assume!(!kind.is_measurement());
        let inverse = kind.inverse().unwrap();
        let qubits: Vec<QubitId> = (0..kind.num_qubits()).rev().map(QubitId).collect();

        let mut circuit = Circuit::with_size("inverse", kind.num_qubits());
        circuit.apply(kind, qubits.iter().copied()).unwrap();
        circuit.apply(inverse, qubits.iter().copied()).unwrap();

        let identity = Unitary::identity(kind.num_qubits()).unwrap();
        prop_assert!(circuit.unitary().unwrap().equiv(&identity, EPSILON));
    }

    /// Qubits at or beyond the width are rejected.
    #[test]
    fn out_of_range_qubits_rejected(width in 1_u32..6, offset in 0_u32..4) {
        let mut circuit = Circuit::with_size("range", width);
        let result = circuit.x(QubitId(width + offset));
        let is_qubit_not_found = matches!(result, Err(IrError::QubitNotFound { .. }));
        prop_assert!(is_qubit_not_found);
        prop_assert!(circuit.is_empty());
    }
}
