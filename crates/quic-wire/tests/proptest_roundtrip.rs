//! Property-based tests for wire round-trips.
//!
//! Tests that circuit → wire → circuit preserves the unitary, the
//! measurements, and the wire text itself.

use proptest::prelude::*;
use quic_compile::CapabilitySet;
use quic_ir::{Circuit, EPSILON, GateKind, QubitId};
use quic_wire::{WireError, decode, encode};

/// One gate application: a kind and a qubit permutation whose prefix of
/// length `arity` is the qubit tuple.
#[derive(Debug, Clone)]
struct GateOp {
    kind: GateKind,
    order: Vec<u32>,
}

impl GateOp {
    fn apply(&self, circuit: &mut Circuit) {
        let arity = self.kind.num_qubits() as usize;
        let qubits = self.order[..arity].iter().map(|&q| QubitId(q));
        circuit.apply(self.kind, qubits).unwrap();
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let kinds: Vec<GateKind> = GateKind::ALL
        .into_iter()
        .filter(|k| *k != GateKind::I && k.num_qubits() <= num_qubits)
        .collect();
    (
        prop::sample::select(kinds),
        Just((0..num_qubits).collect::<Vec<_>>()).prop_shuffle(),
    )
        .prop_map(|(kind, order)| GateOp { kind, order })
}

/// Random circuits over 1-4 qubits with 1-12 applications of every
/// registered kind except the identity.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=4).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 1..=12).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("random", num_qubits);
            for op in &ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

fn measurement_count(circuit: &Circuit) -> usize {
    circuit.count_ops().get(&GateKind::Measure).copied().unwrap_or(0)
}

proptest! {
    /// decode(encode(c)) has the unitary and the measurements of c.
    #[test]
    fn roundtrip_preserves_unitary(circuit in arb_circuit()) {
        let wire = encode(&circuit);
        let decoded = decode(wire.as_str()).unwrap();

        prop_assert_eq!(decoded.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(measurement_count(&decoded), measurement_count(&circuit));
        prop_assert!(decoded.unitary().unwrap().equiv(&circuit.unitary().unwrap(), EPSILON));
    }

    /// Re-encoding a decoded wire string reproduces it exactly.
    #[test]
    fn reencoding_is_stable(circuit in arb_circuit()) {
        let wire = encode(&circuit);
        let again = encode(&decode(wire.as_str()).unwrap());
        prop_assert_eq!(again, wire);
    }

    /// Every layer is as wide as the circuit and the string ends in '.'.
    #[test]
    fn layers_have_circuit_width(circuit in arb_circuit()) {
        let wire = encode(&circuit);
        prop_assert!(wire.as_str().ends_with('.'));
        for layer in wire.layers() {
            prop_assert_eq!(layer.chars().count(), circuit.num_qubits() as usize);
        }
    }

    /// Dropping the terminator always fails.
    #[test]
    fn missing_terminator_is_malformed(circuit in arb_circuit()) {
        let wire = encode(&circuit);
        let truncated = wire.as_str().trim_end_matches('.');
        prop_assert!(matches!(decode(truncated), Err(WireError::MalformedWire(_))));
    }
}

/// Every kind on every legal tuple of a full 3-qubit target round-trips.
#[test]
fn every_kind_on_every_placement_roundtrips() {
    let target = CapabilitySet::new(GateKind::ALL, 3).unwrap();
    for &kind in target.kinds() {
        for tuple in target.placements(kind).unwrap() {
            let mut circuit = Circuit::with_size("single", 3);
            circuit.apply(kind, tuple.iter().copied()).unwrap();

            let decoded = decode(encode(&circuit).as_str()).unwrap();
            assert!(
                decoded.unitary().unwrap().equiv(&circuit.unitary().unwrap(), EPSILON),
                "{kind} on {tuple:?}"
            );
            if kind != GateKind::I {
                assert_eq!(decoded.count_ops().get(&kind), Some(&1), "{kind} on {tuple:?}");
            }
        }
    }
}
