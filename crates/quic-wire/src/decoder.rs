//! Wire string → circuit.

use tracing::{debug, instrument};

use quic_ir::{CONTROL_SYMBOL, Circuit, GateKind, GateRegistry, QubitId};

use crate::error::{WireError, WireResult};
use crate::wire::{IDLE_SYMBOL, LAYER_SEPARATOR, TERMINATOR};

/// Decode a wire string into a circuit.
///
/// The circuit is as wide as the first layer. A layer containing `C`
/// becomes one application whose qubits are the `C` positions in
/// ascending order followed by the single target position; any other layer
/// becomes one single-qubit application per non-`I` position.
///
/// `"."` decodes to an empty circuit over zero qubits.
#[instrument(level = "debug", skip_all, fields(len = wire.len()))]
pub fn decode(wire: &str) -> WireResult<Circuit> {
    let wire = wire.trim();
    let body = wire.strip_suffix(TERMINATOR).ok_or_else(|| {
        WireError::MalformedWire(format!("expected '{TERMINATOR}' at the end of {wire:?}"))
    })?;

    let layers: Vec<Vec<char>> = body
        .split(LAYER_SEPARATOR)
        .map(|layer| layer.chars().collect())
        .collect();
    let width = layers.first().map_or(0, Vec::len);
    let num_qubits = u32::try_from(width)
        .map_err(|_| WireError::MalformedWire(format!("layer width {width} is too large")))?;

    let registry = GateRegistry::builtin();
    let mut circuit = Circuit::with_size("wire", num_qubits);

    for (index, layer) in layers.iter().enumerate() {
        if layer.len() != width {
            return Err(WireError::WidthMismatch {
                layer: index,
                expected: width,
                found: layer.len(),
            });
        }
        if layer.contains(&CONTROL_SYMBOL) {
            decode_controlled(registry, &mut circuit, index, layer)?;
        } else {
            decode_parallel(registry, &mut circuit, index, layer)?;
        }
    }

    debug!(num_qubits, ops = circuit.len(), "Decoded wire string");
    Ok(circuit)
}

fn decode_controlled(
    registry: &GateRegistry,
    circuit: &mut Circuit,
    index: usize,
    layer: &[char],
) -> WireResult<()> {
    let mut controls = vec![];
    let mut targets = vec![];
    for (position, &symbol) in layer.iter().enumerate() {
        match symbol {
            CONTROL_SYMBOL => controls.push(position),
            IDLE_SYMBOL => {}
            _ => targets.push(position),
        }
    }

    let &[target] = targets.as_slice() else {
        return Err(WireError::AmbiguousTarget {
            layer: index,
            targets: targets.len(),
        });
    };

    let mut symbol: String = controls.iter().map(|_| CONTROL_SYMBOL).collect();
    symbol.push(layer[target]);
    let kind = lookup(registry, index, &symbol)?;

    let qubits = controls
        .iter()
        .chain(std::iter::once(&target))
        .map(|&q| qubit_at(q));
    circuit.apply(kind, qubits)?;
    Ok(())
}

fn decode_parallel(
    registry: &GateRegistry,
    circuit: &mut Circuit,
    index: usize,
    layer: &[char],
) -> WireResult<()> {
    for (position, &symbol) in layer.iter().enumerate() {
        if symbol == IDLE_SYMBOL {
            continue;
        }
        let kind = lookup(registry, index, symbol.encode_utf8(&mut [0; 4]))?;
        circuit.apply(kind, [qubit_at(position)])?;
    }
    Ok(())
}

fn lookup(registry: &GateRegistry, layer: usize, symbol: &str) -> WireResult<GateKind> {
    registry
        .lookup_by_wire_symbol(symbol)
        .map_err(|_| WireError::UnknownGate {
            layer,
            symbol: symbol.to_string(),
        })
}

// Positions are bounded by the layer width, which fits in u32.
#[allow(clippy::cast_possible_truncation)]
fn qubit_at(position: usize) -> QubitId {
    QubitId(position as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quic_ir::{EPSILON, Instruction};

    #[test]
    fn test_bell_scenario() {
        let circuit = decode("XI,CN,mm.").unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(
            circuit.instructions(),
            &[
                Instruction::gate(GateKind::X, [QubitId(0)]),
                Instruction::gate(GateKind::CX, [QubitId(0), QubitId(1)]),
                Instruction::measure(QubitId(0)),
                Instruction::measure(QubitId(1)),
            ]
        );
    }

    #[test]
    fn test_bell_unitary() {
        let decoded = decode("XI,CN,mm.").unwrap();
        let mut expected = Circuit::with_size("x_cx", 2);
        expected.x(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        assert!(decoded.unitary().unwrap().equiv(&expected.unitary().unwrap(), EPSILON));
    }

    #[test]
    fn test_missing_terminator() {
        assert!(matches!(decode("XI,CN,mm"), Err(WireError::MalformedWire(_))));
        assert!(matches!(decode(""), Err(WireError::MalformedWire(_))));
    }

    #[test]
    fn test_width_mismatch() {
        assert_eq!(
            decode("XI,CNI.").unwrap_err(),
            WireError::WidthMismatch {
                layer: 1,
                expected: 2,
                found: 3,
            }
        );
        assert!(matches!(decode("XI,,XI."), Err(WireError::WidthMismatch { layer: 1, .. })));
    }

    #[test]
    fn test_ambiguous_target() {
        assert_eq!(
            decode("CNN.").unwrap_err(),
            WireError::AmbiguousTarget { layer: 0, targets: 2 }
        );
        assert_eq!(
            decode("CI.").unwrap_err(),
            WireError::AmbiguousTarget { layer: 0, targets: 0 }
        );
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(
            decode("XQ.").unwrap_err(),
            WireError::UnknownGate {
                layer: 0,
                symbol: "Q".into(),
            }
        );
        assert_eq!(
            decode("II,CCm.").unwrap_err(),
            WireError::WidthMismatch {
                layer: 1,
                expected: 2,
                found: 3,
            }
        );
        assert_eq!(
            decode("CCm.").unwrap_err(),
            WireError::UnknownGate {
                layer: 0,
                symbol: "CCm".into(),
            }
        );
    }

    #[test]
    fn test_control_order_is_ascending() {
        let circuit = decode("NIC.").unwrap();
        assert_eq!(
            circuit.instructions(),
            &[Instruction::gate(GateKind::CX, [QubitId(2), QubitId(0)])]
        );

        let circuit = decode("CsC.").unwrap_err();
        assert!(matches!(circuit, WireError::UnknownGate { .. }));

        let circuit = decode("CCN.").unwrap();
        assert_eq!(
            circuit.instructions(),
            &[Instruction::gate(GateKind::CCX, [QubitId(0), QubitId(1), QubitId(2)])]
        );
    }

    #[test]
    fn test_terminator_only_is_empty_circuit() {
        let circuit = decode(".").unwrap();
        assert_eq!(circuit.num_qubits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_idle_layer_yields_nothing() {
        let circuit = decode("II,HI.").unwrap();
        assert_eq!(circuit.len(), 1);
    }
}
