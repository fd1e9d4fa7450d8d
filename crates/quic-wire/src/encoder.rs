//! Circuit → wire string.

use quic_ir::{CONTROL_SYMBOL, Circuit, GateKind, QubitId};

use crate::wire::{IDLE_SYMBOL, LAYER_SEPARATOR, TERMINATOR, WireString};

/// Encode a circuit as a wire string.
///
/// Each gate application becomes one layer as wide as the circuit: idle
/// positions hold `I`, control qubits hold `C` and the target (last) qubit
/// holds the target-role symbol of the kind. Barriers produce no layer.
/// A run of consecutive measurements on distinct qubits shares one layer.
///
/// An empty circuit encodes to `"."`.
pub fn encode(circuit: &Circuit) -> WireString {
    let mut encoder = Encoder::new(circuit.num_qubits() as usize);
    for (kind, qubits) in circuit.applications() {
        encoder.apply(kind, qubits);
    }
    encoder.finish()
}

/// A layer under construction: fixed width, one symbol per qubit.
struct Layer {
    cells: Box<[char]>,
    measurements_only: bool,
}

impl Layer {
    fn new(width: usize, measurements_only: bool) -> Self {
        Self {
            cells: vec![IDLE_SYMBOL; width].into_boxed_slice(),
            measurements_only,
        }
    }

    fn accepts_measurement(&self, qubit: QubitId) -> bool {
        self.measurements_only && self.cells[qubit.index()] == IDLE_SYMBOL
    }
}

struct Encoder {
    width: usize,
    output: String,
    pending: Option<Layer>,
}

impl Encoder {
    fn new(width: usize) -> Self {
        Self {
            width,
            output: String::new(),
            pending: None,
        }
    }

    fn apply(&mut self, kind: GateKind, qubits: &[QubitId]) {
        if let (true, &[qubit]) = (kind.is_measurement(), qubits) {
            if let Some(layer) = self.pending.as_mut().filter(|l| l.accepts_measurement(qubit)) {
                layer.cells[qubit.index()] = kind.target_symbol();
                return;
            }
        }

        self.flush();
        let mut layer = Layer::new(self.width, kind.is_measurement());
        if let Some((target, controls)) = qubits.split_last() {
            for control in controls {
                layer.cells[control.index()] = CONTROL_SYMBOL;
            }
            layer.cells[target.index()] = kind.target_symbol();
        }
        self.pending = Some(layer);
    }

    /// Freeze the pending layer into the output.
    fn flush(&mut self) {
        if let Some(layer) = self.pending.take() {
            if !self.output.is_empty() {
                self.output.push(LAYER_SEPARATOR);
            }
            self.output.extend(layer.cells.iter());
        }
    }

    fn finish(mut self) -> WireString {
        self.flush();
        self.output.push(TERMINATOR);
        WireString::from_encoded(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_scenario() {
        let mut circuit = Circuit::with_size("a", 2);
        circuit
            .x(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0))
            .unwrap()
            .measure(QubitId(1))
            .unwrap();
        assert_eq!(encode(&circuit).as_str(), "XI,CN,mm.");
    }

    #[test]
    fn test_reversed_control() {
        let mut circuit = Circuit::with_size("c", 3);
        circuit.cx(QubitId(2), QubitId(0)).unwrap();
        assert_eq!(encode(&circuit).as_str(), "NIC.");
    }

    #[test]
    fn test_toffoli_and_inverse_symbols() {
        let mut circuit = Circuit::with_size("c", 3);
        circuit
            .ccx(QubitId(0), QubitId(2), QubitId(1))
            .unwrap()
            .csdg(QubitId(1), QubitId(2))
            .unwrap()
            .tdg(QubitId(0))
            .unwrap();
        assert_eq!(encode(&circuit).as_str(), "CNC,ICs,tII.");
    }

    #[test]
    fn test_barriers_produce_no_layer() {
        let mut circuit = Circuit::with_size("c", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .barrier([QubitId(0), QubitId(1)])
            .unwrap()
            .h(QubitId(1))
            .unwrap();
        assert_eq!(encode(&circuit).as_str(), "HI,IH.");
    }

    #[test]
    fn test_repeated_measurement_opens_new_layer() {
        let mut circuit = Circuit::with_size("c", 2);
        circuit
            .measure(QubitId(0))
            .unwrap()
            .measure(QubitId(0))
            .unwrap()
            .measure(QubitId(1))
            .unwrap();
        assert_eq!(encode(&circuit).as_str(), "mI,mm.");
    }

    #[test]
    fn test_gate_breaks_measurement_run() {
        let mut circuit = Circuit::with_size("c", 2);
        circuit
            .measure(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .measure(QubitId(1))
            .unwrap();
        assert_eq!(encode(&circuit).as_str(), "mI,IX,Im.");
    }

    #[test]
    fn test_empty_circuit() {
        assert_eq!(encode(&Circuit::with_size("empty", 3)).as_str(), ".");
    }

    #[test]
    fn test_layers_are_uniform_width() {
        let circuit = Circuit::ghz(5).unwrap();
        let wire = encode(&circuit);
        assert!(wire.layers().all(|layer| layer.chars().count() == 5));
        assert_eq!(wire.num_qubits(), 5);
    }
}
