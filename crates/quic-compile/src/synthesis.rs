//! The synthesis seam.
//!
//! Rewriting an arbitrary circuit into an endpoint's basis is delegated to a
//! [`Synthesizer`]. Approximating synthesis (Solovay–Kitaev style) lives
//! outside this workspace and plugs in through the trait; the built-in
//! [`BasisTranslator`] only performs exact rewrites.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use quic_ir::{Circuit, InstructionKind};

use crate::error::{CompileError, CompileResult};
use crate::target::CapabilitySet;

/// Parameters forwarded to the synthesis step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// Length of the basic approximation sequences.
    pub depth: u32,
    /// Recursion degree of the approximation.
    pub recursion_degree: u32,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            depth: 3,
            recursion_degree: 3,
        }
    }
}

impl SynthesisOptions {
    /// Reject a zero depth.
    pub fn validate(&self) -> CompileResult<()> {
        if self.depth == 0 {
            return Err(CompileError::InvalidOptions(
                "approximation depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Rewrites a circuit into the legal kinds and placements of a target.
///
/// Implementations must return a circuit whose every application passes
/// [`CapabilitySet::validate`], and whose unitary matches the input up to
/// the implementation's approximation error.
pub trait Synthesizer: Send + Sync {
    /// Get the name of this synthesizer.
    fn name(&self) -> &str;

    /// Rewrite `circuit` for `target`.
    fn synthesize(
        &self,
        circuit: &Circuit,
        target: &CapabilitySet,
        options: &SynthesisOptions,
    ) -> CompileResult<Circuit>;
}

/// Exact basis translation.
///
/// Barriers are dropped, supported kinds are kept, kinds with an
/// equivalence rule are expanded, and anything else fails with
/// [`CompileError::UnsupportedGate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasisTranslator;

impl Synthesizer for BasisTranslator {
    fn name(&self) -> &'static str {
        "BasisTranslator"
    }

    #[instrument(skip_all, fields(circuit = circuit.name(), ops = circuit.len()))]
    fn synthesize(
        &self,
        circuit: &Circuit,
        target: &CapabilitySet,
        options: &SynthesisOptions,
    ) -> CompileResult<Circuit> {
        options.validate()?;

        let mut out = Circuit::with_size(circuit.name(), circuit.num_qubits());
        for inst in circuit.instructions() {
            let InstructionKind::Gate(kind) = inst.kind else {
                continue;
            };
            if target.supports(kind) {
                out.push(inst.clone())?;
                continue;
            }
            let (Some(rule), &[qubit]) = (target.equivalence_for(kind), inst.qubits.as_slice())
            else {
                return Err(CompileError::UnsupportedGate(kind));
            };
            debug!(gate = %kind, "Expanding through equivalence rule");
            for replacement in rule.expand(qubit) {
                out.push(replacement)?;
            }
        }

        target.validate(&out)?;
        Ok(out)
    }
}

/// Convenience wrapper: run `synthesizer` and return the validated result.
pub fn synthesize_for_target(
    synthesizer: &dyn Synthesizer,
    circuit: &Circuit,
    target: &CapabilitySet,
    options: &SynthesisOptions,
) -> CompileResult<Circuit> {
    let out = synthesizer.synthesize(circuit, target, options)?;
    target.validate(&out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quic_ir::{EPSILON, GateKind, QubitId};

    fn phase_target() -> CapabilitySet {
        CapabilitySet::new([GateKind::X, GateKind::P45, GateKind::CX, GateKind::Measure], 2).unwrap()
    }

    #[test]
    fn test_keeps_supported_and_drops_barriers() {
        let mut circuit = Circuit::with_size("c", 2);
        circuit
            .x(QubitId(0))
            .unwrap()
            .barrier([QubitId(0), QubitId(1)])
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let out = BasisTranslator
            .synthesize(&circuit, &phase_target(), &SynthesisOptions::default())
            .unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.instructions().iter().all(|i| !i.is_barrier()));
    }

    #[test]
    fn test_expands_derived_s() {
        let mut circuit = Circuit::with_size("c", 1);
        circuit.s(QubitId(0)).unwrap();
        let target = CapabilitySet::new([GateKind::P45], 1).unwrap();
        let out = BasisTranslator
            .synthesize(&circuit, &target, &SynthesisOptions::default())
            .unwrap();
        assert_eq!(out.count_ops().get(&GateKind::P45), Some(&2));
        assert!(out.unitary().unwrap().equiv(&circuit.unitary().unwrap(), EPSILON));
    }

    #[test]
    fn test_unsupported_gate() {
        let mut circuit = Circuit::with_size("c", 1);
        circuit.h(QubitId(0)).unwrap();
        let err = BasisTranslator
            .synthesize(&circuit, &phase_target(), &SynthesisOptions::default())
            .unwrap_err();
        assert_eq!(err, CompileError::UnsupportedGate(GateKind::H));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let circuit = Circuit::with_size("c", 1);
        let options = SynthesisOptions {
            depth: 0,
            recursion_degree: 3,
        };
        assert!(matches!(
            BasisTranslator.synthesize(&circuit, &phase_target(), &options),
            Err(CompileError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_custom_synthesizer_output_is_validated() {
        struct Cheat;
        impl Synthesizer for Cheat {
            fn name(&self) -> &str {
                "Cheat"
            }
            fn synthesize(
                &self,
                circuit: &Circuit,
                _target: &CapabilitySet,
                _options: &SynthesisOptions,
            ) -> CompileResult<Circuit> {
                Ok(circuit.clone())
            }
        }

        let mut circuit = Circuit::with_size("c", 1);
        circuit.h(QubitId(0)).unwrap();
        let err = synthesize_for_target(
            &Cheat,
            &circuit,
            &phase_target(),
            &SynthesisOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, CompileError::UnsupportedGate(GateKind::H));
    }
}
