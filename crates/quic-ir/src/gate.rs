//! Gate kinds understood by QuiC endpoints.
//!
//! The catalogue is closed: every kind an endpoint can execute is a variant
//! of [`GateKind`]. Each kind carries three names:
//!
//! - a **canonical id** (`"X_GATE"`), upper-case, used in configuration;
//! - a **wire symbol** (`"X"`, `"CN"`), the text written into wire layers;
//! - a **host name** (`"x"`, `"cx"`), the name circuit front-ends use.
//!
//! Upper-case wire symbols are forward gates and lower-case ones their
//! inverses (`S`/`s`, `T`/`t`, `CS`/`Cs`). Multi-qubit symbols are a run of
//! `C` control markers followed by the target-role character.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;

use crate::unitary::Unitary2x2;

/// The control marker used in multi-qubit wire symbols and wire layers.
pub const CONTROL_SYMBOL: char = 'C';

/// A gate kind supported by the QuiC wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Identity.
    #[serde(rename = "IDENTITY_GATE")]
    I,
    /// Pauli-X.
    #[serde(rename = "X_GATE")]
    X,
    /// Pauli-Y.
    #[serde(rename = "Y_GATE")]
    Y,
    /// Pauli-Z.
    #[serde(rename = "Z_GATE")]
    Z,
    /// Hadamard.
    #[serde(rename = "H_GATE")]
    H,
    /// S gate, `P(π/2)`.
    #[serde(rename = "S_GATE")]
    S,
    /// S-dagger, `P(−π/2)`.
    #[serde(rename = "SDG_GATE")]
    Sdg,
    /// T gate, `P(π/4)`.
    #[serde(rename = "T_GATE")]
    T,
    /// T-dagger, `P(−π/4)`.
    #[serde(rename = "TDG_GATE")]
    Tdg,
    /// Controlled-NOT.
    #[serde(rename = "CX_GATE")]
    CX,
    /// Toffoli.
    #[serde(rename = "CCX_GATE")]
    CCX,
    /// Controlled-S.
    #[serde(rename = "CS_GATE")]
    CS,
    /// Controlled-S-dagger.
    #[serde(rename = "CSDG_GATE")]
    CSdg,
    /// Computational-basis measurement.
    #[serde(rename = "MEASUREMENT_GATE")]
    Measure,
    /// Eighth-turn phase, `P(π/4)`.
    #[serde(rename = "P_GATE")]
    P45,
    /// Inverse eighth-turn phase, `P(−π/4)`.
    #[serde(rename = "PDG_GATE")]
    Pdg45,
    /// Controlled eighth-turn phase.
    #[serde(rename = "CP_GATE")]
    CP45,
    /// Controlled inverse eighth-turn phase.
    #[serde(rename = "CPDG_GATE")]
    CPdg45,
    /// Controlled-T.
    #[serde(rename = "CT_GATE")]
    CT,
    /// Controlled-T-dagger.
    #[serde(rename = "CTDG_GATE")]
    CTdg,
}

/// How a gate kind acts on its qubits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDefinition {
    /// `matrix` on the last qubit, conditioned on the first `controls`
    /// qubits all being `|1⟩`.
    Unitary {
        /// Number of leading control qubits.
        controls: u32,
        /// Matrix applied to the target qubit.
        matrix: Unitary2x2,
    },
    /// Non-unitary computational-basis measurement.
    Measurement,
}

impl GateKind {
    /// Every kind, in registry order.
    pub const ALL: [GateKind; 20] = [
        GateKind::I,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::H,
        GateKind::S,
        GateKind::Sdg,
        GateKind::T,
        GateKind::Tdg,
        GateKind::CX,
        GateKind::CCX,
        GateKind::CS,
        GateKind::CSdg,
        GateKind::Measure,
        GateKind::P45,
        GateKind::Pdg45,
        GateKind::CP45,
        GateKind::CPdg45,
        GateKind::CT,
        GateKind::CTdg,
    ];

    /// Upper-case identifier, e.g. `"CX_GATE"`.
    pub const fn canonical_id(self) -> &'static str {
        match self {
            GateKind::I => "IDENTITY_GATE",
            GateKind::X => "X_GATE",
            GateKind::Y => "Y_GATE",
            GateKind::Z => "Z_GATE",
            GateKind::H => "H_GATE",
            GateKind::S => "S_GATE",
            GateKind::Sdg => "SDG_GATE",
            GateKind::T => "T_GATE",
            GateKind::Tdg => "TDG_GATE",
            GateKind::CX => "CX_GATE",
            GateKind::CCX => "CCX_GATE",
            GateKind::CS => "CS_GATE",
            GateKind::CSdg => "CSDG_GATE",
            GateKind::Measure => "MEASUREMENT_GATE",
            GateKind::P45 => "P_GATE",
            GateKind::Pdg45 => "PDG_GATE",
            GateKind::CP45 => "CP_GATE",
            GateKind::CPdg45 => "CPDG_GATE",
            GateKind::CT => "CT_GATE",
            GateKind::CTdg => "CTDG_GATE",
        }
    }

    /// Symbol written into wire layers, e.g. `"CN"`.
    pub const fn wire_symbol(self) -> &'static str {
        match self {
            GateKind::I => "I",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::H => "H",
            GateKind::S => "S",
            GateKind::Sdg => "s",
            GateKind::T => "T",
            GateKind::Tdg => "t",
            GateKind::CX => "CN",
            GateKind::CCX => "CCN",
            GateKind::CS => "CS",
            GateKind::CSdg => "Cs",
            GateKind::Measure => "m",
            GateKind::P45 => "P",
            GateKind::Pdg45 => "p",
            GateKind::CP45 => "CP",
            GateKind::CPdg45 => "Cp",
            GateKind::CT => "CT",
            GateKind::CTdg => "Ct",
        }
    }

    /// Name used by circuit front-ends, e.g. `"cx"`.
    pub const fn host_name(self) -> &'static str {
        match self {
            GateKind::I => "id",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::CX => "cx",
            GateKind::CCX => "ccx",
            GateKind::CS => "cs",
            GateKind::CSdg => "csdg",
            GateKind::Measure => "measure",
            GateKind::P45 => "p45",
            GateKind::Pdg45 => "pdg45",
            GateKind::CP45 => "cp45",
            GateKind::CPdg45 => "cpdg45",
            GateKind::CT => "ct",
            GateKind::CTdg => "ctdg",
        }
    }

    /// Number of qubits the kind acts on.
    pub const fn num_qubits(self) -> u32 {
        match self {
            GateKind::CCX => 3,
            GateKind::CX
            | GateKind::CS
            | GateKind::CSdg
            | GateKind::CP45
            | GateKind::CPdg45
            | GateKind::CT
            | GateKind::CTdg => 2,
            _ => 1,
        }
    }

    /// Whether the synthesis collaborator may use this kind as an
    /// approximation building block.
    pub const fn is_approximation_eligible(self) -> bool {
        !matches!(
            self,
            GateKind::I
                | GateKind::Measure
                | GateKind::P45
                | GateKind::Pdg45
                | GateKind::CP45
                | GateKind::CPdg45
        )
    }

    /// Whether this is the measurement kind.
    pub const fn is_measurement(self) -> bool {
        matches!(self, GateKind::Measure)
    }

    /// Number of leading control qubits.
    pub const fn num_controls(self) -> u32 {
        self.num_qubits() - 1
    }

    /// The character written at the target (last) qubit position.
    pub fn target_symbol(self) -> char {
        // Wire symbols are non-empty ASCII.
        self.wire_symbol()
            .chars()
            .next_back()
            .unwrap_or(CONTROL_SYMBOL)
    }

    /// The inverse kind, if it is registered. Self-inverse kinds return
    /// themselves; measurement has no inverse.
    pub const fn inverse(self) -> Option<GateKind> {
        Some(match self {
            GateKind::S => GateKind::Sdg,
            GateKind::Sdg => GateKind::S,
            GateKind::T => GateKind::Tdg,
            GateKind::Tdg => GateKind::T,
            GateKind::CS => GateKind::CSdg,
            GateKind::CSdg => GateKind::CS,
            GateKind::P45 => GateKind::Pdg45,
            GateKind::Pdg45 => GateKind::P45,
            GateKind::CP45 => GateKind::CPdg45,
            GateKind::CPdg45 => GateKind::CP45,
            GateKind::CT => GateKind::CTdg,
            GateKind::CTdg => GateKind::CT,
            GateKind::Measure => return None,
            GateKind::I
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::H
            | GateKind::CX
            | GateKind::CCX => self,
        })
    }

    /// The executable definition of this kind.
    pub fn definition(self) -> GateDefinition {
        let matrix = match self {
            GateKind::Measure => return GateDefinition::Measurement,
            GateKind::I => Unitary2x2::identity(),
            GateKind::X | GateKind::CX | GateKind::CCX => Unitary2x2::x(),
            GateKind::Y => Unitary2x2::y(),
            GateKind::Z => Unitary2x2::z(),
            GateKind::H => Unitary2x2::h(),
            GateKind::S | GateKind::CS => Unitary2x2::p(FRAC_PI_2),
            GateKind::Sdg | GateKind::CSdg => Unitary2x2::p(-FRAC_PI_2),
            GateKind::T | GateKind::P45 | GateKind::CP45 | GateKind::CT => {
                Unitary2x2::p(FRAC_PI_4)
            }
            GateKind::Tdg | GateKind::Pdg45 | GateKind::CPdg45 | GateKind::CTdg => {
                Unitary2x2::p(-FRAC_PI_4)
            }
        };
        GateDefinition::Unitary {
            controls: self.num_controls(),
            matrix,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unitary::EPSILON;

    #[test]
    fn test_registry_order_starts_with_identity() {
        assert_eq!(GateKind::ALL[0], GateKind::I);
        assert_eq!(GateKind::ALL[9], GateKind::CX);
        assert_eq!(GateKind::ALL[13], GateKind::Measure);
        assert_eq!(GateKind::ALL[19], GateKind::CTdg);
    }

    #[test]
    fn test_symbol_length_matches_arity() {
        for kind in GateKind::ALL {
            assert_eq!(kind.wire_symbol().len() as u32, kind.num_qubits(), "{kind}");
            assert!(kind.num_qubits() >= 1);
        }
    }

    #[test]
    fn test_target_symbols() {
        assert_eq!(GateKind::CX.target_symbol(), 'N');
        assert_eq!(GateKind::CCX.target_symbol(), 'N');
        assert_eq!(GateKind::CSdg.target_symbol(), 's');
        assert_eq!(GateKind::Measure.target_symbol(), 'm');
    }

    #[test]
    fn test_inverse_pairs_are_symmetric() {
        for kind in GateKind::ALL {
            if let Some(inv) = kind.inverse() {
                assert_eq!(inv.inverse(), Some(kind));
                assert_eq!(inv.num_qubits(), kind.num_qubits());
            }
        }
        assert_eq!(GateKind::Measure.inverse(), None);
    }

    #[test]
    fn test_inverse_definitions_compose_to_identity() {
        for kind in GateKind::ALL {
            let Some(inv) = kind.inverse() else { continue };
            let (
                GateDefinition::Unitary { matrix: a, .. },
                GateDefinition::Unitary { matrix: b, .. },
            ) = (kind.definition(), inv.definition())
            else {
                panic!("{kind} should be unitary");
            };
            assert!((a * b).approx_eq(&Unitary2x2::identity(), EPSILON), "{kind}");
        }
    }

    #[test]
    fn test_eligibility() {
        let ineligible: Vec<_> = GateKind::ALL
            .into_iter()
            .filter(|k| !k.is_approximation_eligible())
            .collect();
        assert_eq!(
            ineligible,
            vec![
                GateKind::I,
                GateKind::Measure,
                GateKind::P45,
                GateKind::Pdg45,
                GateKind::CP45,
                GateKind::CPdg45,
            ]
        );
    }

    #[test]
    fn test_serde_uses_canonical_id() {
        for kind in GateKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.canonical_id()));
        }
        let parsed: GateKind = serde_json::from_str("\"CCX_GATE\"").unwrap();
        assert_eq!(parsed, GateKind::CCX);
    }

    #[test]
    fn test_measurement_definition() {
        assert_eq!(GateKind::Measure.definition(), GateDefinition::Measurement);
        assert!(matches!(
            GateKind::CCX.definition(),
            GateDefinition::Unitary { controls: 2, .. }
        ));
    }
}
