//! QuiC Target Model and Synthesis Seam
//!
//! This crate describes what a connected endpoint can execute and fits
//! circuits to it.
//!
//! # Overview
//!
//! ```text
//! endpoint gate names ──► CapabilitySet ──► approximation basis
//!                              │               + equivalence rules
//!                              ▼
//! caller circuit ──► Synthesizer ──► validated, basis-restricted circuit
//! ```
//!
//! - [`CapabilitySet`]: every legal (kind, qubit tuple) pair on a fully
//!   connected endpoint, the derived [`EquivalenceRule`]s and the
//!   approximation basis handed to synthesis
//! - [`Synthesizer`]: the plug-in point for basis synthesis;
//!   [`BasisTranslator`] is the exact built-in implementation
//!
//! # Example
//!
//! ```rust
//! use quic_compile::{BasisTranslator, CapabilitySet, SynthesisOptions, Synthesizer};
//! use quic_ir::{Circuit, GateKind, QubitId};
//!
//! let target = CapabilitySet::from_endpoint_names(["X", "P", "CN", "m"], 2).unwrap();
//! assert!(target.approximation_basis().contains(&GateKind::S));
//!
//! let mut circuit = Circuit::with_size("phase", 2);
//! circuit.s(QubitId(1)).unwrap().cx(QubitId(1), QubitId(0)).unwrap();
//!
//! let fitted = BasisTranslator
//!     .synthesize(&circuit, &target, &SynthesisOptions::default())
//!     .unwrap();
//! assert_eq!(fitted.count_ops()[&GateKind::P45], 2);
//! ```

pub mod equivalence;
pub mod error;
pub mod synthesis;
pub mod target;

pub use equivalence::{EquivalenceRule, derive_rules};
pub use error::{CompileError, CompileResult};
pub use synthesis::{BasisTranslator, SynthesisOptions, Synthesizer, synthesize_for_target};
pub use target::{CapabilitySet, resolve_endpoint_gate_name};
