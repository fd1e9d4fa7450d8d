//! QuiC Gate Registry and Circuit Representation
//!
//! This crate provides the data structures shared by the rest of the QuiC
//! stack: the closed catalogue of gate kinds a QuiC endpoint understands,
//! the lookup tables over it, and a small circuit type built from those
//! kinds.
//!
//! # Core Components
//!
//! - **Gates**: [`GateKind`] with its canonical id, wire symbol, host name,
//!   arity and [`GateDefinition`]
//! - **Registry**: [`GateRegistry`] for O(1) lookup by any of the three names
//! - **Instructions**: [`Instruction`] combining a gate kind with its qubits
//! - **Circuit**: [`Circuit`] builder with operand validation
//! - **Unitary**: [`Unitary`] dense matrices and equivalence up to global phase
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use quic_ir::{Circuit, GateKind, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.count_ops()[&GateKind::Measure], 2);
//! ```
//!
//! # Example: Registry Lookups
//!
//! ```rust
//! use quic_ir::{GateKind, GateRegistry};
//!
//! let registry = GateRegistry::builtin();
//! assert_eq!(registry.lookup_by_wire_symbol("CN").unwrap(), GateKind::CX);
//! assert_eq!(registry.lookup_by_canonical_id("sdg_gate").unwrap(), GateKind::Sdg);
//! assert_eq!(registry.lookup_by_host_name("ccx").unwrap(), GateKind::CCX);
//! ```
//!
//! # Supported Gates
//!
//! | Wire | Host | Qubits | Description |
//! |------|------|--------|-------------|
//! | `I` | `id` | 1 | Identity |
//! | `X`, `Y`, `Z` | `x`, `y`, `z` | 1 | Pauli gates |
//! | `H` | `h` | 1 | Hadamard |
//! | `S`, `s` | `s`, `sdg` | 1 | S and S-dagger |
//! | `T`, `t` | `t`, `tdg` | 1 | T and T-dagger |
//! | `P`, `p` | `p45`, `pdg45` | 1 | Eighth-turn phase and inverse |
//! | `m` | `measure` | 1 | Measurement |
//! | `CN` | `cx` | 2 | CNOT |
//! | `CS`, `Cs` | `cs`, `csdg` | 2 | Controlled S and S-dagger |
//! | `CT`, `Ct` | `ct`, `ctdg` | 2 | Controlled T and T-dagger |
//! | `CP`, `Cp` | `cp45`, `cpdg45` | 2 | Controlled eighth-turn phase |
//! | `CCN` | `ccx` | 3 | Toffoli |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod registry;
pub mod unitary;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CONTROL_SYMBOL, GateDefinition, GateKind};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
pub use registry::GateRegistry;
pub use unitary::{EPSILON, Unitary, Unitary2x2};
