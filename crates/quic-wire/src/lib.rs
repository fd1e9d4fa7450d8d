//! QuiC Wire Format Encoder and Decoder
//!
//! QuiC endpoints accept circuits as a compact layered string. Each layer is
//! one gate application written as a row of per-qubit symbols, layers are
//! separated by `,` and the string ends in `.`:
//!
//! ```text
//! X(q0); CX(q0, q1); measure(q0); measure(q1)   ──►   "XI,CN,mm."
//! ```
//!
//! | Position holds | Meaning |
//! |----------------|---------|
//! | `I` | qubit untouched by this layer |
//! | `C` | control qubit of a multi-qubit gate |
//! | any other symbol | the gate (or target role) acting on this qubit |
//!
//! Character `i` of a layer acts on qubit `i`. Measurement results come back
//! from the endpoint as an integer whose bit `i` is qubit `i`, so the result
//! bit strings are written with qubit 0 first.
//!
//! # Example: Encoding
//!
//! ```rust
//! use quic_ir::Circuit;
//! use quic_wire::encode;
//!
//! let circuit = Circuit::bell().unwrap();
//! assert_eq!(encode(&circuit).as_str(), "HI,CN,mm.");
//! ```
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use quic_wire::{decode, encode};
//!
//! let circuit = decode("XI,CN,mm.").unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(encode(&circuit).as_str(), "XI,CN,mm.");
//! ```

mod decoder;
mod encoder;
mod error;
mod wire;

pub use decoder::decode;
pub use encoder::encode;
pub use error::{WireError, WireResult};
pub use wire::{IDLE_SYMBOL, LAYER_SEPARATOR, TERMINATOR, WireString};
