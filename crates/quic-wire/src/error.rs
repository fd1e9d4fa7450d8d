//! Error types for the wire codec.

use thiserror::Error;

/// Errors that can occur while decoding a wire string.
///
/// Layer indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WireError {
    /// The string is empty or not terminated by `.`.
    #[error("Malformed wire string: {0}")]
    MalformedWire(String),

    /// A layer is not as wide as the first one.
    #[error("Layer {layer} has width {found}, expected {expected}")]
    WidthMismatch {
        /// Offending layer.
        layer: usize,
        /// Width of the first layer.
        expected: usize,
        /// Width of the offending layer.
        found: usize,
    },

    /// A controlled layer does not have exactly one target position.
    #[error("Layer {layer} has {targets} target positions, expected exactly one")]
    AmbiguousTarget {
        /// Offending layer.
        layer: usize,
        /// Number of non-control, non-idle positions.
        targets: usize,
    },

    /// A symbol (or composite control symbol) is not registered.
    #[error("Unknown gate '{symbol}' in layer {layer}")]
    UnknownGate {
        /// Offending layer.
        layer: usize,
        /// The unregistered symbol.
        symbol: String,
    },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Circuit(#[from] quic_ir::IrError),
}

/// Result type for codec operations.
pub type WireResult<T> = Result<T, WireError>;
