//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// IR error.
    #[error("IR error: {0}")]
    Ir(#[from] quic_ir::IrError),

    /// Target or synthesis error.
    #[error("Compilation error: {0}")]
    Compile(#[from] quic_compile::CompileError),

    /// Wire codec error.
    #[error("Wire format error: {0}")]
    Wire(#[from] quic_wire::WireError),

    /// The execution transport failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The job ended in the error state.
    #[error("Job {job_id} failed: {reason}")]
    ExecutionFailed {
        /// The failed job.
        job_id: String,
        /// Transport failure captured by the worker.
        reason: String,
    },

    /// Timeout waiting for job.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// A job was submitted twice.
    #[error("Job {0} was already submitted")]
    AlreadySubmitted(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {shots} (must be between 1 and {max})")]
    InvalidShots {
        /// Requested shots.
        shots: u32,
        /// Configured upper bound.
        max: u32,
    },

    /// No connected backend has this name.
    #[error("Backend not found: {0}")]
    BackendNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
