//! Error types for the fmlink bridge

use thiserror::Error;

/// Errors surfaced at the modem/network boundary
#[derive(Error, Debug)]
pub enum FmError {
    // Layout errors
    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Modem chunk of {0} bytes is not a whole number of 3-byte groups")]
    UnalignedModemChunk(usize),

    #[error("Network chunk of {0} bytes splits a 16-bit sample")]
    UnalignedPcmChunk(usize),

    // Capacity errors
    #[error("Empty chunk")]
    EmptyChunk,

    #[error("Capacity exceeded: {samples} samples, at most {max} per call")]
    CapacityExceeded { samples: usize, max: usize },

    // Transport errors
    #[error("Transport error: {0}")]
    TransportError(String),
}

/// Result type for fmlink operations
pub type FmResult<T> = Result<T, FmError>;
