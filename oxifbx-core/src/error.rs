//! Error types for OxiFBX inflate operations.
//!
//! Every failure is detected at the lowest layer that can observe it and
//! returned unchanged up the call chain. DEFLATE has no resynchronization
//! mechanism, so any error is fatal to the whole decode call.

use std::collections::TryReserveError;
use thiserror::Error;

/// Coarse classification of an [`InflateError`].
///
/// Callers such as the FBX node reader map `Corrupt` and `OutOfData` to a
/// file-invalid condition and `OutOfMemory` to a memory error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed stream content.
    Corrupt,
    /// Input ended before the stream logically ended.
    OutOfData,
    /// An allocation could not be satisfied.
    OutOfMemory,
    /// The configured output ceiling was reached.
    LimitExceeded,
}

/// The error type for OxiFBX inflate operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InflateError {
    /// Corrupted or unsupported stream content.
    #[error("Corrupt data at byte {offset}: {message}")]
    Corrupt {
        /// Byte offset in the input where the problem was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// The bit reader ran out of input.
    #[error("Out of data at bit {bit_position}: needed {needed_bits} more bits")]
    OutOfData {
        /// Bit position at which the read was attempted.
        bit_position: u64,
        /// Number of bits the read required.
        needed_bits: u64,
    },

    /// Allocation failure while growing a buffer.
    #[error("Out of memory: failed to reserve {requested} elements")]
    OutOfMemory {
        /// Number of additional elements requested.
        requested: usize,
    },

    /// Decoded output would exceed the configured ceiling.
    #[error("Output limit exceeded: stream produces more than {limit} bytes")]
    LimitExceeded {
        /// The configured maximum output size.
        limit: usize,
    },
}

/// Result type alias for OxiFBX operations.
pub type Result<T> = std::result::Result<T, InflateError>;

impl InflateError {
    /// Create a corrupt data error.
    pub fn corrupt(offset: u64, message: impl Into<String>) -> Self {
        Self::Corrupt {
            offset,
            message: message.into(),
        }
    }

    /// Create an out of data error.
    pub fn out_of_data(bit_position: u64, needed_bits: u64) -> Self {
        Self::OutOfData {
            bit_position,
            needed_bits,
        }
    }

    /// Create an out of memory error.
    pub fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    /// Create an output limit error.
    pub fn limit_exceeded(limit: usize) -> Self {
        Self::LimitExceeded { limit }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Corrupt { .. } => ErrorKind::Corrupt,
            Self::OutOfData { .. } => ErrorKind::OutOfData,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
        }
    }

    /// Whether this error means the input itself is unusable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::Corrupt | ErrorKind::OutOfData)
    }
}

impl From<(TryReserveError, usize)> for InflateError {
    fn from((_, requested): (TryReserveError, usize)) -> Self {
        Self::out_of_memory(requested)
    }
}
