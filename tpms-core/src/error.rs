//! Error types for TPMS decoding

use alloc::string::String;

/// Errors that can occur while decoding a candidate frame
///
/// None of these abort a row scan; they only reject one candidate.
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not enough bits left in the row for a full frame
    #[cfg_attr(feature = "std", error("Insufficient bits: need {needed}, {available} available"))]
    InsufficientBits {
        /// The number of bits needed.
        needed: usize,
        /// The number of bits actually left.
        available: usize,
    },

    /// Checksum mismatch
    #[cfg_attr(feature = "std", error("Checksum mismatch: expected {expected:02x}, got {actual:02x}"))]
    ChecksumMismatch {
        /// The checksum byte carried in the frame.
        expected: u8,
        /// The checksum computed over the frame.
        actual: u8,
    },

    /// Textual row could not be parsed
    #[cfg_attr(feature = "std", error("Invalid row: {0}"))]
    InvalidRow(String),

    /// Field value cannot be encoded in a frame
    #[cfg_attr(feature = "std", error("Invalid field: {0}"))]
    InvalidField(String),

    /// Preamble pattern is unusable
    #[cfg_attr(feature = "std", error("Invalid preamble pattern: {0}"))]
    InvalidPattern(String),
}

/// Coarse classification of a [`DecodeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`DecodeError::InsufficientBits`]
    InsufficientBits,
    /// See [`DecodeError::ChecksumMismatch`]
    ChecksumMismatch,
    /// Malformed input or configuration
    InvalidInput,
}

impl DecodeError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InsufficientBits { .. } => ErrorKind::InsufficientBits,
            DecodeError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            DecodeError::InvalidRow(_)
            | DecodeError::InvalidField(_)
            | DecodeError::InvalidPattern(_) => ErrorKind::InvalidInput,
        }
    }
}
