//! # TPMS Core
//!
//! Decoder for the Subaru (Schrader SHR3) tire pressure sensor, working on
//! already demodulated rows of bits.
//!
//! ## Modules
//!
//! - `constants`: Frame format constants, SUM8 and status flags
//! - `bitrow`: Bounds-checked bit row view and builder
//! - `config`: Immutable device configuration
//! - `types`: Core types (RawFrame, DecodedRecord)
//! - `locator`: Preamble search and candidate enumeration
//! - `decoder`: Strict frame decoding
//! - `scanner`: Noisy row scanning
//! - `encoder`: Frame and row synthesis
//! - `error`: Decode errors

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod bitrow;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod locator;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use bitrow::BitRow;
pub use config::DecoderConfig;
pub use error::{DecodeError, ErrorKind};
pub use types::{DecodedRecord, RawFrame};

/// Result type alias for TPMS operations
pub type Result<T> = core::result::Result<T, DecodeError>;
