//! Device configuration
//!
//! Everything that describes the Subaru sensor (preamble, timing, output
//! field names) lives in one immutable value that is built once and passed
//! by reference into the scanner.

use crate::constants::{
    Integrity, CANDIDATE_STEP, FRAME_LEAD_BITS, MAX_PREAMBLE_BITS, MIN_TRAILING_BITS, MODEL,
    PREAMBLE, PREAMBLE_BITS, RECORD_FIELDS, SENSOR_TYPE,
};
use crate::error::DecodeError;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Modulation used by the radio front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modulation {
    /// FSK with Manchester coding, zero bit first
    FskPulseManchesterZerobit,
}

/// Pulse timing handed to the demodulator, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Nominal width of a short pulse
    pub short_width: u32,
    /// Nominal width of a long pulse
    pub long_width: u32,
    /// Gap that ends a transmission
    pub reset_limit: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            short_width: 50,
            long_width: 100,
            reset_limit: 150,
        }
    }
}

/// A bit pattern of arbitrary length, MSB first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitPattern {
    /// Pattern bytes
    pub bytes: Vec<u8>,
    /// Number of significant bits in `bytes`
    pub bits: usize,
}

impl BitPattern {
    /// Create a pattern, rejecting empty or oversized ones
    pub fn new(bytes: &[u8], bits: usize) -> Result<Self, DecodeError> {
        if bits == 0 {
            return Err(DecodeError::InvalidPattern("pattern is empty".to_string()));
        }
        if bits > MAX_PREAMBLE_BITS {
            return Err(DecodeError::InvalidPattern(format!(
                "pattern of {} bits exceeds maximum {}",
                bits, MAX_PREAMBLE_BITS
            )));
        }
        if bits > bytes.len() * 8 {
            return Err(DecodeError::InvalidPattern(format!(
                "{} bits requested from {} bytes",
                bits,
                bytes.len()
            )));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
            bits,
        })
    }

    /// Re-check a pattern that came from deserialization
    pub fn validate(&self) -> Result<(), DecodeError> {
        Self::new(&self.bytes, self.bits).map(|_| ())
    }
}

impl Default for BitPattern {
    fn default() -> Self {
        Self {
            bytes: PREAMBLE.to_vec(),
            bits: PREAMBLE_BITS,
        }
    }
}

/// Names of the record fields, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFields(pub Vec<String>);

impl Default for OutputFields {
    fn default() -> Self {
        Self(
            [
                "model",
                "type",
                "id",
                "status",
                "pressure",
                "temperature",
                "raw",
                "mic",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
    }
}

/// Immutable description of the decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Human readable device name
    pub name: String,
    /// Value of the `model` field
    pub model: String,
    /// Value of the `type` field
    pub sensor_type: String,
    /// Radio modulation
    pub modulation: Modulation,
    /// Pulse timing
    pub timing: Timing,
    /// Synchronization pattern preceding each frame
    pub preamble: BitPattern,
    /// Bits after a match from which the trailing-bit check is counted
    pub frame_lead_bits: usize,
    /// Bits required after `match + frame_lead_bits`
    pub min_trailing_bits: usize,
    /// Search advance after each candidate
    pub candidate_step: usize,
    /// Frame integrity check
    pub integrity: Integrity,
    /// Output field names
    pub fields: OutputFields,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            name: "Subaru TPMS".to_string(),
            model: MODEL.to_string(),
            sensor_type: SENSOR_TYPE.to_string(),
            modulation: Modulation::FskPulseManchesterZerobit,
            timing: Timing::default(),
            preamble: BitPattern::default(),
            frame_lead_bits: FRAME_LEAD_BITS,
            min_trailing_bits: MIN_TRAILING_BITS,
            candidate_step: CANDIDATE_STEP,
            integrity: Integrity::Sum8,
            fields: OutputFields::default(),
        }
    }
}

impl DecoderConfig {
    /// Use a different preamble
    pub fn with_preamble(mut self, preamble: BitPattern) -> Self {
        self.preamble = preamble;
        self
    }

    /// Check values that deserialization cannot
    pub fn validate(&self) -> Result<(), DecodeError> {
        self.preamble.validate()?;
        if self.candidate_step == 0 {
            return Err(DecodeError::InvalidPattern(
                "candidate step must be at least 1".to_string(),
            ));
        }
        if self.fields.0.len() != RECORD_FIELDS {
            return Err(DecodeError::InvalidField(format!(
                "{} output field names given, records have {}",
                self.fields.0.len(),
                RECORD_FIELDS
            )));
        }
        Ok(())
    }

    /// Bit offset of the frame relative to a preamble match
    pub fn frame_offset(&self) -> usize {
        self.preamble.bits
    }

    /// Whether a match at `offset` leaves room for a frame in a row of `row_bits`
    pub fn has_room(&self, offset: usize, row_bits: usize) -> bool {
        offset
            .saturating_add(self.frame_lead_bits)
            .saturating_add(self.min_trailing_bits)
            <= row_bits
    }
}
