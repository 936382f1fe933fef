//! Constants and limits for the Subaru TPMS frame format

use serde::{Deserialize, Serialize};

/// Preamble pattern - 3 bytes for synchronization
pub const PREAMBLE: &[u8; 3] = &[0x7F, 0xFF, 0x00];

/// Length of the preamble in bits
pub const PREAMBLE_BITS: usize = 24;

/// Offset from the preamble match to the point the trailing-bit check starts from
pub const FRAME_LEAD_BITS: usize = 23;

/// Minimum number of bits that must remain after `match + FRAME_LEAD_BITS`
/// for a candidate to be worth decoding
pub const MIN_TRAILING_BITS: usize = 89;

/// Scan step after each candidate, successful or not
///
/// Smaller than the preamble so shifted false matches are still tried.
pub const CANDIDATE_STEP: usize = 2;

/// Frame size in bytes (7 payload bytes + 1 checksum byte)
pub const FRAME_LEN: usize = 8;

/// Number of bytes covered by the checksum
pub const CHECKSUM_COVERAGE: usize = FRAME_LEN - 1;

/// Raw temperature offset in degrees Celsius.
///
/// Provisional: this value was inferred from captures, not from documentation.
pub const TEMPERATURE_OFFSET: i16 = 50;

/// Maximum preamble length accepted in a custom configuration
pub const MAX_PREAMBLE_BITS: usize = 64;

/// Model name emitted in every record
pub const MODEL: &str = "Subaru";

/// Sensor family emitted in every record
pub const SENSOR_TYPE: &str = "TPMS";

/// Integrity method emitted in every record
pub const MIC: &str = "SUM8";

/// Number of fields in a decoded record
pub const RECORD_FIELDS: usize = 8;

/// Integrity methods understood by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Integrity {
    /// 8-bit additive sum of the preceding bytes
    Sum8,
}

impl Integrity {
    /// Tag emitted in the `mic` field
    pub const fn tag(&self) -> &'static str {
        match self {
            Integrity::Sum8 => MIC,
        }
    }

    /// Compute the integrity value over `data`
    pub fn compute(&self, data: &[u8]) -> u8 {
        match self {
            Integrity::Sum8 => sum8(data),
        }
    }
}

/// Modulo-256 sum of `data`
pub fn sum8(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Status byte of a frame (stored as a single byte)
///
/// Bit meanings come from vehicle service documentation and are not
/// confirmed against captures; none of them are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags(u8);

impl StatusFlags {
    /// Battery level is low
    pub const LOW_BATTERY: u8 = 0b1000_0000;

    /// Sensor reports a malfunction
    pub const SENSOR_FAIL: u8 = 0b0100_0000;

    /// Transmission is a response to an LF trigger
    pub const LF_RESPONSE: u8 = 0b0010_0000;

    /// Position detection in progress
    pub const PAL_IN_PROGRESS: u8 = 0b0001_0000;

    /// Tire rotation detected
    pub const ROLLING: u8 = 0b0000_1000;

    /// Mask of the 3-bit status code
    pub const CODE_MASK: u8 = 0b0000_0111;

    /// Create new flags from raw byte
    pub const fn new(flags: u8) -> Self {
        Self(flags)
    }

    /// Get raw flags byte
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Check if the battery is low
    pub const fn low_battery(&self) -> bool {
        (self.0 & Self::LOW_BATTERY) != 0
    }

    /// Check if the sensor reports a failure
    pub const fn sensor_fail(&self) -> bool {
        (self.0 & Self::SENSOR_FAIL) != 0
    }

    /// Check if this is an LF response transmission
    pub const fn lf_response(&self) -> bool {
        (self.0 & Self::LF_RESPONSE) != 0
    }

    /// Check if position detection is still running
    pub const fn pal_in_progress(&self) -> bool {
        (self.0 & Self::PAL_IN_PROGRESS) != 0
    }

    /// Check if the tire is rotating
    pub const fn rolling(&self) -> bool {
        (self.0 & Self::ROLLING) != 0
    }

    /// Get the status code
    pub const fn code(&self) -> StatusCode {
        StatusCode::from_bits(self.0 & Self::CODE_MASK)
    }
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self(0)
    }
}

/// Transmission reason carried in the low 3 bits of the status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    /// Responding to the "Learn" LF signal
    LearnLf,
    /// Pressure change detected
    PressureChange,
    /// Undocumented code 2
    Reserved,
    /// Responding to the "Entering off" LF signal
    EnteringOffLf,
    /// Position detection, timing synchronised with rotation
    PositionSynced,
    /// Position detection, timing not synchronised with rotation
    PositionUnsynced,
    /// Normal driving, position detection finished
    NormalDriving,
    /// Pressure change completed
    PressureChangeComplete,
}

impl StatusCode {
    /// Map the low 3 bits of a status byte to a code
    pub const fn from_bits(bits: u8) -> Self {
        match bits & StatusFlags::CODE_MASK {
            0 => StatusCode::LearnLf,
            1 => StatusCode::PressureChange,
            2 => StatusCode::Reserved,
            3 => StatusCode::EnteringOffLf,
            4 => StatusCode::PositionSynced,
            5 => StatusCode::PositionUnsynced,
            6 => StatusCode::NormalDriving,
            _ => StatusCode::PressureChangeComplete,
        }
    }
}
