//! Frame encoding
//!
//! Produces frames and whole rows the way a Subaru sensor transmits them.
//! Used to synthesize captures for testing receivers.

use crate::bitrow::{BitRow, BitRowBuilder};
use crate::constants::{sum8, CHECKSUM_COVERAGE, FRAME_LEN, PREAMBLE, TEMPERATURE_OFFSET};
use crate::error::DecodeError;
use crate::types::RawFrame;
use alloc::format;

/// Largest identifier that fits in 24 bits
pub const MAX_SENSOR_ID: u32 = 0x00FF_FFFF;

/// Trailing bits appended after the frame by default
///
/// Enough to satisfy the trailing-bit check for a row-anchored preamble.
pub const DEFAULT_TAIL_BITS: usize = 24;

/// Encode a frame into bytes
///
/// The frame is encoded with the following layout:
/// 1. Sensor ID (3 bytes, big-endian)
/// 2. Pressure (2 bytes, big-endian)
/// 3. Temperature (1 byte, °C + 50)
/// 4. Status (1 byte)
/// 5. SUM8 of the 7 bytes above
pub fn encode_frame(id: u32, pressure: u16, raw_temperature: u8, status: u8) -> Result<RawFrame, DecodeError> {
    if id > MAX_SENSOR_ID {
        return Err(DecodeError::InvalidField(format!(
            "sensor id {:#x} exceeds 24 bits",
            id
        )));
    }

    let id = id.to_be_bytes();
    let pressure = pressure.to_be_bytes();
    let mut bytes = [
        id[1],
        id[2],
        id[3],
        pressure[0],
        pressure[1],
        raw_temperature,
        status,
        0,
    ];
    bytes[CHECKSUM_COVERAGE] = sum8(&bytes[..CHECKSUM_COVERAGE]);

    Ok(RawFrame::new(bytes))
}

/// Builder for constructing frames and rows with various options
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    id: u32,
    pressure: u16,
    temperature: i16,
    status: u8,
    checksum: Option<u8>,
    lead_bits: usize,
    tail_bits: usize,
}

impl FrameBuilder {
    /// Create a new frame builder
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pressure: 0,
            temperature: 0,
            status: 0,
            checksum: None,
            lead_bits: 0,
            tail_bits: DEFAULT_TAIL_BITS,
        }
    }

    /// Set the raw pressure
    pub fn pressure(mut self, pressure: u16) -> Self {
        self.pressure = pressure;
        self
    }

    /// Set the temperature in °C
    pub fn temperature(mut self, celsius: i16) -> Self {
        self.temperature = celsius;
        self
    }

    /// Set the status byte
    pub fn status(mut self, status: u8) -> Self {
        self.status = status;
        self
    }

    /// Force a checksum byte instead of the computed one
    pub fn checksum(mut self, checksum: u8) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Zero bits placed before the preamble
    pub fn lead_bits(mut self, bits: usize) -> Self {
        self.lead_bits = bits;
        self
    }

    /// Zero bits placed after the frame
    pub fn tail_bits(mut self, bits: usize) -> Self {
        self.tail_bits = bits;
        self
    }

    /// Build the frame
    pub fn build_frame(&self) -> Result<RawFrame, DecodeError> {
        let raw_temperature = u8::try_from(self.temperature.saturating_add(TEMPERATURE_OFFSET)).map_err(|_| {
            DecodeError::InvalidField(format!(
                "temperature {} °C outside {}..={}",
                self.temperature,
                -TEMPERATURE_OFFSET,
                u8::MAX as i16 - TEMPERATURE_OFFSET
            ))
        })?;

        let frame = encode_frame(self.id, self.pressure, raw_temperature, self.status)?;
        Ok(match self.checksum {
            Some(checksum) => {
                let mut bytes = *frame.as_bytes();
                bytes[FRAME_LEN - 1] = checksum;
                RawFrame::new(bytes)
            }
            None => frame,
        })
    }

    /// Build a complete row: lead bits, preamble, frame, tail bits
    pub fn build(&self) -> Result<BitRow, DecodeError> {
        let frame = self.build_frame()?;
        Ok(BitRowBuilder::new()
            .pad(false, self.lead_bits)
            .push_bytes(PREAMBLE)
            .push_bytes(frame.as_bytes())
            .pad(false, self.tail_bits)
            .build())
    }
}
