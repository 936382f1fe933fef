//! Frame decoding (strict mode)

use crate::bitrow::BitRow;
use crate::config::DecoderConfig;
use crate::constants::{Integrity, CHECKSUM_COVERAGE, FRAME_LEN, PREAMBLE_BITS};
use crate::error::DecodeError;
use crate::types::{DecodedRecord, RawFrame};
use alloc::string::ToString;

/// Read the 8 frame bytes starting at bit `frame_start`
pub fn extract_frame(row: &BitRow, frame_start: usize) -> Result<RawFrame, DecodeError> {
    row.read_bytes_at::<FRAME_LEN>(frame_start).map(RawFrame::new)
}

/// Verify the integrity byte of an extracted frame
pub fn validate_frame(frame: &RawFrame, integrity: Integrity) -> Result<(), DecodeError> {
    let expected = frame.checksum();
    let actual = integrity.compute(&frame.as_bytes()[..CHECKSUM_COVERAGE]);
    if actual != expected {
        return Err(DecodeError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

/// Decode the frame starting at bit `frame_start`
///
/// This function performs strict validation:
/// - Validates that 64 bits are available
/// - Validates the SUM8 checksum
///
/// Field values are never range checked.
pub fn decode(row: &BitRow, frame_start: usize) -> Result<DecodedRecord, DecodeError> {
    let frame = extract_frame(row, frame_start)?;
    validate_frame(&frame, Integrity::Sum8)?;
    Ok(DecodedRecord::from_frame(frame))
}

/// Decode the frame following a preamble match at `preamble_offset`
///
/// The model, type and integrity tag come from `config`.
pub fn decode_at_preamble(
    row: &BitRow,
    preamble_offset: usize,
    config: &DecoderConfig,
) -> Result<DecodedRecord, DecodeError> {
    let frame = extract_frame(row, preamble_offset + config.frame_offset())?;
    validate_frame(&frame, config.integrity)?;

    let mut record = DecodedRecord::from_frame(frame);
    record.model = config.model.clone();
    record.sensor_type = config.sensor_type.clone();
    record.mic = config.integrity.tag().to_string();
    Ok(record)
}

/// Decode a frame given as bytes, e.g. a captured `raw` value
///
/// Only the first 8 bytes are used.
pub fn decode_frame_from_bytes(data: &[u8]) -> Result<DecodedRecord, DecodeError> {
    let bytes: [u8; FRAME_LEN] = data
        .get(..FRAME_LEN)
        .and_then(|head| head.try_into().ok())
        .ok_or(DecodeError::InsufficientBits {
            needed: FRAME_LEN * 8,
            available: data.len() * 8,
        })?;
    let frame = RawFrame::new(bytes);
    validate_frame(&frame, Integrity::Sum8)?;
    Ok(DecodedRecord::from_frame(frame))
}

/// Decode a row whose preamble sits at bit 0, frame at byte offset 3
pub fn decode_anchored(row: &BitRow) -> Result<DecodedRecord, DecodeError> {
    decode(row, PREAMBLE_BITS)
}
