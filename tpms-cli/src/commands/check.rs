use anyhow::{bail, Context, Result};
use colored::*;
use tpms_core::{constants::FRAME_LEN, decoder::decode_frame_from_bytes, DecodeError, DecodedRecord};
use tracing::info;

/// Verify one frame given as hex and print its fields
pub fn execute(frame_hex: &str) -> Result<DecodedRecord> {
    info!("Checking frame: {}", frame_hex);

    let digits = frame_hex.trim().trim_start_matches("0x");
    let bytes = hex::decode(digits).with_context(|| format!("Invalid hex frame: {}", frame_hex))?;
    if bytes.len() != FRAME_LEN {
        bail!("Frame must be {} bytes, got {}", FRAME_LEN, bytes.len());
    }

    match decode_frame_from_bytes(&bytes) {
        Ok(record) => {
            println!("{} Checksum valid (SUM8 = {:02X})", "✓".green(), bytes[FRAME_LEN - 1]);
            println!("ID:          {}", record.id);
            println!("Status:      {}", record.status);
            println!("Pressure:    {}", record.pressure);
            println!("Temperature: {} C", record.temperature);

            let flags = record.flags();
            println!("\n=== Status Flags (provisional) ===");
            println!("Low battery:  {}", flags.low_battery());
            println!("Sensor fail:  {}", flags.sensor_fail());
            println!("LF response:  {}", flags.lf_response());
            println!("PAL running:  {}", flags.pal_in_progress());
            println!("Rolling:      {}", flags.rolling());
            println!("Code:         {:?}", flags.code());

            Ok(record)
        }
        Err(DecodeError::ChecksumMismatch { expected, actual }) => {
            println!(
                "{} Checksum mismatch: frame carries {:02X}, bytes sum to {:02X}",
                "✗".red(),
                expected,
                actual
            );
            bail!("Checksum mismatch")
        }
        Err(e) => Err(e.into()),
    }
}
