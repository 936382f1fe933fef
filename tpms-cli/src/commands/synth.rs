use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use tpms_core::encoder::FrameBuilder;
use tracing::info;

pub fn execute(
    output: &str,
    id: u32,
    pressure: u16,
    temperature: i16,
    status: u8,
    lead_bits: usize,
    count: usize,
) -> Result<()> {
    info!("Synthesizing {} rows for sensor {:06X} to {}", count, id, output);

    let row = FrameBuilder::new(id)
        .pressure(pressure)
        .temperature(temperature)
        .status(status)
        .lead_bits(lead_bits)
        .build()
        .with_context(|| format!("Failed to build frame for sensor {:#x}", id))?;

    let mut output_data = String::new();
    writeln!(
        output_data,
        "# sensor {:06X} pressure {} temperature {}C status 0b{:08b}",
        id, pressure, temperature, status
    )?;
    for _ in 0..count {
        writeln!(output_data, "{}", row)?;
    }

    // Write output file
    fs::write(output, &output_data)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!("Successfully wrote {} rows of {} bits", count, row.len());

    Ok(())
}
