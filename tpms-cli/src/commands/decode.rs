use anyhow::{Context, Result};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use tpms_core::{
    scanner::{scan_row_with_stats, ScanOutcome, ScanStats},
    BitRow, DecodedRecord,
};
use tracing::{debug, info, warn};

#[derive(Serialize, Deserialize)]
struct RecoveredRecord {
    row: usize,
    offset: usize,
    #[serde(flatten)]
    record: DecodedRecord,
}

/// Decode every row of `input`, returning the combined statistics
pub fn execute(
    input: &str,
    output: Option<&str>,
    stats_only: bool,
    config: Option<&str>,
) -> Result<ScanStats> {
    info!("Decoding rows from: {}", input);

    let config = crate::load_config(config)?;
    let content = crate::read_input(input)?;

    let mut totals = ScanStats::default();
    let mut recovered = Vec::new();
    let mut rows = 0;
    let mut skipped = 0;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row: BitRow = match line.parse() {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping line {}: {}", line_no + 1, e);
                skipped += 1;
                continue;
            }
        };

        let (located, stats) = scan_row_with_stats(&row, &config);
        match stats.outcome() {
            ScanOutcome::Decoded(n) => debug!("Row {}: {} records", rows, n),
            ScanOutcome::Rejected => debug!("Row {}: all candidates rejected", rows),
            ScanOutcome::NoSignal => debug!("Row {}: no preamble", rows),
        }

        totals.merge(&stats);
        recovered.extend(located.into_iter().map(|lr| RecoveredRecord {
            row: rows,
            offset: lr.offset,
            record: lr.record,
        }));
        rows += 1;
    }

    // Print statistics
    println!("\n=== Decode Results ===");
    println!("Rows decoded:      {}", rows);
    if skipped > 0 {
        println!("Rows skipped:      {}", skipped.to_string().yellow());
    }
    println!("Bits scanned:      {} bits", totals.bits_scanned);
    println!("Candidates:        {}", totals.candidates);
    println!("Valid records:     {}", totals.records_found.to_string().green());
    println!("Checksum failures: {}", totals.checksum_failures);
    println!("Acceptance rate:   {:.2}%", totals.acceptance_rate());
    println!();

    if stats_only {
        return Ok(totals);
    }

    if let Some(output_path) = output {
        // Write to JSON file
        let json = serde_json::to_string_pretty(&recovered)
            .with_context(|| "Failed to serialize decoded records")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded records written to: {}", output_path);
    } else {
        // Print to stdout
        println!("=== Decoded Records ===");
        for rec in &recovered {
            let fields: Vec<String> = rec
                .record
                .labelled(&config.fields)
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            println!("Row {} @ bit {}: {}", rec.row, rec.offset, fields.join(" "));
        }
        if recovered.is_empty() {
            println!("{} No valid frames found", "✗".red());
        }
    }

    Ok(totals)
}
