//! Library entry for tpms-cli used by integration tests and embedding.

pub mod commands;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use tpms_core::DecoderConfig;

// Re-export commands for convenience
pub use commands::*;

/// Load a decoder configuration from a JSON file, or the Subaru default
pub fn load_config(path: Option<&str>) -> Result<DecoderConfig> {
    let Some(path) = path else {
        return Ok(DecoderConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config: DecoderConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path))?;

    Ok(config)
}

/// Read a file, or stdin when `input` is "-"
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

/// Parse an integer given in decimal, `0x` hex or `0b` binary
pub fn parse_int(s: &str) -> Result<u32> {
    let s = s.trim();
    let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b") {
        u32::from_str_radix(bin, 2)
    } else {
        s.parse()
    };
    value.with_context(|| format!("Not a number: {}", s))
}
