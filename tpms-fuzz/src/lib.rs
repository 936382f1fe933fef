//! Fuzzing entry points for tpms-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_scan

use tpms_core::{BitRow, DecoderConfig};

/// Decode the first bytes of `data` as a frame
pub fn fuzz_decode(data: &[u8]) {
    use tpms_core::decoder::decode_frame_from_bytes;

    // Try to decode - should never panic
    let _ = decode_frame_from_bytes(data);
}

/// Scan `data` as a row, dropping up to 7 trailing bits chosen by the first byte
pub fn fuzz_scan(data: &[u8]) {
    use tpms_core::scanner::scan_row;

    let Some((&trim, rest)) = data.split_first() else {
        return;
    };
    let bits = (rest.len() * 8).saturating_sub((trim % 8) as usize);
    let Ok(row) = BitRow::new(bytes::Bytes::copy_from_slice(rest), bits) else {
        return;
    };

    // Try to scan - should never panic
    let _ = scan_row(&row, &DecoderConfig::default());
}

/// Parse `data` as a textual row
pub fn fuzz_parse(data: &[u8]) {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<BitRow>();
    }
}
