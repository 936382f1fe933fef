//! Row scanner for noisy captures

use crate::bitrow::BitRow;
use crate::config::DecoderConfig;
use crate::decoder::decode_at_preamble;
use crate::error::DecodeError;
use crate::locator::candidates;
use crate::types::DecodedRecord;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::debug;

/// A record decoded at a specific preamble offset in the row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRecord {
    /// Bit offset where the preamble match starts
    pub offset: usize,

    /// The decoded record
    pub record: DecodedRecord,
}

/// Scan a row for valid frames, even if it is mostly noise
///
/// This function:
/// 1. Searches bit by bit for the preamble
/// 2. Stops at the first match without room for a full frame
/// 3. Attempts to decode the frame after each match
/// 4. Advances two bits past every match, decoded or not
///
/// Rejected candidates never abort the scan.
pub fn scan_row(row: &BitRow, config: &DecoderConfig) -> Vec<LocatedRecord> {
    scan_row_with_stats(row, config).0
}

/// Why a scan produced what it produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// At least one record was decoded
    Decoded(usize),
    /// Candidates were found but all were rejected
    Rejected,
    /// No candidate with enough trailing bits was found
    NoSignal,
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Total bits in the row
    pub bits_scanned: usize,

    /// Number of preamble matches handed to the decoder
    pub candidates: usize,

    /// Number of valid records decoded
    pub records_found: usize,

    /// Number of candidates rejected by the checksum
    pub checksum_failures: usize,

    /// Number of candidates rejected for lack of bits
    pub insufficient_bits: usize,
}

impl ScanStats {
    /// Classify the scan
    pub fn outcome(&self) -> ScanOutcome {
        if self.records_found > 0 {
            ScanOutcome::Decoded(self.records_found)
        } else if self.candidates > 0 {
            ScanOutcome::Rejected
        } else {
            ScanOutcome::NoSignal
        }
    }

    /// Fraction of candidates that decoded, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.candidates == 0 {
            0.0
        } else {
            (self.records_found as f64 / self.candidates as f64) * 100.0
        }
    }

    /// Fold another row's statistics into this one
    pub fn merge(&mut self, other: &ScanStats) {
        self.bits_scanned += other.bits_scanned;
        self.candidates += other.candidates;
        self.records_found += other.records_found;
        self.checksum_failures += other.checksum_failures;
        self.insufficient_bits += other.insufficient_bits;
    }
}

/// Scan a row with statistics
pub fn scan_row_with_stats(row: &BitRow, config: &DecoderConfig) -> (Vec<LocatedRecord>, ScanStats) {
    let mut stats = ScanStats {
        bits_scanned: row.len(),
        ..Default::default()
    };
    let mut results = Vec::new();

    #[cfg(feature = "logging")]
    debug!("Starting row scan of {} bits", row.len());

    for offset in candidates(row, config) {
        stats.candidates += 1;

        match decode_at_preamble(row, offset, config) {
            Ok(record) => {
                #[cfg(feature = "logging")]
                debug!("Decoded sensor {} at bit {}", record.id, offset);

                results.push(LocatedRecord { offset, record });
            }
            Err(e) => {
                #[cfg(feature = "logging")]
                debug!("Rejected candidate at bit {}: {:?}", offset, e);

                match e {
                    DecodeError::ChecksumMismatch { .. } => stats.checksum_failures += 1,
                    DecodeError::InsufficientBits { .. } => stats.insufficient_bits += 1,
                    _ => {}
                }
            }
        }
    }

    stats.records_found = results.len();

    #[cfg(feature = "logging")]
    debug!(
        "Scan complete: {} records from {} candidates",
        stats.records_found, stats.candidates
    );

    (results, stats)
}

/// Scan a multi-row capture
///
/// Only the first row carries a frame for this device; the rest are ignored.
pub fn scan_buffer(rows: &[BitRow], config: &DecoderConfig) -> (Vec<LocatedRecord>, ScanStats) {
    match rows.first() {
        Some(row) => scan_row_with_stats(row, config),
        None => (Vec::new(), ScanStats::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitrow::BitRowBuilder;
    use crate::config::BitPattern;

    const FRAME: [u8; 8] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x64, 0x00, 0x0E];

    fn subaru_row(lead: usize, frame: &[u8], tail: usize) -> BitRow {
        BitRowBuilder::new()
            .pad(false, lead)
            .push_bytes(&[0x7F, 0xFF, 0x00])
            .push_bytes(frame)
            .pad(false, tail)
            .build()
    }

    #[test]
    fn test_scan_clean_row() {
        let row = subaru_row(0, &FRAME, 24);
        let (results, stats) = scan_row_with_stats(&row, &DecoderConfig::default());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].offset, 0);
        assert_eq!(results[0].record.id, "001122");
        assert_eq!(stats.outcome(), ScanOutcome::Decoded(1));
    }

    #[test]
    fn test_scan_with_noise_before() {
        let row = subaru_row(13, &FRAME, 24);
        let results = scan_row(&row, &DecoderConfig::default());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].offset, 13);
        assert_eq!(results[0].record.temperature, 50);
    }

    #[test]
    fn test_scan_rejected_frame() {
        let mut frame = FRAME;
        frame[7] ^= 0x01;
        let row = subaru_row(0, &frame, 24);
        let (results, stats) = scan_row_with_stats(&row, &DecoderConfig::default());

        assert!(results.is_empty());
        assert_eq!(stats.checksum_failures, 1);
        assert_eq!(stats.outcome(), ScanOutcome::Rejected);
    }

    #[test]
    fn test_scan_no_signal() {
        let row = BitRow::from_bytes(&[0xAA; 32]);
        let (results, stats) = scan_row_with_stats(&row, &DecoderConfig::default());

        assert!(results.is_empty());
        assert_eq!(stats.outcome(), ScanOutcome::NoSignal);
        assert_eq!(stats.acceptance_rate(), 0.0);
    }

    #[test]
    fn test_scan_overlapping_candidates() {
        let config = DecoderConfig::default()
            .with_preamble(BitPattern::new(&[0x55, 0x55, 0x55], 24).unwrap());
        // 26 alternating bits: matches at 0 and 2, only the second is aligned
        let row = BitRowBuilder::new()
            .push_bytes(&[0x55, 0x55, 0x55])
            .push_bits(&[0x40], 2)
            .push_bytes(&FRAME)
            .pad(false, 30)
            .build();
        let (results, stats) = scan_row_with_stats(&row, &config);

        assert_eq!(stats.candidates, 2);
        assert_eq!(stats.checksum_failures, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].offset, 2);
        assert_eq!(results[0].record.raw, "001122334464000E");
    }

    #[test]
    fn test_scan_buffer_uses_first_row() {
        let config = DecoderConfig::default();
        let rows = [subaru_row(0, &FRAME, 24), subaru_row(0, &FRAME, 24)];

        let (results, _) = scan_buffer(&rows, &config);
        assert_eq!(results.len(), 1);

        let (results, stats) = scan_buffer(&[], &config);
        assert!(results.is_empty());
        assert_eq!(stats, ScanStats::default());
    }

    #[test]
    fn test_stats_merge() {
        let mut total = ScanStats::default();
        total.merge(&ScanStats {
            bits_scanned: 10,
            candidates: 2,
            records_found: 1,
            checksum_failures: 1,
            insufficient_bits: 0,
        });
        total.merge(&ScanStats {
            bits_scanned: 5,
            ..Default::default()
        });
        assert_eq!(total.bits_scanned, 15);
        assert_eq!(total.acceptance_rate(), 50.0);
    }
}
