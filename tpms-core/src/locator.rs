//! Preamble search over a bit row

use crate::bitrow::BitRow;
use crate::config::{BitPattern, DecoderConfig};

#[cfg(feature = "logging")]
use tracing::trace;

/// Find the next occurrence of `pattern` in `row` at or after bit `start`
///
/// Every bit offset is tested, so occurrences overlapping an earlier one
/// are still reported when the caller restarts just past it.
pub fn locate(row: &BitRow, pattern: &BitPattern, start: usize) -> Option<usize> {
    let last = row.len().checked_sub(pattern.bits)?;
    (start..=last).find(|&offset| row.matches_at(offset, &pattern.bytes, pattern.bits))
}

/// Lazy sequence of preamble matches worth decoding
///
/// Ends at the first match that leaves too few trailing bits for a frame,
/// or when no further match exists. After each yield the search restarts
/// `candidate_step` bits past the match, whatever the decode outcome was.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    row: &'a BitRow,
    config: &'a DecoderConfig,
    next: usize,
    done: bool,
}

impl<'a> Candidates<'a> {
    /// Start a search at the beginning of `row`
    pub fn new(row: &'a BitRow, config: &'a DecoderConfig) -> Self {
        Self {
            row,
            config,
            next: 0,
            done: false,
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }

        let found = locate(self.row, &self.config.preamble, self.next)
            .filter(|&offset| self.config.has_room(offset, self.row.len()));

        match found {
            Some(offset) => {
                #[cfg(feature = "logging")]
                trace!("Preamble match at bit {}", offset);

                self.next = offset + self.config.candidate_step.max(1);
                Some(offset)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl core::iter::FusedIterator for Candidates<'_> {}

/// Enumerate candidate preamble offsets in `row`
pub fn candidates<'a>(row: &'a BitRow, config: &'a DecoderConfig) -> Candidates<'a> {
    Candidates::new(row, config)
}
