//! Bounds-checked view over one demodulated row of bits
//!
//! Bits are stored MSB-first within each byte, the way a demodulator
//! appends them. The row length is explicit; the padding bits of the last
//! byte are never readable.

use crate::error::DecodeError;
use alloc::format;
use alloc::string::String;
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;
use core::str::FromStr;

/// One captured row of demodulated bits
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitRow {
    data: Bytes,
    bits: usize,
}

impl BitRow {
    /// Create a row from storage and an explicit bit length
    pub fn new(data: Bytes, bits: usize) -> Result<Self, DecodeError> {
        if bits > data.len() * 8 {
            return Err(DecodeError::InvalidRow(format!(
                "bit length {} exceeds storage of {} bytes",
                bits,
                data.len()
            )));
        }
        Ok(Self { data, bits })
    }

    /// Create a row covering every bit of `data`
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            data: Bytes::copy_from_slice(data),
            bits: data.len() * 8,
        }
    }

    /// Number of bits in the row
    pub fn len(&self) -> usize {
        self.bits
    }

    /// Check if the row holds no bits
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Backing bytes (the last one may be partially used)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bits available at and after `bit_offset`
    pub fn remaining(&self, bit_offset: usize) -> usize {
        self.bits.saturating_sub(bit_offset)
    }

    /// Read a single bit
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bits {
            return None;
        }
        Some(self.data[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Read a fully populated byte at a byte-aligned offset
    pub fn byte_at(&self, byte_offset: usize) -> Option<u8> {
        let end = byte_offset.checked_add(1)?.checked_mul(8)?;
        if end > self.bits {
            return None;
        }
        Some(self.data[byte_offset])
    }

    /// Read 8 bits starting at any bit offset
    pub fn read_byte_at_bit(&self, bit_offset: usize) -> Option<u8> {
        if self.remaining(bit_offset) < 8 {
            return None;
        }
        let index = bit_offset / 8;
        let shift = bit_offset % 8;
        if shift == 0 {
            return Some(self.data[index]);
        }
        Some((self.data[index] << shift) | (self.data[index + 1] >> (8 - shift)))
    }

    /// Read `N` consecutive bytes starting at any bit offset
    pub fn read_bytes_at<const N: usize>(&self, bit_offset: usize) -> Result<[u8; N], DecodeError> {
        let available = self.remaining(bit_offset);
        if available < N * 8 {
            return Err(DecodeError::InsufficientBits {
                needed: N * 8,
                available,
            });
        }

        let mut out = [0u8; N];
        for (i, byte) in out.iter_mut().enumerate() {
            // In range: checked above
            *byte = self.read_byte_at_bit(bit_offset + i * 8).unwrap_or_default();
        }
        Ok(out)
    }

    /// Check whether `pattern` occurs at `bit_offset`
    pub fn matches_at(&self, bit_offset: usize, pattern: &[u8], pattern_bits: usize) -> bool {
        if self.remaining(bit_offset) < pattern_bits {
            return false;
        }
        (0..pattern_bits).all(|i| match pattern.get(i / 8) {
            Some(byte) => self.bit(bit_offset + i) == Some(byte & (0x80 >> (i % 8)) != 0),
            None => false,
        })
    }
}

impl fmt::Display for BitRow {
    /// Formats as `{<bits>}<hex>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.bits)?;
        for byte in &self.data[..self.bits.div_ceil(8)] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for BitRow {
    type Err = DecodeError;

    /// Parse `{<bits>}<hex>` or bare hex (bit length = 4 per digit)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (declared, digits) = match s.strip_prefix('{') {
            Some(rest) => {
                let (len, digits) = rest
                    .split_once('}')
                    .ok_or_else(|| DecodeError::InvalidRow(format!("unterminated length in {:?}", s)))?;
                let len = len
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| DecodeError::InvalidRow(format!("bad length {:?}: {}", len, e)))?;
                (Some(len), digits.trim())
            }
            None => (None, s),
        };

        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);

        let mut padded = String::from(digits);
        if padded.len() % 2 == 1 {
            padded.push('0');
        }
        let data = hex::decode(&padded)
            .map_err(|e| DecodeError::InvalidRow(format!("bad hex {:?}: {}", digits, e)))?;

        let bits = declared.unwrap_or(digits.len() * 4);
        BitRow::new(Bytes::from(data), bits)
    }
}

/// Incrementally build a row bit by bit
#[derive(Debug, Default)]
pub struct BitRowBuilder {
    buf: BytesMut,
    bits: usize,
}

impl BitRowBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bit
    pub fn push_bit(mut self, bit: bool) -> Self {
        if self.bits % 8 == 0 {
            self.buf.put_u8(0);
        }
        if bit {
            let last = self.buf.len() - 1;
            self.buf[last] |= 0x80 >> (self.bits % 8);
        }
        self.bits += 1;
        self
    }

    /// Append the first `count` bits of `data`, MSB first
    pub fn push_bits(mut self, data: &[u8], count: usize) -> Self {
        for i in 0..count.min(data.len() * 8) {
            self = self.push_bit(data[i / 8] & (0x80 >> (i % 8)) != 0);
        }
        self
    }

    /// Append whole bytes
    pub fn push_bytes(self, data: &[u8]) -> Self {
        self.push_bits(data, data.len() * 8)
    }

    /// Append `count` copies of `bit`
    pub fn pad(mut self, bit: bool, count: usize) -> Self {
        for _ in 0..count {
            self = self.push_bit(bit);
        }
        self
    }

    /// Number of bits appended so far
    pub fn len(&self) -> usize {
        self.bits
    }

    /// Check if no bits were appended
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Freeze into a row
    pub fn build(self) -> BitRow {
        BitRow {
            data: self.buf.freeze(),
            bits: self.bits,
        }
    }
}
