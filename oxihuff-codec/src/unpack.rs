//! Bit unpacking (decode side).

use crate::codes::{Code, ReverseCodeTable};
use crate::pack::HEADER_BITS;
use oxihuff_core::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::Cursor;
use tracing::debug;

/// Decodes packed streams with a fixed reverse code table.
#[derive(Debug, Clone, Copy)]
pub struct BitUnpacker<'a> {
    table: &'a ReverseCodeTable,
}

impl<'a> BitUnpacker<'a> {
    /// Create an unpacker for `table`.
    pub fn new(table: &'a ReverseCodeTable) -> Self {
        Self { table }
    }

    /// Number of encoded symbol bits in `packed`, after removing the header
    /// and the trailing padding.
    pub fn payload_bits(packed: &[u8]) -> Result<u64> {
        let Some(&pad) = packed.first() else {
            return Err(OxiHuffError::invalid_header(
                "stream is empty, padding header missing",
            ));
        };
        if !(1..=8).contains(&pad) {
            return Err(OxiHuffError::invalid_header(format!(
                "padding count {pad} out of range 1..=8"
            )));
        }

        let body_bits = (packed.len() as u64 - 1) * 8;
        if pad as u64 > body_bits {
            return Err(OxiHuffError::invalid_header(format!(
                "padding count {pad} exceeds {body_bits} payload bit(s)"
            )));
        }
        Ok(body_bits - pad as u64)
    }

    /// Decode `packed` back into text.
    ///
    /// Bits are accumulated one at a time until they exactly match a code.
    /// A run of bits longer than the longest code, or bits left unmatched
    /// when the payload ends, fail with [`OxiHuffError::Decoding`].
    pub fn unpack(&self, packed: &[u8]) -> Result<String> {
        let encoded_bits = Self::payload_bits(packed)?;
        let max_len = self.table.max_code_len();

        let mut reader = BitReader::new(Cursor::new(packed));
        reader.read_byte()?;

        let mut text = String::new();
        let mut scratch = Code::EMPTY;

        for position in 0..encoded_bits {
            let bit = reader.read_bit()?;
            scratch = scratch
                .push(bit)
                .ok_or_else(|| OxiHuffError::decoding(position + 1, scratch.len() + 1))?;

            if let Some(symbol) = self.table.get(&scratch) {
                text.push(symbol);
                scratch = Code::EMPTY;
            } else if scratch.len() >= max_len {
                return Err(OxiHuffError::decoding(position + 1, scratch.len()));
            }
        }

        if !scratch.is_empty() {
            return Err(OxiHuffError::decoding(encoded_bits, scratch.len()));
        }
        debug_assert_eq!(reader.bits_read(), HEADER_BITS + encoded_bits);

        debug!(
            encoded_bits,
            symbols = text.chars().count(),
            "unpacked stream"
        );
        Ok(text)
    }
}

/// Decode `packed` with `table`.
pub fn unpack(packed: &[u8], table: &ReverseCodeTable) -> Result<String> {
    BitUnpacker::new(table).unpack(packed)
}
