//! Bit packing (encode side).
//!
//! # Packed stream layout
//!
//! ```text
//! ┌──────────┬──────────────────────────────┬─────────────────┐
//! │ pad (u8) │ encoded symbol bits          │ `pad` zero bits │
//! └──────────┴──────────────────────────────┴─────────────────┘
//! ```
//!
//! `pad = 8 - (encoded_bits % 8)` is always in `1..=8`: a stream whose
//! encoded bits already end on a byte boundary still gets a full byte of
//! padding. Bits are packed MSB-first.

use crate::codes::CodeTable;
use oxihuff_core::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};
use tracing::debug;

/// Size of the padding header in bits.
pub const HEADER_BITS: u64 = 8;

/// Number of zero bits appended after `encoded_bits` bits of payload.
pub fn padding_for(encoded_bits: u64) -> u8 {
    8 - (encoded_bits % 8) as u8
}

/// Size in bytes of the packed stream for `encoded_bits` bits of payload.
pub fn packed_len(encoded_bits: u64) -> u64 {
    (HEADER_BITS + encoded_bits + padding_for(encoded_bits) as u64) / 8
}

/// Encodes text into a packed stream with a fixed code table.
#[derive(Debug, Clone, Copy)]
pub struct BitPacker<'a> {
    table: &'a CodeTable,
}

impl<'a> BitPacker<'a> {
    /// Create a packer for `table`.
    pub fn new(table: &'a CodeTable) -> Self {
        Self { table }
    }

    /// Number of bits `text` encodes to.
    ///
    /// Fails with [`OxiHuffError::UnencodableSymbol`] on the first symbol
    /// without a code.
    pub fn encoded_bit_len(&self, text: &str) -> Result<u64> {
        text.chars().try_fold(0u64, |acc, symbol| {
            let code = self
                .table
                .get(symbol)
                .ok_or_else(|| OxiHuffError::unencodable(symbol))?;
            Ok(acc + code.len() as u64)
        })
    }

    /// Encode `text` into a packed stream.
    pub fn pack(&self, text: &str) -> Result<Vec<u8>> {
        let encoded_bits = self.encoded_bit_len(text)?;
        let pad = padding_for(encoded_bits);

        let mut writer = BitWriter::new(Vec::with_capacity(packed_len(encoded_bits) as usize));
        writer.write_bits(pad as u32, 8)?;

        for symbol in text.chars() {
            // Every symbol was checked by encoded_bit_len
            let code = self
                .table
                .get(symbol)
                .ok_or_else(|| OxiHuffError::unencodable(symbol))?;
            writer.write_long_bits(code.bits(), code.len() as u8)?;
        }

        writer.write_zeros(pad)?;
        debug_assert!(writer.is_byte_aligned());
        debug_assert_eq!(writer.bits_written(), packed_len(encoded_bits) * 8);
        let packed = writer.finish()?;

        debug!(
            symbols = text.chars().count(),
            encoded_bits,
            pad,
            bytes = packed.len(),
            "packed stream"
        );
        Ok(packed)
    }
}

/// Encode `text` with `table` into a packed stream.
pub fn pack(text: &str, table: &CodeTable) -> Result<Vec<u8>> {
    BitPacker::new(table).pack(text)
}
