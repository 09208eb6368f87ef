//! Bit-level I/O for prefix codes.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level.
//!
//! # Bit Ordering
//!
//! OxiHuff packs bits MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of the first byte. A code `0b110` of length 3 is
//! therefore written as the bits `1`, `1`, `0` in that order.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//! writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiHuffError, Result};
use std::io::{self, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled into a 64-bit buffer and handed out MSB-first.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer; the valid bits are the low `bits_in_buffer` bits.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Ensure at least `count` bits are available in the buffer.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        debug_assert!(count <= 56, "Cannot fill more than 56 bits at once");

        while self.bits_in_buffer < count {
            let bytes_wanted = ((64 - self.bits_in_buffer as usize) / 8).min(7);
            let mut temp_buf = [0u8; 8];
            let n = match self.reader.read(&mut temp_buf[..bytes_wanted]) {
                Ok(0) => {
                    let missing = (count - self.bits_in_buffer).div_ceil(8);
                    return Err(OxiHuffError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("bit stream ended, {missing} more byte(s) expected"),
                    )));
                }
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            // Append bytes below the bits already buffered (MSB-first)
            for byte in temp_buf.iter().take(n) {
                self.buffer = (self.buffer << 8) | *byte as u64;
                self.bits_in_buffer += 8;
            }
        }

        Ok(())
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32, with the first bit read in the most
    /// significant position of the result.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let result = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer -= count;
        self.buffer &= (1u64 << self.bits_in_buffer).wrapping_sub(1);
        self.total_bits_read += count as u64;

        Ok(result)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read a whole byte. The stream does not need to be byte-aligned.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and writes complete
/// bytes to the underlying writer. Call [`finish`](Self::finish) when done to
/// zero-pad and write the final partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer; the pending bits are the low `bits_in_buffer` bits.
    buffer: u64,
    /// Number of bits in buffer (always below 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write; the highest of the `count` bits goes first
    /// * `count` - Number of bits to write (0-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write up to 64 bits to the stream, highest bit first.
    pub fn write_long_bits(&mut self, value: u64, count: u8) -> Result<()> {
        debug_assert!(count <= 64, "Cannot write more than 64 bits at once");

        if count > 32 {
            self.write_bits((value >> 32) as u32, count - 32)?;
            self.write_bits(value as u32, 32)
        } else {
            self.write_bits(value as u32, count)
        }
    }

    /// Write `count` zero bits.
    pub fn write_zeros(&mut self, count: u8) -> Result<()> {
        let mut left = count;
        while left > 0 {
            let chunk = left.min(32);
            self.write_bits(0, chunk)?;
            left -= chunk;
        }
        Ok(())
    }

    /// Check whether the next bit starts a new byte.
    pub fn is_byte_aligned(&self) -> bool {
        self.bits_in_buffer == 0
    }

    /// Pad to a byte boundary with zeros, flush, and return the writer.
    pub fn finish(mut self) -> Result<W> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.write_bits(0, padding)?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = vec![0xB5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert!(reader.read_bit().unwrap()); // MSB first
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.bits_read(), 8);
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = vec![0xF0, 0x0F];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0x00); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
    }

    #[test]
    fn test_bitreader_eof() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF]));
        reader.read_bits(6).unwrap();
        let err = reader.read_bits(3).unwrap_err();
        assert!(matches!(err, OxiHuffError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_bitreader_long_stream() {
        let data: Vec<u8> = (0..=255u8).collect();
        let mut reader = BitReader::new(Cursor::new(data));
        for expected in 0..=255u8 {
            assert_eq!(reader.read_byte().unwrap(), expected);
        }
        assert_eq!(reader.bits_read(), 256 * 8);
        assert!(reader.read_byte().is_err());
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [true, false, true, true, false, true, false, true] {
            writer.write_bits(bit as u32, 1).unwrap();
        }
        assert!(writer.is_byte_aligned());
        assert_eq!(writer.finish().unwrap(), vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_pads_with_zeros() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b11, 2).unwrap();
        assert_eq!(writer.bits_written(), 2);
        assert_eq!(writer.finish().unwrap(), vec![0b1100_0000]);
    }

    #[test]
    fn test_bitwriter_long_bits() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_long_bits(0x0123_4567_89AB_CDEF, 64).unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            vec![0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]
        );
    }

    #[test]
    fn test_write_zeros() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(1, 1).unwrap();
        writer.write_zeros(40).unwrap();
        writer.write_bits(1, 1).unwrap();
        assert_eq!(writer.bits_written(), 42);
        let out = writer.finish().unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(out[0], 0x80);
        assert_eq!(out[5], 0b0100_0000);
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_bits(0b10, 2).unwrap();
        writer.write_bits(0b110011, 6).unwrap();
        let output = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
    }
}
