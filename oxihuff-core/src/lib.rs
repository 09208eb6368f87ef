//! # OxiHuff Core
//!
//! Core components for the OxiHuff compression library.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and the command-line tool:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for prefix codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiHuff is a small layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Caller                                              │
//! │     oxihuff CLI (paths, flags, status output)           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     frequencies, tree, code tables, pack / unpack       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, error types                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0xABC, 12).unwrap();
//! let data = writer.finish().unwrap();
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiHuffError, Result};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_architecture_box_aligned() {
        let widths: Vec<usize> = include_str!("lib.rs")
            .lines()
            .filter(|l| {
                l.starts_with("//! ") && l.chars().nth(4).is_some_and(|c| "┌│├└".contains(c))
            })
            .map(|l| l.chars().count())
            .collect();
        assert_eq!(widths.len(), 10);
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}");
    }
}
