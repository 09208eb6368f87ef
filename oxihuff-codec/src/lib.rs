//! # OxiHuff Codec
//!
//! Static Huffman compression of text.
//!
//! The codec counts symbol frequencies, builds a Huffman tree with a
//! deterministic tie-break, derives a prefix-free code table and packs the
//! encoded bits behind a one-byte padding header:
//!
//! ```text
//! text ─► FrequencyTable ─► HuffmanTree ─► CodeTable ─► BitPacker ─► bytes
//! bytes ─► BitUnpacker (ReverseCodeTable) ─► text
//! ```
//!
//! Packed streams do not embed their code table. [`HuffmanCodec`] keeps the
//! table of its latest compression in memory, and by default also writes it
//! to a JSON sidecar next to the packed file.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::HuffmanCodec;
//!
//! let mut codec = HuffmanCodec::new();
//! let packed = codec.encode("abracadabra").expect("encode failed");
//! assert_eq!(packed, [0x01, 0x6E, 0x8A, 0xDC]);
//!
//! let text = codec.decode(&packed).expect("decode failed");
//! assert_eq!(text, "abracadabra");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod codes;
pub mod config;
pub mod frequency;
pub mod pack;
pub mod sidecar;
pub mod tree;
pub mod unpack;

// Re-exports
pub use codec::HuffmanCodec;
pub use codes::{Code, CodeTable, MAX_CODE_LENGTH, ReverseCodeTable, build_code_tables};
pub use config::CodecConfig;
pub use frequency::FrequencyTable;
pub use pack::{BitPacker, pack, packed_len, padding_for};
pub use tree::{HuffmanTree, Node, NodeId};
pub use unpack::{BitUnpacker, unpack};

pub use oxihuff_core::{OxiHuffError, Result};

/// Encode `text` as-is and return the packed stream with its code table.
///
/// Unlike [`HuffmanCodec::encode`], no whitespace is stripped.
pub fn encode(text: &str) -> Result<(Vec<u8>, CodeTable)> {
    let tree = HuffmanTree::build(&FrequencyTable::from_text(text))?;
    let table = CodeTable::from_tree(&tree)?;
    let packed = pack(text, &table)?;
    Ok((packed, table))
}

/// Decode a packed stream with the code table it was encoded with.
pub fn decode(packed: &[u8], table: &CodeTable) -> Result<String> {
    unpack(packed, &table.reverse())
}
