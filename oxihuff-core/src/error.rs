//! Error types for OxiHuff operations.
//!
//! Every stage of the compression pipeline reports failures through
//! [`OxiHuffError`]. Nothing in the pipeline retries or recovers; errors are
//! propagated to the caller with enough context to tell which stage failed.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from the source, destination or sidecar file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input has no symbols to build a code from.
    #[error("Empty input: nothing to compress")]
    EmptyInput,

    /// A symbol in the text has no entry in the code table.
    #[error("Encoding error: symbol {symbol:?} has no code")]
    UnencodableSymbol {
        /// The symbol that could not be encoded.
        symbol: char,
    },

    /// Decompression was attempted without a code table for the stream.
    #[error("No code table available{}", for_path(.path))]
    MissingCodeTable {
        /// The packed file that could not be decoded, if known.
        path: Option<PathBuf>,
    },

    /// The bit stream ended or diverged in the middle of a code.
    #[error("Decoding error at bit position {bit_position}: {pending_bits} unmatched bit(s)")]
    Decoding {
        /// Bit position (within the payload) where decoding stopped.
        bit_position: u64,
        /// Number of bits accumulated without matching a code.
        pending_bits: usize,
    },

    /// The packed stream header is malformed.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// A loaded code table is not a usable prefix code.
    #[error("Invalid code table: {message}")]
    InvalidCodeTable {
        /// Description of the problem.
        message: String,
    },

    /// The tree is deeper than a code register can hold.
    #[error("Code length {length} exceeds maximum {max}")]
    CodeTooLong {
        /// Depth of the offending leaf.
        length: usize,
        /// Maximum supported code length.
        max: usize,
    },
}

fn for_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" for {}", p.display()),
        None => String::new(),
    }
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an unencodable symbol error.
    pub fn unencodable(symbol: char) -> Self {
        Self::UnencodableSymbol { symbol }
    }

    /// Create a missing code table error.
    pub fn missing_code_table(path: Option<PathBuf>) -> Self {
        Self::MissingCodeTable { path }
    }

    /// Create a decoding error.
    pub fn decoding(bit_position: u64, pending_bits: usize) -> Self {
        Self::Decoding {
            bit_position,
            pending_bits,
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an invalid code table error.
    pub fn invalid_code_table(message: impl Into<String>) -> Self {
        Self::InvalidCodeTable {
            message: message.into(),
        }
    }

    /// Create a code too long error.
    pub fn code_too_long(length: usize, max: usize) -> Self {
        Self::CodeTooLong { length, max }
    }

    /// Short name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::EmptyInput => "count-frequencies",
            Self::CodeTooLong { .. } => "build-codes",
            Self::UnencodableSymbol { .. } => "encode",
            Self::MissingCodeTable { .. } | Self::InvalidCodeTable { .. } => "load-codes",
            Self::InvalidHeader { .. } => "strip-header",
            Self::Decoding { .. } => "decode-symbols",
        }
    }
}
