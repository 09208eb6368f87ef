//! Compression session.
//!
//! [`HuffmanCodec`] sequences the pipeline stages:
//!
//! ```text
//! compress:   read -> count -> build tree -> build codes -> pack -> write
//! decompress: read -> strip header and padding -> decode symbols -> write
//! ```
//!
//! The code tables built by the most recent compression are kept in the
//! session, together with the packed file they were built for, so that a
//! later `decompress` of that same file can use them. Packed files do not
//! carry their table; see [`CodecConfig::code_table_sidecar`] for the
//! on-disk side channel.

use crate::codes::{CodeTable, ReverseCodeTable, build_code_tables};
use crate::config::CodecConfig;
use crate::frequency::FrequencyTable;
use crate::pack::BitPacker;
use crate::tree::HuffmanTree;
use crate::unpack::BitUnpacker;
use oxihuff_core::error::{OxiHuffError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which packed files a session table may decode.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    /// Built by [`HuffmanCodec::encode`]; tied to no file.
    Memory,
    /// Built for, or loaded beside, this packed file.
    File(PathBuf),
    /// Supplied by the caller; decodes any file.
    Explicit,
}

#[derive(Debug, Clone)]
struct Session {
    /// `None` when the table was loaded rather than built.
    frequencies: Option<FrequencyTable>,
    codes: CodeTable,
    reverse: ReverseCodeTable,
    binding: Binding,
}

/// A static Huffman compression session.
///
/// A session is mutable state: each [`encode`](Self::encode) or
/// [`compress`](Self::compress) replaces the code tables of the previous one.
/// One instance must not be shared between threads; build a fresh codec per
/// logical operation instead.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
    session: Option<Session>,
}

impl HuffmanCodec {
    /// Create a codec with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with `config`.
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// The codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `text` and keep its code tables in the session.
    ///
    /// Trailing whitespace is stripped first when the configuration asks for
    /// it. Text with no symbols fails with [`OxiHuffError::EmptyInput`] and
    /// leaves the session untouched.
    pub fn encode(&mut self, text: &str) -> Result<Vec<u8>> {
        let text = self.config.prepare_text(text);

        let frequencies = FrequencyTable::from_text(text);
        debug!(
            symbols = frequencies.total(),
            distinct = frequencies.len(),
            "counted frequencies"
        );

        let tree = HuffmanTree::build(&frequencies)?;
        let (codes, reverse) = build_code_tables(&tree)?;
        debug!(
            nodes = tree.len(),
            max_code_len = codes.max_code_len(),
            "built code table"
        );

        let packed = BitPacker::new(&codes).pack(text)?;

        self.session = Some(Session {
            frequencies: Some(frequencies),
            codes,
            reverse,
            binding: Binding::Memory,
        });
        Ok(packed)
    }

    /// Decode `packed` with the session's code table.
    pub fn decode(&self, packed: &[u8]) -> Result<String> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| OxiHuffError::missing_code_table(None))?;
        BitUnpacker::new(&session.reverse).unpack(packed)
    }

    /// Compress the text file at `source` into a sibling packed file.
    ///
    /// Returns the path of the packed file. With the sidecar enabled the code
    /// table is also written next to it; with it disabled any sidecar left by
    /// an earlier compression of the same file is removed.
    pub fn compress(&mut self, source: &Path) -> Result<PathBuf> {
        let output = self.config.packed_path(source);
        if output == source {
            return Err(OxiHuffError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} already has the packed extension; refusing to overwrite it",
                    source.display()
                ),
            )));
        }

        let text = fs::read_to_string(source)?;
        let packed = self.encode(&text)?;
        fs::write(&output, &packed)?;

        let sidecar = self.config.sidecar_path(&output);
        if let Some(session) = self.session.as_mut() {
            session.binding = Binding::File(output.clone());
            if self.config.code_table_sidecar {
                session.codes.save_sidecar(&sidecar)?;
            } else if sidecar.is_file() {
                fs::remove_file(&sidecar)?;
                debug!(path = %sidecar.display(), "removed stale code table");
            }
        }

        info!(
            source = %source.display(),
            output = %output.display(),
            input_bytes = text.len(),
            packed_bytes = packed.len(),
            "compressed"
        );
        Ok(output)
    }

    /// Decompress the packed file at `packed_path` into a sibling text file.
    ///
    /// The session's code table is used only if it was built by compressing
    /// to this same path, or supplied through
    /// [`load_code_table`](Self::load_code_table). Otherwise, with the sidecar
    /// enabled, the table is loaded from the file's sidecar and kept in the
    /// session. Without either the call fails with
    /// [`OxiHuffError::MissingCodeTable`]; a table built for another file is
    /// never used.
    pub fn decompress(&mut self, packed_path: &Path) -> Result<PathBuf> {
        let packed = fs::read(packed_path)?;

        if !self.has_table_for(packed_path) {
            let sidecar = self.config.sidecar_path(packed_path);
            if !self.config.code_table_sidecar || !sidecar.is_file() {
                return Err(OxiHuffError::missing_code_table(Some(
                    packed_path.to_path_buf(),
                )));
            }
            let codes = CodeTable::load_sidecar(&sidecar)?;
            self.install(codes, Binding::File(packed_path.to_path_buf()))?;
        }

        let text = self.decode(&packed)?;
        let output = self.config.decompressed_path(packed_path);
        fs::write(&output, &text)?;

        info!(
            source = %packed_path.display(),
            output = %output.display(),
            packed_bytes = packed.len(),
            output_bytes = text.len(),
            "decompressed"
        );
        Ok(output)
    }

    /// Replace the session with an externally supplied code table.
    ///
    /// [`decompress`](Self::decompress) then uses it for any packed file.
    pub fn load_code_table(&mut self, codes: CodeTable) -> Result<()> {
        self.install(codes, Binding::Explicit)
    }

    /// Check if the session holds a table that belongs to `packed_path`.
    fn has_table_for(&self, packed_path: &Path) -> bool {
        match self.session.as_ref().map(|s| &s.binding) {
            Some(Binding::Explicit) => true,
            Some(Binding::File(path)) => path == packed_path,
            Some(Binding::Memory) | None => false,
        }
    }

    fn install(&mut self, codes: CodeTable, binding: Binding) -> Result<()> {
        if codes.is_empty() {
            return Err(OxiHuffError::invalid_code_table("no codes"));
        }
        if !codes.is_prefix_free() {
            return Err(OxiHuffError::invalid_code_table("codes are not prefix-free"));
        }
        let reverse = codes.reverse();
        self.session = Some(Session {
            frequencies: None,
            codes,
            reverse,
            binding,
        });
        Ok(())
    }

    /// Code table of the current session.
    pub fn code_table(&self) -> Option<&CodeTable> {
        self.session.as_ref().map(|s| &s.codes)
    }

    /// Reverse code table of the current session.
    pub fn reverse_code_table(&self) -> Option<&ReverseCodeTable> {
        self.session.as_ref().map(|s| &s.reverse)
    }

    /// Frequencies of the last encoded text, if the session was built by
    /// encoding.
    pub fn frequencies(&self) -> Option<&FrequencyTable> {
        self.session.as_ref().and_then(|s| s.frequencies.as_ref())
    }

    /// Drop the session state.
    pub fn reset(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let mut codec = HuffmanCodec::new();
        let packed = codec.encode("abracadabra").unwrap();
        assert_eq!(packed, vec![0x01, 0x6E, 0x8A, 0xDC]);
        assert_eq!(codec.decode(&packed).unwrap(), "abracadabra");
        assert_eq!(codec.frequencies().unwrap().get('a'), 5);
    }

    #[test]
    fn test_decode_without_session() {
        let codec = HuffmanCodec::new();
        let err = codec.decode(&[0x01, 0x6E, 0x8A, 0xDC]).unwrap_err();
        assert!(matches!(err, OxiHuffError::MissingCodeTable { path: None }));
    }

    #[test]
    fn test_trailing_whitespace() {
        let mut codec = HuffmanCodec::new();
        let packed = codec.encode("abc  \n").unwrap();
        assert_eq!(codec.decode(&packed).unwrap(), "abc");
        assert!(codec.code_table().unwrap().get(' ').is_none());

        let mut codec =
            HuffmanCodec::with_config(CodecConfig::new().with_trim_trailing_whitespace(false));
        let packed = codec.encode("abc  \n").unwrap();
        assert_eq!(codec.decode(&packed).unwrap(), "abc  \n");
    }

    #[test]
    fn test_empty_keeps_previous_session() {
        let mut codec = HuffmanCodec::new();
        let packed = codec.encode("ab").unwrap();
        assert!(matches!(codec.encode(" \n\t"), Err(OxiHuffError::EmptyInput)));
        assert_eq!(codec.decode(&packed).unwrap(), "ab");
    }

    #[test]
    fn test_encoded_table_is_not_used_for_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.bin");
        let mut codec = HuffmanCodec::with_config(CodecConfig::session_only());

        let packed = codec.encode("abracadabra").unwrap();
        std::fs::write(&path, &packed).unwrap();

        let err = codec.decompress(&path).unwrap_err();
        assert!(matches!(err, OxiHuffError::MissingCodeTable { path: Some(_) }));
        assert_eq!(codec.decode(&packed).unwrap(), "abracadabra");
    }

    #[test]
    fn test_compress_binds_table_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        std::fs::write(&source, "banana").unwrap();
        let mut codec = HuffmanCodec::with_config(CodecConfig::session_only());

        let packed = codec.compress(&source).unwrap();
        assert!(codec.has_table_for(&packed));
        assert!(!codec.has_table_for(&dir.path().join("b.bin")));

        let table = codec.code_table().unwrap().clone();
        codec.load_code_table(table).unwrap();
        assert!(codec.has_table_for(&dir.path().join("b.bin")));
    }

    #[test]
    fn test_reset_and_load() {
        let mut codec = HuffmanCodec::new();
        let packed = codec.encode("mississippi").unwrap();
        let table = codec.code_table().unwrap().clone();

        codec.reset();
        assert!(codec.code_table().is_none());

        codec.load_code_table(table).unwrap();
        assert!(codec.frequencies().is_none());
        assert_eq!(codec.decode(&packed).unwrap(), "mississippi");

        assert!(codec.load_code_table(CodeTable::default()).is_err());
    }
}
