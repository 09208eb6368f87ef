//! Codec configuration: file naming and session behavior.

use std::path::{Path, PathBuf};

/// Configuration for a [`HuffmanCodec`](crate::HuffmanCodec) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Extension of the packed file written next to the source.
    pub packed_extension: String,
    /// Suffix appended to the packed file's stem for the recovered text.
    pub decompressed_suffix: String,
    /// Extension of the recovered text file.
    pub decompressed_extension: String,
    /// Strip trailing whitespace from the source text before encoding.
    pub trim_trailing_whitespace: bool,
    /// Persist the code table next to the packed file.
    pub code_table_sidecar: bool,
    /// Extension of the code table sidecar (replaces the packed extension).
    pub sidecar_extension: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            packed_extension: "bin".to_string(),
            decompressed_suffix: "_decompressed".to_string(),
            decompressed_extension: "txt".to_string(),
            trim_trailing_whitespace: true,
            code_table_sidecar: true,
            sidecar_extension: "codes.json".to_string(),
        }
    }
}

impl CodecConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep code tables in the session only; no sidecar is written or read.
    pub fn session_only() -> Self {
        Self {
            code_table_sidecar: false,
            ..Self::default()
        }
    }

    /// Set the packed file extension.
    pub fn with_packed_extension(mut self, extension: impl Into<String>) -> Self {
        self.packed_extension = extension.into();
        self
    }

    /// Set the suffix of the recovered text file.
    pub fn with_decompressed_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.decompressed_suffix = suffix.into();
        self
    }

    /// Set the extension of the recovered text file.
    pub fn with_decompressed_extension(mut self, extension: impl Into<String>) -> Self {
        self.decompressed_extension = extension.into();
        self
    }

    /// Enable or disable trailing whitespace stripping.
    pub fn with_trim_trailing_whitespace(mut self, trim: bool) -> Self {
        self.trim_trailing_whitespace = trim;
        self
    }

    /// Enable or disable the code table sidecar.
    pub fn with_code_table_sidecar(mut self, enabled: bool) -> Self {
        self.code_table_sidecar = enabled;
        self
    }

    /// Path of the packed file for `source`.
    pub fn packed_path(&self, source: &Path) -> PathBuf {
        source.with_extension(&self.packed_extension)
    }

    /// Path of the recovered text file for `packed`.
    pub fn decompressed_path(&self, packed: &Path) -> PathBuf {
        let stem = packed
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!(
            "{stem}{}.{}",
            self.decompressed_suffix, self.decompressed_extension
        );
        packed.with_file_name(name)
    }

    /// Path of the code table sidecar for `packed`.
    pub fn sidecar_path(&self, packed: &Path) -> PathBuf {
        packed.with_extension(&self.sidecar_extension)
    }

    /// Apply the source text contract (trailing whitespace).
    pub fn prepare_text<'t>(&self, text: &'t str) -> &'t str {
        if self.trim_trailing_whitespace {
            text.trim_end()
        } else {
            text
        }
    }
}
