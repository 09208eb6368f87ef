//! Code table sidecar files.
//!
//! A packed stream does not carry its code table. The sidecar is a small JSON
//! document written next to the packed file so that a later session can
//! decode it:
//!
//! ```json
//! {
//!   "format": "oxihuff-codes",
//!   "version": 1,
//!   "codes": { "a": "0", "b": "110", "c": "100" }
//! }
//! ```

use crate::codes::{Code, CodeTable};
use oxihuff_core::error::{OxiHuffError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Format tag of a sidecar document.
pub const SIDECAR_FORMAT: &str = "oxihuff-codes";

/// Current sidecar version.
pub const SIDECAR_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SidecarDocument {
    format: String,
    version: u32,
    codes: BTreeMap<String, String>,
}

/// Serialization failures surface as I/O errors.
fn write_error(e: serde_json::Error) -> OxiHuffError {
    OxiHuffError::Io(io::Error::other(e))
}

impl CodeTable {
    /// Serialize the table to a sidecar JSON document.
    pub fn to_json(&self) -> Result<String> {
        let doc = SidecarDocument {
            format: SIDECAR_FORMAT.to_string(),
            version: SIDECAR_VERSION,
            codes: self
                .iter()
                .map(|(symbol, code)| (symbol.to_string(), code.to_string()))
                .collect(),
        };
        serde_json::to_string_pretty(&doc).map_err(write_error)
    }

    /// Parse and validate a sidecar JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SidecarDocument = serde_json::from_str(json)
            .map_err(|e| OxiHuffError::invalid_code_table(e.to_string()))?;

        if doc.format != SIDECAR_FORMAT {
            return Err(OxiHuffError::invalid_code_table(format!(
                "unknown format {:?}",
                doc.format
            )));
        }
        if doc.version != SIDECAR_VERSION {
            return Err(OxiHuffError::invalid_code_table(format!(
                "unsupported version {}",
                doc.version
            )));
        }
        if doc.codes.is_empty() {
            return Err(OxiHuffError::invalid_code_table("no codes"));
        }

        let mut pairs = Vec::with_capacity(doc.codes.len());
        for (key, bits) in &doc.codes {
            let mut chars = key.chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                return Err(OxiHuffError::invalid_code_table(format!(
                    "key {key:?} is not a single symbol"
                )));
            };
            pairs.push((symbol, bits.parse::<Code>()?));
        }
        Self::from_codes(pairs)
    }

    /// Write the table to `path`.
    pub fn save_sidecar(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), symbols = self.len(), "wrote code table");
        Ok(())
    }

    /// Read a table from `path`.
    pub fn load_sidecar(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        debug!(path = %path.display(), symbols = table.len(), "loaded code table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn table_for(text: &str) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(text)).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn test_json_roundtrip() {
        let table = table_for("hello, wörld\n\t\"quoted\"");
        let json = table.to_json().unwrap();
        assert!(json.contains(SIDECAR_FORMAT));
        assert_eq!(CodeTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_json_layout() {
        let json = table_for("abracadabra").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["codes"]["a"], "0");
        assert_eq!(value["codes"]["r"], "111");
    }

    #[test]
    fn test_rejects_bad_documents() {
        let cases = [
            "not json",
            r#"{"format":"other","version":1,"codes":{"a":"0"}}"#,
            r#"{"format":"oxihuff-codes","version":2,"codes":{"a":"0"}}"#,
            r#"{"format":"oxihuff-codes","version":1,"codes":{}}"#,
            r#"{"format":"oxihuff-codes","version":1,"codes":{"ab":"0"}}"#,
            r#"{"format":"oxihuff-codes","version":1,"codes":{"a":"02"}}"#,
            r#"{"format":"oxihuff-codes","version":1,"codes":{"a":"1","b":"10"}}"#,
        ];
        for json in cases {
            let err = CodeTable::from_json(json).unwrap_err();
            assert!(
                matches!(err, OxiHuffError::InvalidCodeTable { .. }),
                "{json} gave {err}"
            );
        }
    }

    #[test]
    fn test_write_error_is_io() {
        let source = serde_json::from_str::<SidecarDocument>("{").unwrap_err();
        let err = write_error(source);
        assert!(matches!(err, OxiHuffError::Io(_)));
        assert_eq!(err.stage(), "io");
    }

    #[test]
    fn test_sidecar_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.codes.json");
        let table = table_for("mississippi");

        table.save_sidecar(&path).unwrap();
        assert_eq!(CodeTable::load_sidecar(&path).unwrap(), table);

        let missing = dir.path().join("absent.codes.json");
        assert!(matches!(
            CodeTable::load_sidecar(&missing),
            Err(OxiHuffError::Io(_))
        ));
    }
}
