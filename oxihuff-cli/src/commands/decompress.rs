//! Decompress command implementation.

use oxihuff_codec::{CodeTable, CodecConfig, HuffmanCodec};
use std::path::Path;

pub fn cmd_decompress(
    file: &Path,
    codes: Option<&Path>,
    config: CodecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut codec = HuffmanCodec::with_config(config);
    if let Some(codes) = codes {
        codec.load_code_table(CodeTable::load_sidecar(codes)?)?;
    }

    let output = codec.decompress(file)?;
    println!("Decompressed {} -> {}", file.display(), output.display());
    Ok(())
}
