//! Compress command implementation.

use crate::utils::{file_size, format_ratio};
use oxihuff_codec::{CodecConfig, HuffmanCodec};
use std::path::Path;

pub fn cmd_compress(file: &Path, config: CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut codec = HuffmanCodec::with_config(config);
    let output = codec.compress(file)?;

    let input_bytes = file_size(file);
    let packed_bytes = file_size(&output);
    println!(
        "Compressed {} -> {} ({} -> {} bytes, {})",
        file.display(),
        output.display(),
        input_bytes,
        packed_bytes,
        format_ratio(input_bytes, packed_bytes)
    );
    if codec.config().code_table_sidecar {
        println!("Code table: {}", codec.config().sidecar_path(&output).display());
    }
    Ok(())
}
