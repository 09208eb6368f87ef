//! Roundtrip command implementation.

use crate::utils::{file_size, format_ratio};
use oxihuff_codec::{CodecConfig, HuffmanCodec};
use std::fs;
use std::path::Path;

pub fn cmd_roundtrip(file: &Path, config: CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut codec = HuffmanCodec::with_config(config);

    let packed = codec.compress(file)?;
    println!("Compressed {} -> {}", file.display(), packed.display());

    let output = codec.decompress(&packed)?;
    println!("Decompressed {} -> {}", packed.display(), output.display());

    let original = fs::read_to_string(file)?;
    let expected = codec.config().prepare_text(&original);
    let recovered = fs::read_to_string(&output)?;
    if recovered != expected {
        return Err(format!(
            "round trip mismatch: {} differs from {}",
            output.display(),
            file.display()
        )
        .into());
    }

    let input_bytes = file_size(file);
    println!(
        "OK: {} bytes recovered, packed to {} bytes ({})",
        recovered.len(),
        file_size(&packed),
        format_ratio(input_bytes, file_size(&packed))
    );
    Ok(())
}
