//! Codes command implementation.

use crate::utils::print_code_table;
use oxihuff_codec::{CodeTable, CodecConfig, FrequencyTable, HuffmanTree, packed_len};
use serde_json::json;
use std::fs;
use std::path::Path;

pub fn cmd_codes(
    file: &Path,
    json: bool,
    config: CodecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let text = config.prepare_text(&source);

    let frequencies = FrequencyTable::from_text(text);
    let tree = HuffmanTree::build(&frequencies)?;
    let table = CodeTable::from_tree(&tree)?;
    let encoded_bits = table.encoded_bit_len(&frequencies)?;

    if json {
        let symbols: Vec<_> = table
            .iter()
            .map(|(symbol, code)| {
                json!({
                    "symbol": symbol.to_string(),
                    "count": frequencies.get(symbol),
                    "code": code.to_string(),
                    "length": code.len(),
                })
            })
            .collect();
        let report = json!({
            "file": file.display().to_string(),
            "symbols": frequencies.total(),
            "distinct": table.len(),
            "encoded_bits": encoded_bits,
            "packed_bytes": packed_len(encoded_bits),
            "codes": symbols,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Code table for {}", file.display());
    println!();
    print_code_table(&table, &frequencies);
    println!(
        "Encoded: {} bit(s), {} packed byte(s)",
        encoded_bits,
        packed_len(encoded_bits)
    );
    Ok(())
}
