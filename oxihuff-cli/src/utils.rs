//! Utility functions for the CLI.

use oxihuff_codec::{CodeTable, FrequencyTable};
use std::cmp::Reverse;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global log subscriber. Logs go to stderr so that command
/// output stays clean.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a log subscriber was already installed");
    }
}

/// Printable form of a symbol.
pub fn display_symbol(symbol: char) -> String {
    match symbol {
        ' ' => "' '".to_string(),
        c if c.is_control() || c.is_whitespace() => c.escape_default().to_string(),
        c => c.to_string(),
    }
}

/// Print a code table with the frequency of every symbol.
pub fn print_code_table(table: &CodeTable, frequencies: &FrequencyTable) {
    println!("{:>8}  {:>10}  {:>6}  Code", "Symbol", "Count", "Length");
    println!("{}", "-".repeat(60));

    let mut rows: Vec<_> = table.iter().collect();
    rows.sort_by_key(|&(symbol, code)| {
        (code.len(), Reverse(frequencies.get(symbol)), symbol)
    });

    for (symbol, code) in rows {
        println!(
            "{:>8}  {:>10}  {:>6}  {}",
            display_symbol(symbol),
            frequencies.get(symbol),
            code.len(),
            code
        );
    }

    println!("{}", "-".repeat(60));
    println!(
        "{} symbol(s), {} distinct, longest code {} bit(s)",
        frequencies.total(),
        table.len(),
        table.max_code_len()
    );
}

/// Ratio line for a compressed file.
pub fn format_ratio(input_bytes: u64, packed_bytes: u64) -> String {
    if input_bytes == 0 {
        return "ratio n/a".to_string();
    }
    format!(
        "{:.1}% of original",
        packed_bytes as f64 / input_bytes as f64 * 100.0
    )
}

/// Size of the file at `path`, or 0 if it cannot be read.
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
