//! OxiHuff CLI - static Huffman text compression
//!
//! Compresses a text file into a packed `.bin` stream and recovers it again.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{cmd_codes, cmd_compress, cmd_decompress, cmd_roundtrip};
use oxihuff_codec::CodecConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Static Huffman text compression")]
#[command(long_about = "
OxiHuff compresses text with a static Huffman code built from the
text's own symbol frequencies.

The packed file does not contain its code table. By default the table is
written next to it as <name>.codes.json so that a later run can decompress.

Examples:
  oxihuff compress sample.txt
  oxihuff decompress sample.bin
  oxihuff decompress sample.bin --codes saved.codes.json
  oxihuff roundtrip sample.txt
  oxihuff codes sample.txt --json
")]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Keep code tables in memory only; do not write or read sidecar files
    #[arg(long, global = true)]
    no_sidecar: bool,

    /// Keep trailing whitespace of the source text
    #[arg(long, global = true)]
    keep_whitespace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file into a packed .bin file
    #[command(alias = "c")]
    Compress {
        /// Text file to compress
        file: PathBuf,
    },

    /// Decompress a packed file into <name>_decompressed.txt
    #[command(alias = "d")]
    Decompress {
        /// Packed file to decompress
        file: PathBuf,

        /// Code table to decode with (defaults to the sidecar next to FILE)
        #[arg(short, long)]
        codes: Option<PathBuf>,
    },

    /// Compress then decompress in one session and verify the result
    #[command(alias = "r")]
    Roundtrip {
        /// Text file to round-trip
        file: PathBuf,
    },

    /// Print the code table built for a text file
    Codes {
        /// Text file to analyze
        file: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let config = CodecConfig::new()
        .with_code_table_sidecar(!cli.no_sidecar)
        .with_trim_trailing_whitespace(!cli.keep_whitespace);

    let result = match cli.command {
        Commands::Compress { file } => cmd_compress(&file, config),
        Commands::Decompress { file, codes } => cmd_decompress(&file, codes.as_deref(), config),
        Commands::Roundtrip { file } => cmd_roundtrip(&file, config),
        Commands::Codes { file, json } => cmd_codes(&file, json, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decompress_codes() {
        let cli =
            Cli::try_parse_from(["oxihuff", "-vv", "decompress", "a.bin", "--codes", "t.json"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Decompress { file, codes } => {
                assert_eq!(file, PathBuf::from("a.bin"));
                assert_eq!(codes, Some(PathBuf::from("t.json")));
            }
            _ => panic!("expected decompress"),
        }
    }
}
