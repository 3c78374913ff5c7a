//! OxiHuff CLI - canonical Huffman file compressor
//!
//! Compresses single files with a static canonical Huffman code.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{FileOptions, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust canonical Huffman compressor")]
#[command(long_about = "
OxiHuff compresses files with a static canonical Huffman code.
Compressed files get the .huf suffix by default.

Examples:
  oxihuff compress notes.txt
  oxihuff compress notes.txt -o packed.huf
  oxihuff decompress notes.txt.huf
  oxihuff info notes.txt.huf --json
  oxihuff test notes.txt.huf
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: input with .huf appended)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (default: input without .huf, or with .out appended)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Show the header of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check that a compressed file decodes
    #[command(alias = "t")]
    Test {
        /// Compressed file
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            force,
            verbose,
            progress,
        } => cmd_compress(
            &input,
            &FileOptions {
                output,
                force,
                verbose,
                progress,
            },
        ),
        Commands::Decompress {
            input,
            output,
            force,
            verbose,
            progress,
        } => cmd_decompress(
            &input,
            &FileOptions {
                output,
                force,
                verbose,
                progress,
            },
        ),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Test { file, verbose } => cmd_test(&file, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
