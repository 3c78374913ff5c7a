//! Info command implementation.

use crate::utils::{format_size, format_symbol};
use oxihuff_huffman::{CodeTable, Header, HuffmanCodec};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Serialize)]
struct SymbolInfo {
    symbol: u8,
    length: u8,
    code: String,
}

#[derive(Serialize)]
struct InfoOutput {
    file: String,
    size: u64,
    mode: &'static str,
    content_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length_counts: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    symbols: Vec<SymbolInfo>,
}

impl InfoOutput {
    fn new(file: &Path, size: u64, header: &Header) -> Result<Self, Box<dyn std::error::Error>> {
        let mut output = Self {
            file: file.display().to_string(),
            size,
            mode: match header {
                Header::Empty => "empty",
                Header::Huffman { .. } => "huffman",
                Header::Raw { .. } => "raw",
            },
            content_length: header.content_len(),
            header_length: header.header_len(),
            padding: None,
            length_counts: None,
            symbols: Vec::new(),
        };

        if let Header::Huffman {
            symbols, padding, ..
        } = header
        {
            let table = CodeTable::from_lengths(symbols);
            output.padding = Some(*padding);
            output.length_counts = Some(Header::length_counts(symbols)?.to_vec());
            output.symbols = symbols
                .iter()
                .filter_map(|s| {
                    table.get(s.symbol).map(|code| SymbolInfo {
                        symbol: s.symbol,
                        length: s.length,
                        code: code.to_string(),
                    })
                })
                .collect();
        }
        Ok(output)
    }
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let size = std::fs::metadata(file)?.len();
    let header = HuffmanCodec::inspect(BufReader::new(File::open(file)?))?;
    let info = InfoOutput::new(file, size, &header)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", info.file);
    println!("Size: {}", format_size(info.size));
    println!("Mode: {}", info.mode);
    println!("Content length: {} bytes", info.content_length);
    if let Some(header_length) = info.header_length {
        println!("Header length: {} bytes", header_length);
    }
    if info.content_length > 0 && info.size > 0 {
        println!(
            "Ratio: {:.1}%",
            info.size as f64 / info.content_length as f64 * 100.0
        );
    }

    if let Some(padding) = info.padding {
        println!("Padding: {} bits", padding);
    }
    if let Some(counts) = &info.length_counts {
        println!();
        println!("Codes per length:");
        for (index, count) in counts.iter().enumerate().filter(|(_, c)| **c > 0) {
            println!("  {:>2} bits: {}", index + 1, count);
        }
    }
    if !info.symbols.is_empty() {
        println!();
        println!("{:>8} {:>6}  Code", "Symbol", "Length");
        println!("{}", "-".repeat(40));
        for s in &info.symbols {
            println!("{:>8} {:>6}  {}", format_symbol(s.symbol), s.length, s.code);
        }
    }

    Ok(())
}
