//! Compressed stream header.
//!
//! ```text
//! Huffman form                         Raw form
//! +--------+---------------------+     +--------+-------------------+
//! | 0x48   | marker          (1) |     | 0x4E   | marker        (1) |
//! | u16 BE | header length   (2) |     | u32 BE | content len   (4) |
//! | u32 BE | content length  (4) |     +--------+-------------------+
//! | u8[16] | codes per length    |     | raw content bytes          |
//! | u8[N]  | symbols             |     +----------------------------+
//! | u8     | padding bits    (1) |
//! +--------+---------------------+
//! | padding bits + codes, flushed |
//! +------------------------------+
//! ```
//!
//! The header length counts every header byte after the marker, including
//! the two length bytes themselves. An empty input is stored as the marker
//! followed by a header length of 2 and nothing else.
//!
//! Symbols are listed by ascending code length, then ascending value, so
//! the canonical codes can be regenerated from the counts and symbols alone.

use crate::canonical::{MAX_CODE_LENGTH, SymbolLength};
use crate::frequency::SYMBOL_COUNT;
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::{BitReader, BitWriter, Progress};
use std::io::{Read, Write};

/// Marker of the Huffman form.
pub const HUFFMAN_MARKER: u8 = 0x48;

/// Marker of the raw (Huffman disabled) form.
pub const RAW_MARKER: u8 = 0x4E;

/// Header length of an empty input.
pub const EMPTY_HEADER_LEN: u16 = 2;

/// Fixed part of the Huffman header length: length field, content length,
/// per-length counts and padding.
pub const FIXED_HEADER_LEN: u16 = 2 + 4 + MAX_CODE_LENGTH as u16 + 1;

/// A parsed or to-be-written stream header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// Empty input: no content follows.
    Empty,
    /// Huffman coded content.
    Huffman {
        /// Number of symbols encoded in the content.
        content_len: u32,
        /// Symbols with their code lengths, in canonical order.
        symbols: Vec<SymbolLength>,
        /// Zero bits preceding the first code.
        padding: u8,
    },
    /// Content stored verbatim.
    Raw {
        /// Number of raw bytes that follow.
        content_len: u32,
    },
}

impl Header {
    /// Leading marker byte.
    pub fn marker(&self) -> u8 {
        match self {
            Header::Empty | Header::Huffman { .. } => HUFFMAN_MARKER,
            Header::Raw { .. } => RAW_MARKER,
        }
    }

    /// Number of bytes of original content.
    pub fn content_len(&self) -> u32 {
        match self {
            Header::Empty => 0,
            Header::Huffman { content_len, .. } | Header::Raw { content_len } => *content_len,
        }
    }

    /// Whether the content is stored raw.
    pub fn is_raw(&self) -> bool {
        matches!(self, Header::Raw { .. })
    }

    /// Value of the header length field (Huffman form only).
    pub fn header_len(&self) -> Option<u16> {
        match self {
            Header::Empty => Some(EMPTY_HEADER_LEN),
            Header::Huffman { symbols, .. } => Some(FIXED_HEADER_LEN + symbols.len() as u16),
            Header::Raw { .. } => None,
        }
    }

    /// Total encoded size in bytes, marker included.
    pub fn encoded_len(&self) -> usize {
        match self.header_len() {
            Some(len) => 1 + len as usize,
            None => 1 + 4,
        }
    }

    /// Count symbols per code length 1..=16.
    pub fn length_counts(symbols: &[SymbolLength]) -> Result<[u8; MAX_CODE_LENGTH]> {
        let mut counts = [0u16; MAX_CODE_LENGTH];
        for sym in symbols {
            let length = sym.length as usize;
            if length == 0 || length > MAX_CODE_LENGTH {
                return Err(OxiHuffError::invalid_header(format!(
                    "code length {} of symbol {:#04x} cannot be stored",
                    sym.length, sym.symbol
                )));
            }
            counts[length - 1] += 1;
        }

        let mut packed = [0u8; MAX_CODE_LENGTH];
        for (slot, &count) in packed.iter_mut().zip(counts.iter()) {
            *slot = u8::try_from(count).map_err(|_| {
                OxiHuffError::invalid_header(format!("{count} codes share one length"))
            })?;
        }
        Ok(packed)
    }

    /// Serialize the header.
    pub fn write<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_byte(self.marker())?;
        match self {
            Header::Empty => {
                let [high, low] = EMPTY_HEADER_LEN.to_be_bytes();
                writer.write_byte(high)?;
                writer.write_byte(low)?;
            }
            Header::Huffman {
                content_len,
                symbols,
                padding,
            } => {
                let counts = Self::length_counts(symbols)?;
                let header_len = FIXED_HEADER_LEN + symbols.len() as u16;
                let [high, low] = header_len.to_be_bytes();
                writer.write_byte(high)?;
                writer.write_byte(low)?;
                writer.write_u32(*content_len)?;
                writer.write_bytes(&counts)?;
                for sym in symbols {
                    writer.write_byte(sym.symbol)?;
                }
                writer.write_byte(*padding)?;
            }
            Header::Raw { content_len } => {
                writer.write_u32(*content_len)?;
            }
        }
        Ok(())
    }

    /// Parse a header.
    ///
    /// Progress advances by 1 for the marker, then by the declared header
    /// length (Huffman form) or by 4 (raw form).
    pub fn read<R: Read>(reader: &mut BitReader<R>, progress: &mut dyn Progress) -> Result<Self> {
        let marker = reader.read_byte()?;
        progress.advance(1);

        match marker {
            RAW_MARKER => {
                let content_len = reader.read_u32()?;
                progress.advance(4);
                Ok(Header::Raw { content_len })
            }
            HUFFMAN_MARKER => Self::read_huffman(reader, progress),
            other => Err(OxiHuffError::invalid_marker(other)),
        }
    }

    fn read_huffman<R: Read>(
        reader: &mut BitReader<R>,
        progress: &mut dyn Progress,
    ) -> Result<Self> {
        let start = reader.bytes_read();
        let high = reader.read_byte()?;
        let low = reader.read_byte()?;
        let declared = u16::from_be_bytes([high, low]);
        progress.advance(declared as u64);

        if declared == EMPTY_HEADER_LEN {
            return Ok(Header::Empty);
        }
        if declared < FIXED_HEADER_LEN {
            return Err(OxiHuffError::header_length_mismatch(
                declared,
                reader.bytes_read() - start,
            ));
        }

        let content_len = reader.read_u32()?;
        let mut counts = [0u8; MAX_CODE_LENGTH];
        reader.read_bytes(&mut counts)?;

        let total: usize = counts.iter().map(|&c| c as usize).sum();
        if total > SYMBOL_COUNT {
            return Err(OxiHuffError::invalid_header(format!(
                "length table lists {total} symbols"
            )));
        }

        let mut symbols = Vec::with_capacity(total);
        for (index, &count) in counts.iter().enumerate() {
            for _ in 0..count {
                let symbol = reader.read_byte()?;
                symbols.push(SymbolLength::new(symbol, index as u8 + 1));
            }
        }
        let padding = reader.read_byte()?;

        let consumed = reader.bytes_read() - start;
        if consumed != declared as u64 {
            return Err(OxiHuffError::header_length_mismatch(declared, consumed));
        }

        let mut seen = [false; SYMBOL_COUNT];
        for sym in &symbols {
            if std::mem::replace(&mut seen[sym.symbol as usize], true) {
                return Err(OxiHuffError::invalid_header(format!(
                    "symbol {:#04x} listed twice",
                    sym.symbol
                )));
            }
        }
        if padding > 7 {
            return Err(OxiHuffError::invalid_header(format!(
                "padding of {padding} bits"
            )));
        }

        log::debug!(
            "huffman header: {} symbols, content length {}, padding {}",
            symbols.len(),
            content_len,
            padding
        );

        Ok(Header::Huffman {
            content_len,
            symbols,
            padding,
        })
    }
}
