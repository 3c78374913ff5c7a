//! Decoder: parse the header, rebuild the tree, walk the content bits.

use crate::context::CoderContext;
use crate::header::Header;
use crate::tree::HuffmanTree;
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::{BitReader, BitWriter, Progress};
use std::io::{Read, Write};

/// Decode a complete stream from `input` into `output`.
///
/// The caller resets `ctx` afterwards.
pub(crate) fn decode<R: Read, W: Write>(
    ctx: &mut CoderContext,
    input: R,
    output: W,
    progress: &mut dyn Progress,
) -> Result<()> {
    let mut reader = BitReader::new(input);
    let mut writer = BitWriter::new(output);

    let header = Header::read(&mut reader, progress)?;
    ctx.content_len = header.content_len();

    match header {
        Header::Empty => {}
        Header::Raw { content_len } => {
            ctx.disabled = true;
            copy_content(&mut reader, &mut writer, content_len, progress)?;
        }
        Header::Huffman {
            content_len,
            symbols,
            padding,
        } => {
            ctx.symbols = symbols;
            ctx.padding = padding;
            if content_len > 0 {
                let tree = ctx.tree.insert(HuffmanTree::rebuild(&ctx.symbols)?);
                decode_content(tree, &mut reader, &mut writer, padding, content_len, progress)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Skip the padding bits and decode `content_len` symbols.
///
/// Progress advances once per 8 bits consumed, padding included.
fn decode_content<R: Read, W: Write>(
    tree: &HuffmanTree,
    reader: &mut BitReader<R>,
    writer: &mut BitWriter<W>,
    padding: u8,
    content_len: u32,
    progress: &mut dyn Progress,
) -> Result<()> {
    for _ in 0..padding {
        reader.read_bit()?;
    }
    let mut bits = padding;

    let root = tree.root();
    let mut node = root;
    let mut decoded = 0u32;
    while decoded < content_len {
        let bit = reader.read_bit()?;
        bits += 1;
        if bits == 8 {
            progress.advance(1);
            bits = 0;
        }

        node = tree
            .step(node, bit)
            .ok_or_else(|| OxiHuffError::invalid_huffman(reader.bit_position()))?;
        if let Some(symbol) = tree.leaf_symbol(node) {
            writer.write_byte(symbol)?;
            decoded += 1;
            node = root;
        }
    }
    Ok(())
}

fn copy_content<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    writer: &mut BitWriter<W>,
    content_len: u32,
    progress: &mut dyn Progress,
) -> Result<()> {
    for copied in 0..content_len {
        let byte = reader.read_byte().map_err(|e| match e {
            OxiHuffError::UnexpectedEof { .. } => {
                OxiHuffError::unexpected_eof((content_len - copied) as usize)
            }
            other => other,
        })?;
        writer.write_byte(byte)?;
        progress.advance(1);
    }
    Ok(())
}
