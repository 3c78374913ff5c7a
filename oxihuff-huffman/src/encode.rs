//! Two-pass encoder: count, then emit header and content.

use crate::canonical::{CanonicalCode, canonical_lengths};
use crate::context::CoderContext;
use crate::header::Header;
use crate::policy;
use crate::tree::HuffmanTree;
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::{BitReader, BitWriter, Progress};
use std::io::{self, Read, Seek, Write};

/// Encode the whole of `input` into `output`, using `ctx` as scratch state.
///
/// The input is read twice: once to count frequencies and once to emit
/// codes. The caller resets `ctx` afterwards.
pub(crate) fn encode<R: Read + Seek, W: Write>(
    ctx: &mut CoderContext,
    input: R,
    output: W,
    progress: &mut dyn Progress,
) -> Result<()> {
    let mut reader = BitReader::new(input);
    let mut writer = BitWriter::new(output);

    let total = ctx.freqs.count_from(&mut reader)?;
    ctx.content_len = u32::try_from(total)
        .map_err(|_| OxiHuffError::input_too_large(total, u32::MAX as u64))?;

    let Some(tree) = HuffmanTree::build(&ctx.freqs) else {
        log::debug!("empty input, writing empty header");
        Header::Empty.write(&mut writer)?;
        writer.flush()?;
        return Ok(());
    };
    ctx.symbols = canonical_lengths(tree.code_lengths());
    ctx.tree = Some(tree);

    // Lengths are checked before any code value is computed, so overlong
    // codes never reach the assignment step.
    if let Some(reason) = policy::check(&ctx.symbols) {
        log::debug!("huffman coding disabled: {reason}");
        ctx.disabled = true;
    }

    let header = if ctx.disabled {
        Header::Raw {
            content_len: ctx.content_len,
        }
    } else {
        let code = CanonicalCode::assign(&ctx.symbols, &ctx.freqs);
        ctx.codes = code.table;
        ctx.padding = code.padding;
        for (symbol, code) in ctx.codes.iter() {
            log::trace!("code {symbol:#04x} = {code}");
        }
        Header::Huffman {
            content_len: ctx.content_len,
            symbols: ctx.symbols.clone(),
            padding: ctx.padding,
        }
    };
    log::debug!(
        "encoding {} bytes, {} distinct symbols, {}",
        ctx.content_len,
        ctx.symbols.len(),
        if ctx.disabled { "raw" } else { "huffman" }
    );

    header.write(&mut writer)?;
    reader.rewind()?;

    let written = if ctx.disabled {
        copy_content(&mut reader, &mut writer, progress)?
    } else {
        encode_content(ctx, &mut reader, &mut writer, progress)?
    };
    if written != ctx.content_len as u64 {
        return Err(input_changed());
    }

    writer.flush()?;
    Ok(())
}

/// Emit the padding bits, then the code of every input byte.
fn encode_content<R: Read, W: Write>(
    ctx: &CoderContext,
    reader: &mut BitReader<R>,
    writer: &mut BitWriter<W>,
    progress: &mut dyn Progress,
) -> Result<u64> {
    writer.write_bits(0, ctx.padding)?;

    let mut count = 0u64;
    while let Some(byte) = reader.try_read_byte()? {
        let code = ctx.codes.get(byte).ok_or_else(input_changed)?;
        writer.write_bits(code.value(), code.length())?;
        count += 1;
        progress.advance(1);
    }
    Ok(count)
}

fn copy_content<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    writer: &mut BitWriter<W>,
    progress: &mut dyn Progress,
) -> Result<u64> {
    let mut count = 0u64;
    while let Some(byte) = reader.try_read_byte()? {
        writer.write_byte(byte)?;
        count += 1;
        progress.advance(1);
    }
    Ok(count)
}

fn input_changed() -> OxiHuffError {
    io::Error::new(
        io::ErrorKind::InvalidData,
        "input changed between frequency count and encoding",
    )
    .into()
}
