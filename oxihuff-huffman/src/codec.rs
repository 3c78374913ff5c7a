//! [`Codec`] implementation.

use crate::context::CoderContext;
use crate::header::Header;
use crate::{decode, encode};
use oxihuff_core::error::Result;
use oxihuff_core::{BitReader, Codec, NoProgress, Progress};
use std::io::{Read, Seek, Write};

/// Canonical Huffman codec.
///
/// One codec may run any number of encode and decode calls in sequence.
/// Its scratch state is cleared after every call, including failed ones.
#[derive(Debug, Default)]
pub struct HuffmanCodec {
    ctx: CoderContext,
}

impl HuffmanCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch state. Always clean between calls.
    pub fn context(&self) -> &CoderContext {
        &self.ctx
    }

    /// Parse only the header of a compressed stream.
    pub fn inspect<R: Read>(input: R) -> Result<Header> {
        let mut reader = BitReader::new(input);
        Header::read(&mut reader, &mut NoProgress)
    }
}

impl Codec for HuffmanCodec {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn encode<R: Read + Seek, W: Write>(
        &mut self,
        input: R,
        output: W,
        progress: &mut dyn Progress,
    ) -> Result<()> {
        let result = encode::encode(&mut self.ctx, input, output, progress);
        self.ctx.reset();
        result
    }

    fn decode<R: Read, W: Write>(
        &mut self,
        input: R,
        output: W,
        progress: &mut dyn Progress,
    ) -> Result<()> {
        let result = decode::decode(&mut self.ctx, input, output, progress);
        self.ctx.reset();
        result
    }
}
