//! Codec selection.

use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::{Codec, Progress};
use oxihuff_huffman::HuffmanCodec;
use std::fmt;
use std::io::{Read, Seek, Write};
use std::str::FromStr;

/// Supported compression algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodecKind {
    /// Canonical Huffman coding.
    #[default]
    Huffman,
}

impl CodecKind {
    /// Every supported algorithm.
    pub const ALL: &'static [CodecKind] = &[CodecKind::Huffman];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            CodecKind::Huffman => "huffman",
        }
    }

    /// Create a codec of this kind.
    pub fn codec(self) -> AnyCodec {
        AnyCodec::new(self)
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = OxiHuffError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "huffman" | "huf" => Ok(CodecKind::Huffman),
            _ => Err(OxiHuffError::unsupported_codec(s)),
        }
    }
}

/// A codec of any supported kind.
#[derive(Debug)]
pub enum AnyCodec {
    /// Canonical Huffman codec.
    Huffman(HuffmanCodec),
}

impl AnyCodec {
    /// Create a codec of the given kind.
    pub fn new(kind: CodecKind) -> Self {
        match kind {
            CodecKind::Huffman => AnyCodec::Huffman(HuffmanCodec::new()),
        }
    }

    /// Kind of the wrapped codec.
    pub fn kind(&self) -> CodecKind {
        match self {
            AnyCodec::Huffman(_) => CodecKind::Huffman,
        }
    }
}

impl Codec for AnyCodec {
    fn name(&self) -> &'static str {
        match self {
            AnyCodec::Huffman(codec) => codec.name(),
        }
    }

    fn encode<R: Read + Seek, W: Write>(
        &mut self,
        input: R,
        output: W,
        progress: &mut dyn Progress,
    ) -> Result<()> {
        match self {
            AnyCodec::Huffman(codec) => codec.encode(input, output, progress),
        }
    }

    fn decode<R: Read, W: Write>(
        &mut self,
        input: R,
        output: W,
        progress: &mut dyn Progress,
    ) -> Result<()> {
        match self {
            AnyCodec::Huffman(codec) => codec.decode(input, output, progress),
        }
    }
}
