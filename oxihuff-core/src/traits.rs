//! Core traits for codecs.
//!
//! This module defines the interface every compression algorithm in the
//! workspace implements. The file-oriented compressor and the CLI only talk
//! to codecs through this trait.

use crate::error::Result;
use crate::progress::{NoProgress, Progress};
use std::io::{Cursor, Read, Seek, Write};

/// A whole-stream codec.
///
/// `encode` may scan its input more than once, so the input must be
/// seekable. `decode` reads the input strictly forward.
///
/// Every call is all-or-nothing: on error the output written so far is not
/// meaningful and the codec is left ready for the next call.
pub trait Codec {
    /// Short lowercase name of the algorithm.
    fn name(&self) -> &'static str;

    /// Encode the whole of `input` into `output`.
    fn encode<R: Read + Seek, W: Write>(
        &mut self,
        input: R,
        output: W,
        progress: &mut dyn Progress,
    ) -> Result<()>;

    /// Decode a complete stream from `input` into `output`.
    fn decode<R: Read, W: Write>(
        &mut self,
        input: R,
        output: W,
        progress: &mut dyn Progress,
    ) -> Result<()>;

    /// Encode a byte slice (convenience method).
    fn encode_to_vec(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.encode(Cursor::new(data), &mut output, &mut NoProgress)?;
        Ok(output)
    }

    /// Decode a byte slice (convenience method).
    fn decode_to_vec(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.decode(data, &mut output, &mut NoProgress)?;
        Ok(output)
    }
}
