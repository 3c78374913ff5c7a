//! # OxiHuff-Huffman: Canonical Huffman Byte-Stream Codec
//!
//! This crate compresses a whole byte stream with a static canonical Huffman
//! code. The input is scanned once to count symbol frequencies, a code is
//! derived from those counts, and the input is scanned again to emit codes.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Canonical codes**: Only code lengths are stored; the decoder
//!   regenerates the codes from lengths alone
//! - **Deterministic**: Equal frequencies are broken by creation order, so
//!   output is identical across runs
//! - **Raw fallback**: Inputs whose codes would be longer than 16 bits, or
//!   that use all 256 byte values at one code length, are stored verbatim
//!
//! ## Pipeline
//!
//! ```text
//! encode: count → build tree → canonical codes → policy → header → content
//! decode: header → rebuild tree → walk content bits
//! ```
//!
//! See [`header`] for the stream layout.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_huffman::{compress, decompress};
//!
//! let original = b"AAAABBBCCD";
//! let compressed = compress(original).unwrap();
//! assert_eq!(compressed[0], oxihuff_huffman::HUFFMAN_MARKER);
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod canonical;
mod codec;
mod context;
mod decode;
mod encode;
pub mod frequency;
pub mod header;
pub mod policy;
pub mod tree;

pub use canonical::{CanonicalCode, Code, CodeTable, MAX_CODE_LENGTH, SymbolLength};
pub use codec::HuffmanCodec;
pub use context::CoderContext;
pub use frequency::{FrequencyTable, SYMBOL_COUNT};
pub use header::{HUFFMAN_MARKER, Header, RAW_MARKER};
pub use policy::DisableReason;
pub use tree::HuffmanTree;

use oxihuff_core::{Codec, Result};

/// Compress a byte slice.
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::compress;
///
/// assert_eq!(compress(b"").unwrap(), vec![0x48, 0x00, 0x02]);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().encode_to_vec(data)
}

/// Decompress a complete compressed stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().decode_to_vec(data)
}
