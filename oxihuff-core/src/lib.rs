//! # OxiHuff Core
//!
//! Core components for the OxiHuff compressor.
//!
//! This crate provides the fundamental building blocks shared by codecs:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`traits`]: The [`Codec`] trait every algorithm implements
//! - [`progress`]: Observational progress reporting
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     oxihuff CLI                                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Dispatch                                            │
//! │     Compressor, codec selection, file handling          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Codec                                               │
//! │     Canonical Huffman                                   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: BitStream (this crate)                              │
//! │     BitReader/BitWriter, Progress, errors               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut data = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut data);
//!     writer.write_u32(0xDEAD_BEEF).unwrap();
//!     writer.write_bit(true).unwrap();
//!     writer.flush().unwrap();
//! }
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_u32().unwrap(), 0xDEAD_BEEF);
//! assert!(reader.read_bit().unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod progress;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};
pub use progress::{NoProgress, Progress, ProgressCounter};
pub use traits::Codec;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiHuffError, Result};
    pub use crate::progress::{NoProgress, Progress};
    pub use crate::traits::Codec;
}
