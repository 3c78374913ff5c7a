//! # OxiHuff-Compressor: File-Level Front End
//!
//! This crate selects a codec and drives it over files on disk. It is the
//! layer the `oxihuff` command line tool talks to.
//!
//! - [`CodecKind`] / [`AnyCodec`]: algorithm selection by name, dispatched
//!   through a sum type
//! - [`CompressorConfig`]: suffix, buffering, overwrite and timestamp policy
//! - [`Compressor`]: `compress(source, dest)` and `decompress(source)`
//!
//! ## Example
//!
//! ```rust,no_run
//! use oxihuff_compressor::{Compressor, CompressorConfig};
//! use oxihuff_core::NoProgress;
//! use std::path::Path;
//!
//! let mut compressor = Compressor::new(CompressorConfig::FORCE);
//! let source = Path::new("notes.txt");
//! let packed = compressor.compressed_path(source);
//!
//! let report = compressor.compress(source, &packed, &mut NoProgress).unwrap();
//! println!("{:.1}% saved", report.savings_percent());
//!
//! compressor.decompress(&packed, &mut NoProgress).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compressor;
pub mod config;

pub use codec::{AnyCodec, CodecKind};
pub use compressor::{CompressReport, Compressor};
pub use config::CompressorConfig;
