//! Command implementations for OxiHuff CLI.

pub mod compress;
pub mod info;

pub use compress::{FileOptions, cmd_compress, cmd_decompress};
pub use info::cmd_info;
pub use test::cmd_test;
