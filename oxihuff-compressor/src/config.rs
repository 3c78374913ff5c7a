//! Compressor configuration.

use crate::codec::CodecKind;

/// Settings for file-level compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressorConfig {
    /// Algorithm used to encode and decode.
    pub codec: CodecKind,
    /// File name suffix of compressed files, dot included.
    pub suffix: &'static str,
    /// Capacity of the buffered readers and writers around each file.
    pub buffer_size: usize,
    /// Replace existing destination files.
    pub overwrite: bool,
    /// Copy the source modification time onto the destination.
    pub preserve_mtime: bool,
}

impl CompressorConfig {
    /// Default suffix of compressed files.
    pub const DEFAULT_SUFFIX: &'static str = ".huf";

    /// Default I/O buffer capacity.
    pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

    /// Suffix appended when a decompressed name cannot be derived by
    /// stripping [`suffix`](Self::suffix).
    pub const FALLBACK_SUFFIX: &'static str = ".out";

    /// Huffman, `.huf`, keep existing files, preserve modification times.
    pub const DEFAULT: Self = Self {
        codec: CodecKind::Huffman,
        suffix: Self::DEFAULT_SUFFIX,
        buffer_size: Self::DEFAULT_BUFFER_SIZE,
        overwrite: false,
        preserve_mtime: true,
    };

    /// Like [`DEFAULT`](Self::DEFAULT) but replaces existing files.
    pub const FORCE: Self = Self {
        overwrite: true,
        ..Self::DEFAULT
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the codec.
    pub fn with_codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    /// Set the compressed file suffix.
    pub fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    /// Set the I/O buffer capacity (at least 1 byte).
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Allow or forbid replacing existing files.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Enable or disable modification time preservation.
    pub fn with_preserve_mtime(mut self, preserve_mtime: bool) -> Self {
        self.preserve_mtime = preserve_mtime;
        self
    }
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
