//! Error types for OxiHuff operations.
//!
//! A single error enum covers every failure of the codec stack: I/O on the
//! underlying streams, malformed headers, corrupted code tables and
//! content, and file-level conditions raised by the compressor.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The leading format marker is not one this codec understands.
    #[error("Invalid header marker: {found:#04x}")]
    InvalidMarker {
        /// Marker byte found at the start of the stream.
        found: u8,
    },

    /// Bytes consumed while parsing the header disagree with its length field.
    #[error("Header length mismatch: declared {declared} bytes, consumed {consumed}")]
    HeaderLengthMismatch {
        /// Header length declared in the stream.
        declared: u16,
        /// Header bytes actually consumed.
        consumed: u64,
    },

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// The symbol/length table cannot be laid out as a prefix code.
    #[error("Huffman tree reconstruction failed: {message}")]
    TreeReconstruction {
        /// Description of the failure.
        message: String,
    },

    /// Invalid Huffman code encountered during decompression.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Input does not fit the 32-bit content length field.
    #[error("Input too large: {size} bytes exceeds limit of {limit}")]
    InputTooLarge {
        /// Size of the input in bytes.
        size: u64,
        /// Largest supported input size.
        limit: u64,
    },

    /// Codec name not known to the dispatch layer.
    #[error("Unsupported codec: {name}")]
    UnsupportedCodec {
        /// The requested codec name.
        name: String,
    },

    /// Destination file already exists and overwriting is disabled.
    #[error("Output file already exists: {path}")]
    OutputExists {
        /// The destination path.
        path: String,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an invalid marker error.
    pub fn invalid_marker(found: u8) -> Self {
        Self::InvalidMarker { found }
    }

    /// Create a header length mismatch error.
    pub fn header_length_mismatch(declared: u16, consumed: u64) -> Self {
        Self::HeaderLengthMismatch { declared, consumed }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a tree reconstruction error.
    pub fn tree_reconstruction(message: impl Into<String>) -> Self {
        Self::TreeReconstruction {
            message: message.into(),
        }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an input too large error.
    pub fn input_too_large(size: u64, limit: u64) -> Self {
        Self::InputTooLarge { size, limit }
    }

    /// Create an unsupported codec error.
    pub fn unsupported_codec(name: impl Into<String>) -> Self {
        Self::UnsupportedCodec { name: name.into() }
    }

    /// Create an output exists error.
    pub fn output_exists(path: impl Into<String>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Whether this error means the compressed data itself is malformed,
    /// as opposed to an environment failure such as I/O.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidMarker { .. }
                | Self::HeaderLengthMismatch { .. }
                | Self::InvalidHeader { .. }
                | Self::TreeReconstruction { .. }
                | Self::InvalidHuffmanCode { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}
