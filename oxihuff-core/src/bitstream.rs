//! Bit-level I/O operations for the Huffman codec.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level over any `Read` / `Write` implementation.
//!
//! # Bit Ordering
//!
//! OxiHuff uses MSB-first (Most Significant Bit first) ordering within
//! bytes: the first bit written lands in bit 7 of the output byte. A code
//! written with [`BitWriter::write_bits`] therefore appears in the stream in
//! the same order as its binary rendering. Multi-byte integers are
//! big-endian.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();
//!     writer.write_bits(0b1100, 4).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiHuffError, Result};
use std::io::{Read, Seek, SeekFrom, Write};

/// Capacity of the internal byte buffers.
const BUFFER_SIZE: usize = 8192;

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader in chunks; a single partial
/// byte is kept for bit-level access.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Chunk buffer.
    buf: Box<[u8]>,
    /// Read position in `buf`.
    pos: usize,
    /// Number of valid bytes in `buf`.
    filled: usize,
    /// Partially consumed byte (MSB-first).
    current: u8,
    /// Number of unread bits left in `current`.
    bits_left: u8,
    /// Total bits consumed (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0u8; BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            filled: 0,
            current: 0,
            bits_left: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Buffered bytes that were not consumed yet are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Get the current bit position (for error reporting).
    pub fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    /// Number of whole bytes consumed so far (partial bytes round up).
    pub fn bytes_read(&self) -> u64 {
        self.total_bits_read.div_ceil(8)
    }

    /// Make sure `buf` has at least one unread byte. Returns `false` at end
    /// of stream.
    fn fill_buffer(&mut self) -> Result<bool> {
        if self.pos < self.filled {
            return Ok(true);
        }
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Take the next raw byte from the chunk buffer, ignoring bit state.
    #[inline]
    fn next_raw_byte(&mut self) -> Result<Option<u8>> {
        if !self.fill_buffer()? {
            return Ok(None);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_left == 0 {
            self.current = self
                .next_raw_byte()?
                .ok_or_else(|| OxiHuffError::unexpected_eof(1))?;
            self.bits_left = 8;
        }
        self.bits_left -= 1;
        self.total_bits_read += 1;
        Ok((self.current >> self.bits_left) & 1 != 0)
    }

    /// Read up to 32 bits, first bit read ending up most significant.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }

    /// Read a byte. Works at any bit position.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.bits_left == 0 {
            let byte = self
                .next_raw_byte()?
                .ok_or_else(|| OxiHuffError::unexpected_eof(1))?;
            self.total_bits_read += 8;
            return Ok(byte);
        }
        Ok(self.read_bits(8)? as u8)
    }

    /// Read a byte, returning `None` at a clean end of stream.
    ///
    /// A partially consumed byte is discarded first.
    pub fn try_read_byte(&mut self) -> Result<Option<u8>> {
        self.align_to_byte();
        let byte = self.next_raw_byte()?;
        if byte.is_some() {
            self.total_bits_read += 8;
        }
        Ok(byte)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        let mut bytes = [0u8; 2];
        self.read_bytes(&mut bytes)?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.read_bytes(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Fill `buf` completely.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let len = buf.len();
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.read_byte().map_err(|e| match e {
                OxiHuffError::UnexpectedEof { .. } => OxiHuffError::unexpected_eof(len - i),
                other => other,
            })?;
        }
        Ok(())
    }

    /// Align to the next byte boundary by discarding partial bits.
    pub fn align_to_byte(&mut self) {
        self.total_bits_read += self.bits_left as u64;
        self.bits_left = 0;
    }

    /// Check if the reader is at end of stream.
    ///
    /// Unread bits in a partially consumed byte count as remaining input.
    pub fn is_eof(&mut self) -> bool {
        if self.bits_left > 0 {
            return false;
        }
        !matches!(self.fill_buffer(), Ok(true))
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Reset to the start of the underlying stream, discarding all buffered
    /// state.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.pos = 0;
        self.filled = 0;
        self.current = 0;
        self.bits_left = 0;
        self.total_bits_read = 0;
        Ok(())
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits into a partial byte and completed bytes into
/// a chunk buffer. Call `flush()` when done to write any remaining partial
/// byte, padded with zero bits.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Completed bytes waiting to be written.
    pending: Vec<u8>,
    /// Partial byte (MSB-first).
    current: u8,
    /// Number of bits in `current`.
    bits_in_current: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: Vec::with_capacity(BUFFER_SIZE),
            current: 0,
            bits_in_current: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Whether the next bit starts a new byte.
    pub fn is_aligned(&self) -> bool {
        self.bits_in_current == 0
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.pending.push(byte);
        if self.pending.len() >= BUFFER_SIZE {
            self.writer.write_all(&self.pending)?;
            self.pending.clear();
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.current = (self.current << 1) | bit as u8;
        self.bits_in_current += 1;
        self.total_bits_written += 1;

        if self.bits_in_current == 8 {
            let byte = self.current;
            self.current = 0;
            self.bits_in_current = 0;
            self.push_byte(byte)?;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, count: u8) -> Result<()> {
        debug_assert!(count <= 64, "Cannot write more than 64 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 != 0)?;
        }
        Ok(())
    }

    /// Write a byte. Works at any bit position.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        if self.bits_in_current == 0 {
            self.total_bits_written += 8;
            return self.push_byte(byte);
        }
        self.write_bits(byte as u64, 8)
    }

    /// Write a run of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.bits_in_current == 0 {
            self.total_bits_written += bytes.len() as u64 * 8;
            self.pending.extend_from_slice(bytes);
            if self.pending.len() >= BUFFER_SIZE {
                self.writer.write_all(&self.pending)?;
                self.pending.clear();
            }
            return Ok(());
        }
        for &byte in bytes {
            self.write_bits(byte as u64, 8)?;
        }
        Ok(())
    }

    /// Write a big-endian `u16`.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a big-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Flush any remaining bits to the underlying writer.
    ///
    /// If there are partial bits, they are padded with zeros to complete
    /// the final byte.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_current > 0 {
            let padding = 8 - self.bits_in_current;
            let byte = self.current << padding;
            self.total_bits_written += padding as u64;
            self.current = 0;
            self.bits_in_current = 0;
            self.pending.push(byte);
        }

        if !self.pending.is_empty() {
            self.writer.write_all(&self.pending)?;
            self.pending.clear();
        }

        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = vec![0xB5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert!(reader.read_bit().unwrap()); // MSB first
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.is_eof());
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = vec![0xF0, 0x0F];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0x00); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
    }

    #[test]
    fn test_bitreader_eof() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF]));
        reader.read_bits(8).unwrap();
        assert!(matches!(
            reader.read_bit(),
            Err(OxiHuffError::UnexpectedEof { .. })
        ));
        assert_eq!(reader.try_read_byte().unwrap(), None);
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for bit in [true, false, true, true, false, true, false, true] {
                writer.write_bit(bit).unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_pads_with_zeros() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b111, 3).unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.bits_written(), 8);
        }
        assert_eq!(output, vec![0b1110_0000]);
    }

    #[test]
    fn test_integers_are_big_endian() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_u16(0x0102).unwrap();
            writer.write_u32(0x0A0B_0C0D).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0x01, 0x02, 0x0A, 0x0B, 0x0C, 0x0D]);

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_u16().unwrap(), 0x0102);
        assert_eq!(reader.read_u32().unwrap(), 0x0A0B_0C0D);
        assert_eq!(reader.bytes_read(), 6);
    }

    #[test]
    fn test_unaligned_byte_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bit(true).unwrap();
            writer.write_byte(0xA5).unwrap();
            writer.write_bytes(&[0x3C]).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = BitReader::new(Cursor::new(&output));
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_byte().unwrap(), 0xA5);
        assert_eq!(reader.read_byte().unwrap(), 0x3C);
    }

    #[test]
    fn test_rewind() {
        let mut reader = BitReader::new(Cursor::new(vec![0x12, 0x34]));
        assert_eq!(reader.read_byte().unwrap(), 0x12);
        reader.read_bit().unwrap();
        reader.rewind().unwrap();
        assert_eq!(reader.bits_read(), 0);
        assert_eq!(reader.read_byte().unwrap(), 0x12);
        assert_eq!(reader.read_byte().unwrap(), 0x34);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_large_write_spills_buffer() {
        let data: Vec<u8> = (0..3 * BUFFER_SIZE).map(|i| (i % 251) as u8).collect();
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for &byte in &data {
                writer.write_byte(byte).unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output, data);

        let mut reader = BitReader::new(Cursor::new(&output));
        let mut back = vec![0u8; data.len()];
        reader.read_bytes(&mut back).unwrap();
        assert_eq!(back, data);
    }
}
