//! Symbol frequency counting.

use oxihuff_core::BitReader;
use oxihuff_core::error::Result;
use std::io::Read;

/// Number of distinct symbols (byte values).
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence count of every byte value in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Create an all-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
        }
    }

    /// Count every byte of `data`.
    ///
    /// Counts saturate at `u32::MAX`; callers reject inputs that long before
    /// the counts are used.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.add(byte);
        }
        table
    }

    /// Count the remaining bytes of `reader`, returning how many were read.
    pub fn count_from<R: Read>(&mut self, reader: &mut BitReader<R>) -> Result<u64> {
        let mut total = 0u64;
        while let Some(byte) = reader.try_read_byte()? {
            self.add(byte);
            total += 1;
        }
        Ok(total)
    }

    /// Record one occurrence of `symbol`.
    #[inline]
    pub fn add(&mut self, symbol: u8) {
        let slot = &mut self.counts[symbol as usize];
        *slot = slot.saturating_add(1);
    }

    /// Occurrences of `symbol`.
    #[inline]
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Number of symbols that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Whether no symbol was seen.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(symbol, count)` over symbols that occur, ascending.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(symbol, &c)| (symbol as u8, c))
    }

    /// Zero every count.
    pub fn reset(&mut self) {
        self.counts = [0; SYMBOL_COUNT];
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
