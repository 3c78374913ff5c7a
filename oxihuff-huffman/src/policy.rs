//! When to skip Huffman coding and store the input raw.

use crate::canonical::{MAX_CODE_LENGTH, SymbolLength};
use crate::frequency::SYMBOL_COUNT;
use std::fmt;

/// Why an input is stored raw instead of Huffman coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableReason {
    /// Some code is longer than the header's length table can describe.
    CodeTooLong {
        /// Longest code length in the tree.
        length: u8,
    },
    /// All 256 symbols occur with one shared code length, which is a plain
    /// fixed-length code and does not fit the 8-bit per-length counts.
    UniformFullAlphabet {
        /// The shared code length.
        length: u8,
    },
}

impl fmt::Display for DisableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisableReason::CodeTooLong { length } => write!(
                f,
                "longest code is {length} bits, limit is {MAX_CODE_LENGTH}"
            ),
            DisableReason::UniformFullAlphabet { length } => {
                write!(f, "all {SYMBOL_COUNT} symbols share code length {length}")
            }
        }
    }
}

/// Decide whether the given code lengths must fall back to raw storage.
pub fn check(symbols: &[SymbolLength]) -> Option<DisableReason> {
    let longest = symbols.iter().map(|s| s.length).max()?;
    if longest as usize > MAX_CODE_LENGTH {
        return Some(DisableReason::CodeTooLong { length: longest });
    }

    if symbols.len() == SYMBOL_COUNT && symbols.iter().all(|s| s.length == longest) {
        return Some(DisableReason::UniformFullAlphabet { length: longest });
    }

    None
}
