//! Canonical Huffman code generation.
//!
//! A canonical code is fully determined by the code length of every symbol:
//! symbols are ordered by ascending length, then ascending value, and
//! receive consecutive code values within a length. Longer groups start at
//! the previous group's first value plus its size, shifted left by the
//! length difference. The decoder rebuilds the same codes from lengths
//! alone, so only lengths travel in the header.

use crate::frequency::{FrequencyTable, SYMBOL_COUNT};
use std::fmt;

/// Longest code length the header format can represent.
pub const MAX_CODE_LENGTH: usize = 16;

/// A symbol paired with its code length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolLength {
    /// Byte value.
    pub symbol: u8,
    /// Code length in bits (tree depth of the symbol's leaf).
    pub length: u8,
}

impl SymbolLength {
    /// Create a new record.
    pub fn new(symbol: u8, length: u8) -> Self {
        Self { symbol, length }
    }
}

/// Sort records into canonical order and normalize the single-symbol case.
///
/// A lone symbol sits at depth 0 of its tree; it still needs one bit per
/// occurrence, so its length becomes 1.
pub fn canonical_lengths(mut symbols: Vec<SymbolLength>) -> Vec<SymbolLength> {
    if let [only] = symbols.as_mut_slice() {
        only.length = only.length.max(1);
    }
    symbols.sort_unstable_by_key(|s| (s.length, s.symbol));
    symbols
}

/// A code value together with its bit length.
///
/// The value alone is ambiguous (3 may be `11` or `011`), so the two are
/// always kept together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    value: u64,
    length: u8,
}

impl Code {
    /// Create a code of `length` bits.
    pub fn new(value: u64, length: u8) -> Self {
        debug_assert!(length <= 64);
        Self { value, length }
    }

    /// Numeric code value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Code length in bits.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// The code's bits, most significant first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.length)
            .rev()
            .map(move |shift| (self.value >> shift) & 1 != 0)
    }

    /// Whether this code is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length <= other.length
            && other.value >> (other.length - self.length) == self.value
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.length as usize)
    }
}

/// Symbol to code mapping used by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            codes: [None; SYMBOL_COUNT],
        }
    }

    /// Derive the table from canonically ordered lengths alone.
    pub fn from_lengths(symbols: &[SymbolLength]) -> Self {
        let mut table = Self::new();
        for (sym, code) in symbols.iter().zip(assign_codes(symbols)) {
            table.set(sym.symbol, code);
        }
        table
    }

    /// Code assigned to `symbol`, if any.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Assign `code` to `symbol`.
    pub fn set(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    /// Iterate assigned `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Whether no code is assigned.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Remove every code.
    pub fn clear(&mut self) {
        self.codes = [None; SYMBOL_COUNT];
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Assign canonical code values to records already in canonical order.
///
/// Returns one code per record, in the same order.
pub fn assign_codes(symbols: &[SymbolLength]) -> Vec<Code> {
    let mut codes = Vec::with_capacity(symbols.len());
    let mut code = 0u64;
    let mut group_first = 0u64;
    let mut group_count = 0u64;
    let mut group_length = 1u8;

    for sym in symbols {
        debug_assert!(sym.length >= group_length, "records not in canonical order");
        if sym.length != group_length {
            let gap = sym.length.saturating_sub(group_length);
            group_first = (group_first + group_count) << gap;
            code = group_first;
            group_length = sym.length;
            group_count = 0;
        }
        codes.push(Code::new(code, sym.length));
        code += 1;
        group_count += 1;
    }

    codes
}

/// Result of canonical code assignment for one input.
#[derive(Debug, Clone)]
pub struct CanonicalCode {
    /// Symbol to code mapping.
    pub table: CodeTable,
    /// Zero bits written before the content so it ends on a byte boundary.
    pub padding: u8,
}

impl CanonicalCode {
    /// Assign codes to canonically ordered records and compute the padding
    /// for the content described by `freqs`.
    ///
    /// Every length must be at most [`MAX_CODE_LENGTH`].
    pub fn assign(symbols: &[SymbolLength], freqs: &FrequencyTable) -> Self {
        let mut table = CodeTable::new();
        let mut remainder = 0u64;

        for (sym, code) in symbols.iter().zip(assign_codes(symbols)) {
            remainder += (sym.length as u64 * freqs.get(sym.symbol) as u64) % 8;
            table.set(sym.symbol, code);
        }

        let padding = ((8 - remainder % 8) % 8) as u8;
        Self { table, padding }
    }
}
