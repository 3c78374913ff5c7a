//! Reusable per-call coder state.

use crate::canonical::{CodeTable, SymbolLength};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// State shared by one encode or decode call.
///
/// A context is reused across calls and reset after each of them, whether
/// the call succeeded or not. A reset context compares equal to a freshly
/// created one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoderContext {
    pub(crate) freqs: FrequencyTable,
    pub(crate) symbols: Vec<SymbolLength>,
    pub(crate) codes: CodeTable,
    pub(crate) tree: Option<HuffmanTree>,
    pub(crate) padding: u8,
    pub(crate) content_len: u32,
    pub(crate) disabled: bool,
}

impl CoderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            freqs: FrequencyTable::new(),
            symbols: Vec::new(),
            codes: CodeTable::new(),
            tree: None,
            padding: 0,
            content_len: 0,
            disabled: false,
        }
    }

    /// Drop every table and tree and zero the scalar fields.
    pub fn reset(&mut self) {
        self.freqs.reset();
        self.symbols = Vec::new();
        self.codes.clear();
        self.tree = None;
        self.padding = 0;
        self.content_len = 0;
        self.disabled = false;
    }

    /// Whether the context holds no state from a previous call.
    pub fn is_clean(&self) -> bool {
        *self == Self::new()
    }

    /// Symbol frequencies of the current input.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freqs
    }

    /// Symbols with their code lengths, in canonical order.
    pub fn symbols(&self) -> &[SymbolLength] {
        &self.symbols
    }

    /// Encoder code table.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Built or rebuilt tree.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// Padding bits before the content.
    pub fn padding(&self) -> u8 {
        self.padding
    }

    /// Content length in symbols.
    pub fn content_len(&self) -> u32 {
        self.content_len
    }

    /// Whether the content is stored raw.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Default for CoderContext {
    fn default() -> Self {
        Self::new()
    }
}
