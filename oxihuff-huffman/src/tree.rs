//! Huffman tree construction and decode-time reconstruction.
//!
//! Nodes live in an arena and refer to their children by index, so a tree
//! is released as a whole when it is dropped.
//!
//! # Tie-breaking
//!
//! The builder's queue orders nodes by `(frequency, node index)`. Leaves are
//! created in ascending symbol order and every merged parent gets the next
//! index, so among equal frequencies the earliest-created node is popped
//! first. The produced tree, and therefore the compressed output, is the
//! same on every run.

use crate::canonical::{MAX_CODE_LENGTH, SymbolLength};
use crate::frequency::{FrequencyTable, SYMBOL_COUNT};
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node in its tree's arena.
pub type NodeId = usize;

/// A tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A symbol.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrences (0 in reconstructed trees).
        freq: u64,
    },
    /// A branch. Children are `None` only while a tree is being rebuilt.
    Internal {
        /// Sum of the subtree's frequencies.
        freq: u64,
        /// Child reached with a 0 bit.
        left: Option<NodeId>,
        /// Child reached with a 1 bit.
        right: Option<NodeId>,
    },
}

impl Node {
    fn empty_internal() -> Self {
        Node::Internal {
            freq: 0,
            left: None,
            right: None,
        }
    }

    /// Frequency stored in the node.
    pub fn freq(&self) -> u64 {
        match *self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => freq,
        }
    }

    /// Whether the node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A binary Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree minimizing the weighted path length of `freqs`.
    ///
    /// Returns `None` when every frequency is zero.
    pub fn build(freqs: &FrequencyTable) -> Option<Self> {
        let mut nodes = Vec::with_capacity(2 * SYMBOL_COUNT - 1);
        let mut queue = BinaryHeap::with_capacity(SYMBOL_COUNT);

        for (symbol, count) in freqs.iter_nonzero() {
            let id = nodes.len();
            nodes.push(Node::Leaf {
                symbol,
                freq: count as u64,
            });
            queue.push(Reverse((count as u64, id)));
        }

        while queue.len() > 1 {
            let (Some(Reverse((left_freq, left))), Some(Reverse((right_freq, right)))) =
                (queue.pop(), queue.pop())
            else {
                break;
            };
            let freq = left_freq + right_freq;
            let id = nodes.len();
            nodes.push(Node::Internal {
                freq,
                left: Some(left),
                right: Some(right),
            });
            queue.push(Reverse((freq, id)));
        }

        let Reverse((_, root)) = queue.pop()?;
        Some(Self { nodes, root })
    }

    /// Rebuild a tree from canonically ordered `(symbol, length)` records.
    ///
    /// Each symbol is placed at its depth in the leftmost free slot, which
    /// reproduces the encoder's canonical codes. Fails when a symbol finds
    /// no free slot (over-subscribed lengths) or when slots remain empty
    /// afterwards (under-subscribed lengths), except for a lone symbol of
    /// length 1.
    pub fn rebuild(symbols: &[SymbolLength]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(OxiHuffError::tree_reconstruction("empty symbol table"));
        }

        let mut tree = Self {
            nodes: vec![Node::empty_internal()],
            root: 0,
        };

        for sym in symbols {
            if sym.length == 0 || sym.length as usize > MAX_CODE_LENGTH {
                return Err(OxiHuffError::tree_reconstruction(format!(
                    "symbol {:#04x} has invalid code length {}",
                    sym.symbol, sym.length
                )));
            }
            if !tree.place(tree.root, sym.symbol, sym.length, 1) {
                return Err(OxiHuffError::tree_reconstruction(format!(
                    "no free code of length {} for symbol {:#04x}",
                    sym.length, sym.symbol
                )));
            }
        }

        let lone_symbol = symbols.len() == 1 && symbols[0].length == 1;
        if !lone_symbol && !tree.is_full() {
            return Err(OxiHuffError::tree_reconstruction(
                "code lengths leave unused codes",
            ));
        }

        Ok(tree)
    }

    /// Place a leaf for `symbol` at `length`, descending from `node` at
    /// `depth`. Left is tried before right.
    fn place(&mut self, node: NodeId, symbol: u8, length: u8, depth: u8) -> bool {
        if depth == length {
            for bit in [false, true] {
                if self.step(node, bit).is_none() {
                    let leaf = self.push(Node::Leaf { symbol, freq: 0 });
                    self.set_child(node, bit, leaf);
                    return true;
                }
            }
            return false;
        }

        for bit in [false, true] {
            let child = match self.step(node, bit) {
                Some(child) => child,
                None => {
                    let child = self.push(Node::empty_internal());
                    self.set_child(node, bit, child);
                    child
                }
            };
            if self.nodes[child].is_leaf() {
                continue;
            }
            if self.place(child, symbol, length, depth + 1) {
                return true;
            }
        }
        false
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn set_child(&mut self, parent: NodeId, bit: bool, child: NodeId) {
        if let Node::Internal { left, right, .. } = &mut self.nodes[parent] {
            if bit {
                *right = Some(child);
            } else {
                *left = Some(child);
            }
        }
    }

    /// Whether every internal node has both children.
    fn is_full(&self) -> bool {
        self.nodes.iter().all(|node| match node {
            Node::Leaf { .. } => true,
            Node::Internal { left, right, .. } => left.is_some() && right.is_some(),
        })
    }

    /// Root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes (never true for a built tree).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follow one bit from `node`: `false` goes left, `true` goes right.
    #[inline]
    pub fn step(&self, node: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[node] {
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            Node::Leaf { .. } => None,
        }
    }

    /// Symbol of `node` if it is a leaf.
    #[inline]
    pub fn leaf_symbol(&self, node: NodeId) -> Option<u8> {
        match self.nodes[node] {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Depth of every leaf, in depth-first (left before right) order.
    pub fn code_lengths(&self) -> Vec<SymbolLength> {
        self.leaf_paths()
            .into_iter()
            .map(|(symbol, path)| SymbolLength::new(symbol, path.len() as u8))
            .collect()
    }

    /// Root-to-leaf bit path of every leaf, in depth-first order.
    pub fn leaf_paths(&self) -> Vec<(u8, Vec<bool>)> {
        let mut paths = Vec::new();
        let mut stack = vec![(self.root, Vec::new())];

        while let Some((id, path)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => paths.push((symbol, path)),
                Node::Internal { left, right, .. } => {
                    // Right is pushed first so the left subtree is visited first.
                    if let Some(right) = right {
                        let mut right_path = path.clone();
                        right_path.push(true);
                        stack.push((right, right_path));
                    }
                    if let Some(left) = left {
                        let mut left_path = path;
                        left_path.push(false);
                        stack.push((left, left_path));
                    }
                }
            }
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::{CodeTable, canonical_lengths};

    fn length_of(lengths: &[SymbolLength], symbol: u8) -> u8 {
        lengths
            .iter()
            .find(|s| s.symbol == symbol)
            .map(|s| s.length)
            .unwrap()
    }

    #[test]
    fn test_build_empty() {
        assert!(HuffmanTree::build(&FrequencyTable::new()).is_none());
    }

    #[test]
    fn test_build_single_symbol() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"zzzz")).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaf_symbol(tree.root()), Some(b'z'));
        assert_eq!(tree.code_lengths(), vec![SymbolLength::new(b'z', 0)]);
    }

    #[test]
    fn test_build_weighted_lengths() {
        let freqs = FrequencyTable::from_bytes(b"AAAABBBCCD");
        let tree = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(tree.node(tree.root()).freq(), 10);

        let lengths = tree.code_lengths();
        assert_eq!(lengths.len(), 4);
        assert_eq!(length_of(&lengths, b'A'), 1);
        assert_eq!(length_of(&lengths, b'B'), 2);
        assert_eq!(length_of(&lengths, b'C'), 3);
        assert_eq!(length_of(&lengths, b'D'), 3);
    }

    #[test]
    fn test_build_is_deterministic() {
        let freqs = FrequencyTable::from_bytes(b"abcdefgh");
        let first = HuffmanTree::build(&freqs).unwrap();
        let second = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(first, second);
        // Eight equal weights give a perfectly balanced tree.
        assert!(first.code_lengths().iter().all(|s| s.length == 3));
    }

    #[test]
    fn test_rebuild_matches_canonical_codes() {
        let freqs = FrequencyTable::from_bytes(b"this is an example of a huffman tree");
        let built = HuffmanTree::build(&freqs).unwrap();
        let symbols = canonical_lengths(built.code_lengths());

        let rebuilt = HuffmanTree::rebuild(&symbols).unwrap();
        let table = CodeTable::from_lengths(&symbols);
        for (symbol, path) in rebuilt.leaf_paths() {
            let code = table.get(symbol).unwrap();
            assert_eq!(code.bits().collect::<Vec<_>>(), path, "symbol {symbol:#04x}");
        }
        assert_eq!(rebuilt.leaf_paths().len(), symbols.len());
    }

    #[test]
    fn test_rebuild_single_symbol() {
        let tree = HuffmanTree::rebuild(&[SymbolLength::new(b'q', 1)]).unwrap();
        let leaf = tree.step(tree.root(), false).unwrap();
        assert_eq!(tree.leaf_symbol(leaf), Some(b'q'));
        assert_eq!(tree.step(tree.root(), true), None);
    }

    #[test]
    fn test_rebuild_over_subscribed() {
        let symbols = [
            SymbolLength::new(1, 1),
            SymbolLength::new(2, 1),
            SymbolLength::new(3, 1),
        ];
        let err = HuffmanTree::rebuild(&symbols).unwrap_err();
        assert!(matches!(err, OxiHuffError::TreeReconstruction { .. }));
    }

    #[test]
    fn test_rebuild_under_subscribed() {
        let symbols = [SymbolLength::new(1, 1), SymbolLength::new(2, 2)];
        let err = HuffmanTree::rebuild(&symbols).unwrap_err();
        assert!(matches!(err, OxiHuffError::TreeReconstruction { .. }));
    }

    #[test]
    fn test_rebuild_rejects_bad_lengths() {
        assert!(HuffmanTree::rebuild(&[]).is_err());
        assert!(HuffmanTree::rebuild(&[SymbolLength::new(0, 0)]).is_err());
        assert!(HuffmanTree::rebuild(&[SymbolLength::new(0, 17), SymbolLength::new(1, 17)]).is_err());
    }

    #[test]
    fn test_leaf_paths_prefix_free() {
        let freqs = FrequencyTable::from_bytes(b"mississippi river banks");
        let tree = HuffmanTree::build(&freqs).unwrap();
        let paths = tree.leaf_paths();
        for (i, (_, a)) in paths.iter().enumerate() {
            for (j, (_, b)) in paths.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{a:?} is a prefix of {b:?}");
                }
            }
        }
    }
}
