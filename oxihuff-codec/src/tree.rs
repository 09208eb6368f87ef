//! Huffman tree construction.
//!
//! The tree lives in an index-addressed arena. Every internal node refers to
//! its two children by [`NodeId`], and each node other than the root has
//! exactly one parent.
//!
//! # Tie-breaking
//!
//! The priority queue orders nodes by `(frequency, sequence)`. A node's
//! sequence number is its arena index: leaves are pushed first, in ascending
//! symbol order, and every merged node takes the next index. Two builds from
//! the same [`FrequencyTable`] therefore produce identical trees.

use crate::frequency::FrequencyTable;
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// A node of the Huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its occurrence count.
    Leaf {
        /// The symbol.
        symbol: char,
        /// Occurrence count.
        freq: u64,
    },
    /// A merge of two subtrees.
    Internal {
        /// Sum of the children's frequencies.
        freq: u64,
        /// Child reached by bit 0.
        left: NodeId,
        /// Child reached by bit 1.
        right: NodeId,
    },
}

impl Node {
    /// Frequency of this node.
    pub fn freq(&self) -> u64 {
        match *self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => freq,
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A Huffman merge tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// Returns [`OxiHuffError::EmptyInput`] when the table has no symbols.
    /// A single distinct symbol yields a tree whose root is that leaf.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(OxiHuffError::EmptyInput);
        }

        // n leaves produce n - 1 internal nodes
        let mut nodes = Vec::with_capacity(frequencies.len() * 2 - 1);
        let mut heap = BinaryHeap::with_capacity(frequencies.len());

        for (symbol, freq) in frequencies.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, freq });
            heap.push(Reverse((freq, id)));
        }

        // The last node left in the queue is the root
        let root = loop {
            let Some(Reverse((left_freq, left))) = heap.pop() else {
                return Err(OxiHuffError::EmptyInput);
            };
            let Some(Reverse((right_freq, right))) = heap.pop() else {
                break left;
            };

            let freq = left_freq + right_freq;
            let id = nodes.len();
            nodes.push(Node::Internal { freq, left, right });
            heap.push(Reverse((freq, id)));
        };

        Ok(Self { nodes, root })
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The root node.
    pub fn root_node(&self) -> &Node {
        // Every constructor leaves `root` inside the arena
        &self.nodes[self.root]
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A built tree always has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Check if the root is itself a leaf (single-symbol alphabet).
    pub fn is_single_leaf(&self) -> bool {
        self.root_node().is_leaf()
    }

    /// Frequency at the root, which is the length of the source text.
    pub fn total_freq(&self) -> u64 {
        self.root_node().freq()
    }
}
