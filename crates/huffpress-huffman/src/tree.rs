//! Huffman tree construction.
//!
//! Classical greedy merge: the two lightest nodes of a min-priority queue are
//! combined until a single root remains.
//!
//! ## Tie-Breaking
//!
//! Every queue entry carries a sequence number. Leaves are numbered in
//! ascending symbol order, merged nodes take the next number when created,
//! and entries are extracted by `(weight, sequence)`. The first node extracted
//! in a merge becomes the left child. Identical frequency tables therefore
//! always produce identical trees.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use huffpress_core::{Error, Result};
use tracing::trace;

use crate::frequency::FrequencyTable;

/// A node of a Huffman tree.
///
/// Children are exclusively owned by their parent: no sharing, no cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Create a leaf.
    pub fn leaf(symbol: char, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Combine two nodes under a new internal node; `left` takes bit `0`.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Priority queue entry ordered so that `BinaryHeap` pops the lightest,
/// oldest node first.
#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    sequence: u64,
    node: HuffmanNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        (other.weight, other.sequence).cmp(&(self.weight, self.sequence))
    }
}

/// Build a Huffman tree from symbol frequencies.
///
/// # Errors
/// [`Error::EmptyAlphabet`] if the table has no symbols.
pub fn build_tree(frequencies: &FrequencyTable) -> Result<HuffmanNode> {
    let mut heap = BinaryHeap::with_capacity(frequencies.len());
    let mut sequence = 0u64;

    for (symbol, weight) in frequencies.iter() {
        heap.push(QueueEntry {
            weight,
            sequence,
            node: HuffmanNode::leaf(symbol, weight),
        });
        sequence += 1;
    }

    loop {
        let Some(first) = heap.pop() else {
            return Err(Error::EmptyAlphabet);
        };
        let Some(second) = heap.pop() else {
            let root = first.node;
            trace!(
                leaves = root.leaf_count(),
                depth = root.depth(),
                weight = root.weight(),
                "built huffman tree"
            );
            return Ok(root);
        };

        let merged = HuffmanNode::merge(first.node, second.node);
        heap.push(QueueEntry {
            weight: merged.weight(),
            sequence,
            node: merged,
        });
        sequence += 1;
    }
}
