//! Huffman tree construction.
//!
//! The tree is built by greedy minimum-weight merging over a priority queue.
//! Ties are broken deterministically, so the same [`Distribution`] always
//! yields the same tree.
//!
//! # Tie-break
//!
//! Every queued node carries the sequence number of its insertion. Nodes are
//! extracted by `(weight, sequence)`, so among equal weights the node queued
//! first wins. Leaves are queued in ascending symbol order, which makes the
//! symbol value the final tie-break among leaves.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use crate::distribution::Distribution;
use crate::error::{display_symbol, HuffmanError, Result};

/// A node in the Huffman tree.
///
/// Parents own their children exclusively; the structure is always a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Combined weight of all leaves under this node.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Queue entry ordered by `(weight, sequence)`, reversed for `BinaryHeap`.
struct Queued {
    weight: u64,
    sequence: usize,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        (other.weight, other.sequence).cmp(&(self.weight, self.sequence))
    }
}

/// Immutable Huffman tree over the alphabet of a [`Distribution`].
///
/// For an alphabet of size 1 the root is the single leaf; the code table
/// and decoder treat that leaf as sitting one `0` edge below the root so
/// that every symbol still costs one bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    leaf_count: usize,
}

impl HuffmanTree {
    /// Build the optimal prefix-code tree for `distribution`.
    ///
    /// # Errors
    /// `HuffmanError::EmptyDistribution` if the alphabet is empty.
    pub fn build(distribution: &Distribution) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(distribution.alphabet_size());
        let mut sequence = 0usize;

        // `symbols()` is ascending, which fixes the leaf tie-break order
        for (symbol, count) in distribution.symbols() {
            heap.push(Queued {
                weight: count,
                sequence,
                node: Node::Leaf {
                    symbol,
                    weight: count,
                },
            });
            sequence += 1;
        }

        let leaf_count = heap.len();

        let root = loop {
            let first = heap.pop().ok_or(HuffmanError::EmptyDistribution)?;
            let Some(second) = heap.pop() else {
                break first.node;
            };

            let merged = Node::merge(first.node, second.node);
            heap.push(Queued {
                weight: merged.weight(),
                sequence,
                node: merged,
            });
            sequence += 1;
        };

        let tree = Self { root, leaf_count };
        log::debug!(
            "built huffman tree: {} leaves, weight {}, max depth {}",
            tree.leaf_count,
            tree.weight(),
            tree.max_depth()
        );
        Ok(tree)
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves, equal to the alphabet size.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of internal nodes (`leaf_count - 1`).
    pub fn internal_count(&self) -> usize {
        self.leaf_count - 1
    }

    /// Total weight, equal to the sample size of the source distribution.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest code, counting a lone root leaf as depth 1.
    pub fn max_depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => max = max.max(depth.max(1)),
                Node::Internal { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
            }
        }
        max
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        let mut stack = vec![(&self.root, 0usize, "root")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                Node::Leaf { symbol, weight } => writeln!(
                    f,
                    "{indent}{label}-> Leaf: '{}' ({symbol}) [weight: {weight}]",
                    display_symbol(symbol)
                )?,
                Node::Internal {
                    weight,
                    left,
                    right,
                } => {
                    writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                    // Right pushed first so the left subtree prints first
                    stack.push((&**right, depth + 1, "R"));
                    stack.push((&**left, depth + 1, "L"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8, weight: u64) -> Node {
        Node::Leaf { symbol, weight }
    }

    #[test]
    fn test_two_symbols() {
        let dist = Distribution::from_sample(b"aaab").unwrap();
        let tree = HuffmanTree::build(&dist).unwrap();

        // b (weight 1) is extracted first and becomes the left child
        let expected = Node::Internal {
            weight: 4,
            left: Box::new(leaf(b'b', 1)),
            right: Box::new(leaf(b'a', 3)),
        };
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.internal_count(), 1);
    }

    #[test]
    fn test_equal_weights_prefer_lower_symbol() {
        let dist = Distribution::from_sample(b"ba").unwrap();
        let tree = HuffmanTree::build(&dist).unwrap();

        match tree.root() {
            Node::Internal { left, right, .. } => {
                assert_eq!(left.symbol(), Some(b'a'));
                assert_eq!(right.symbol(), Some(b'b'));
            }
            other => panic!("expected internal root, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_weights_fifo_between_leaf_and_internal() {
        // a:1 b:1 merge into an internal node of weight 2, which ties with c:2.
        // c was queued before the merged node, so c is extracted first.
        let dist = Distribution::from_counts([(b'a', 1), (b'b', 1), (b'c', 2)]).unwrap();
        let tree = HuffmanTree::build(&dist).unwrap();

        match tree.root() {
            Node::Internal { left, right, weight } => {
                assert_eq!(*weight, 4);
                assert_eq!(left.symbol(), Some(b'c'));
                assert!(!right.is_leaf());
            }
            other => panic!("expected internal root, got {other:?}"),
        }
    }

    #[test]
    fn test_single_symbol() {
        let dist = Distribution::from_sample(b"zzzz").unwrap();
        let tree = HuffmanTree::build(&dist).unwrap();

        assert_eq!(tree.root(), &leaf(b'z', 4));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.max_depth(), 1);
    }

    #[test]
    fn test_node_counts_and_weight() {
        let sample = b"the quick brown fox jumped over the lazy dog";
        let dist = Distribution::from_sample(sample).unwrap();
        let tree = HuffmanTree::build(&dist).unwrap();

        assert_eq!(tree.leaf_count(), dist.alphabet_size());
        assert_eq!(tree.weight(), sample.len() as u64);

        let mut leaves = Vec::new();
        let mut internals = 0;
        let mut stack = vec![tree.root()];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => leaves.push(*symbol),
                Node::Internal {
                    weight,
                    left,
                    right,
                } => {
                    assert_eq!(*weight, left.weight() + right.weight());
                    internals += 1;
                    stack.push(&**left);
                    stack.push(&**right);
                }
            }
        }

        leaves.sort_unstable();
        let alphabet: Vec<u8> = dist.symbols().map(|(s, _)| s).collect();
        assert_eq!(leaves, alphabet);
        assert_eq!(internals, tree.internal_count());
    }

    #[test]
    fn test_skewed_depth() {
        // Fibonacci weights produce a maximally skewed tree
        let fib = [1u64, 1, 2, 3, 5, 8, 13, 21];
        let dist = Distribution::from_counts((0u8..).zip(fib)).unwrap();
        let tree = HuffmanTree::build(&dist).unwrap();
        assert_eq!(tree.max_depth(), fib.len() - 1);
    }

    #[test]
    fn test_display() {
        let dist = Distribution::from_sample(b"aaab").unwrap();
        let tree = HuffmanTree::build(&dist).unwrap();
        let rendered = tree.to_string();

        assert!(rendered.starts_with("Huffman Tree Structure:\nroot-> Internal [weight: 4]\n"));
        assert!(rendered.contains("  L-> Leaf: 'b' (98) [weight: 1]"));
        assert!(rendered.contains("  R-> Leaf: 'a' (97) [weight: 3]"));
    }
}
