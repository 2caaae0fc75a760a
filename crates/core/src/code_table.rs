//! Code table derivation and bit packing.
//!
//! A [`CodeTable`] maps every leaf symbol of a [`HuffmanTree`] to the path
//! from the root to that leaf: a left edge contributes a `0` bit and a right
//! edge a `1` bit. The edge nearest the root is the first bit written to the
//! stream and the first bit the decoder consumes.

use std::fmt;

use crate::bitio::BitWriter;
use crate::distribution::Distribution;
use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanTree, Node};

/// Longest code representable by [`Code`].
pub const MAX_CODE_LEN: usize = 64;

/// A Huffman code: the root-to-leaf path of one symbol.
///
/// Bit `i` of `bits` is the edge taken at depth `i + 1`, so bit 0 is the
/// edge leaving the root. Bits at positions `>= len` are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// Path bits, root edge in bit 0
    pub bits: u64,
    /// Number of meaningful bits (1-64)
    pub len: u8,
}

impl Code {
    /// The `i`-th edge from the root (`false` = left, `true` = right).
    pub fn bit(&self, i: usize) -> bool {
        i < self.len as usize && (self.bits >> i) & 1 == 1
    }

    /// True if `self` is a (non-strict) bit-prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && low_bits(other.bits, self.len) == self.bits
    }
}

fn low_bits(value: u64, len: u8) -> u64 {
    if len as usize >= MAX_CODE_LEN {
        value
    } else {
        value & ((1u64 << len) - 1)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len as usize {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol → [`Code`] mapping derived from one tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    len: usize,
}

impl CodeTable {
    /// Derive the code of every leaf in `tree`.
    ///
    /// A tree whose root is a leaf (single-symbol alphabet) assigns that
    /// symbol the one-bit code `0`.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if a leaf sits deeper than
    /// [`MAX_CODE_LEN`].
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; 256];
        let mut len = 0;

        let mut stack = vec![(tree.root(), 0u64, 0usize)];
        while let Some((node, bits, depth)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes[*symbol as usize] = Some(Code {
                        bits,
                        len: depth.max(1) as u8,
                    });
                    len += 1;
                }
                Node::Internal { left, right, .. } => {
                    if depth >= MAX_CODE_LEN {
                        return Err(HuffmanError::CodeLengthTooLong { length: depth + 1 }.into());
                    }
                    stack.push((&**right, bits | (1u64 << depth), depth + 1));
                    stack.push((&**left, bits, depth + 1));
                }
            }
        }

        Ok(Self { codes, len })
    }

    /// The code for `symbol`, `None` if the symbol has no leaf.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len as usize).max().unwrap_or(0)
    }

    /// Expected code length in bits per symbol under `distribution`.
    pub fn average_length(&self, distribution: &Distribution) -> f64 {
        self.iter()
            .map(|(symbol, code)| distribution.probability_of(symbol) * code.len as f64)
            .sum()
    }

    /// Pack the codes of `symbols` LSB-first into bytes.
    ///
    /// The final byte is zero-padded in its unused high bits. Nothing is
    /// returned unless every symbol has a code.
    ///
    /// # Errors
    /// `HuffmanError::UnknownSymbol` naming the first symbol without a code.
    pub fn encode(&self, symbols: &[u8]) -> Result<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(symbols.len() / 2 + 1);
        for &symbol in symbols {
            let code = self
                .get(symbol)
                .ok_or(HuffmanError::UnknownSymbol { symbol })?;
            writer.write_bits(code.bits, code.len as usize)?;
        }
        Ok(writer.finish())
    }
}
