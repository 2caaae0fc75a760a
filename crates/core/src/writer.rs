//! Huffman encoder over a byte sink.
//!
//! The [`Writer`] packs each call's symbols into a self-contained run of
//! bytes: the last byte of every call is zero-padded, and nothing but code
//! bits is ever emitted. The stream carries no header, symbol count, or
//! tree, so the decoder must be handed the same [`HuffmanTree`] out of band
//! (see [`Writer::tree`] and [`Writer::into_parts`]).
//!
//! Splitting a message across calls changes the bytes, so a stream written
//! in several calls decodes one call at a time. For the same reason
//! `Writer` does not implement [`std::io::Write`], whose callers may chunk
//! data arbitrarily.
//!
//! # Example
//! ```
//! use huffstream_core::{Distribution, Reader, Writer};
//!
//! let dist = Distribution::from_sample(b"abracadabra")?;
//! let mut writer = Writer::new(Vec::new(), &dist)?;
//! writer.write(b"cadabra")?;
//!
//! let (encoded, tree) = writer.into_parts();
//! let mut reader = Reader::new(encoded.as_slice(), &tree);
//! assert_eq!(reader.read_symbols(7)?, b"cadabra");
//! # Ok::<(), huffstream_core::Error>(())
//! ```

use std::io::Write;

use crate::code_table::CodeTable;
use crate::distribution::Distribution;
use crate::error::Result;
use crate::tree::HuffmanTree;

/// Encodes symbols with a fixed Huffman code and writes the packed bytes to
/// an underlying sink.
///
/// # Thread Safety
///
/// A `Writer` is used through `&mut self`; callers sharing one across
/// threads must serialize access.
#[derive(Debug)]
pub struct Writer<W: Write> {
    inner: W,
    tree: HuffmanTree,
    table: CodeTable,
}

impl<W: Write> Writer<W> {
    /// Build the tree and code table for `distribution` and wrap `inner`.
    ///
    /// The distribution must cover every symbol that will be written.
    pub fn new(inner: W, distribution: &Distribution) -> Result<Self> {
        Self::with_tree(inner, HuffmanTree::build(distribution)?)
    }

    /// Wrap `inner` using an already built tree.
    pub fn with_tree(inner: W, tree: HuffmanTree) -> Result<Self> {
        let table = CodeTable::from_tree(&tree)?;
        Ok(Self { inner, tree, table })
    }

    /// Encode `symbols` and write the packed bytes to the sink.
    ///
    /// Returns the number of input symbols consumed, which is always
    /// `symbols.len()` on success. Each call is padded independently; bits
    /// are never carried over into the next call.
    ///
    /// # Errors
    /// - `HuffmanError::UnknownSymbol` if any symbol has no code. Nothing is
    ///   written to the sink for the call in that case.
    /// - `Error::Io` if the sink fails.
    pub fn write(&mut self, symbols: &[u8]) -> Result<usize> {
        if symbols.is_empty() {
            return Ok(0);
        }

        let encoded = self.table.encode(symbols)?;
        self.inner.write_all(&encoded)?;

        log::trace!(
            "encoded {} symbols into {} bytes",
            symbols.len(),
            encoded.len()
        );
        Ok(symbols.len())
    }

    /// The tree this writer encodes with. A decoder needs this exact tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The code table derived from [`Writer::tree`].
    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the underlying sink, dropping the tree.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Unwrap into the sink and the tree, so the tree can outlive the writer.
    pub fn into_parts(self) -> (W, HuffmanTree) {
        (self.inner, self.tree)
    }
}
