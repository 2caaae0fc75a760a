//! Huffman decoder over a byte source.
//!
//! The [`Reader`] pulls bytes from its source, views them LSB-first as a bit
//! stream, and walks the tree one bit at a time: `0` descends left, `1`
//! descends right, and reaching a leaf emits its symbol and resets the
//! cursor to the root.
//!
//! # End of stream
//!
//! The wire format carries no symbol count. Running out of input exactly on
//! a symbol boundary is a clean end (a short or zero-length read). Running
//! out part-way through a code is [`HuffmanError::TruncatedStream`]; the
//! reader keeps its place in the tree, so it resumes the symbol once the
//! source has more bytes.
//!
//! Zero padding in the final byte is indistinguishable from code bits. If
//! the caller asks for more symbols than were encoded, the padding may decode
//! as extra symbols. Callers must know how many symbols to expect, e.g. via
//! [`Reader::read_symbols`].

use std::io::{self, Read};

use crate::bitio::BitReader;
use crate::error::{Error, HuffmanError, Result};
use crate::tree::{HuffmanTree, Node};

/// Number of source bytes pulled per refill.
const REFILL_BYTES: usize = 4096;

/// Decodes symbols from an underlying byte source using a borrowed tree.
///
/// Many readers may share one tree, including across threads; each reader
/// itself must be used from one thread at a time.
#[derive(Debug)]
pub struct Reader<'t, R: Read> {
    inner: R,
    tree: &'t HuffmanTree,
    /// Bytes pulled from `inner` but not fully consumed
    pending: Vec<u8>,
    /// Bit offset of the next unread bit in `pending`
    bit_position: usize,
    /// Bits consumed over the reader's lifetime
    bits_consumed: usize,
    /// Tree position of the symbol being decoded; the root between symbols
    cursor: &'t Node,
    /// Bits consumed since `cursor` last left the root
    depth: usize,
    /// Error held back because the failing call had already decoded symbols
    deferred: Option<Error>,
}

impl<'t, R: Read> Reader<'t, R> {
    /// Create a reader that decodes `inner` with `tree`, which must be the
    /// tree the stream was encoded with.
    pub fn new(inner: R, tree: &'t HuffmanTree) -> Self {
        Self {
            inner,
            tree,
            pending: Vec::new(),
            bit_position: 0,
            bits_consumed: 0,
            cursor: tree.root(),
            depth: 0,
            deferred: None,
        }
    }

    /// Decode up to `out.len()` symbols into `out`.
    ///
    /// Returns the number of symbols decoded. A return value smaller than
    /// `out.len()` (including zero) means the source ended cleanly on a
    /// symbol boundary.
    ///
    /// An error met after some symbols were decoded is held back: the call
    /// returns the symbols, and the next call reports the error.
    ///
    /// # Errors
    /// - `HuffmanError::TruncatedStream` if the source ends mid-symbol. The
    ///   first `decoded` slots of `out` hold valid symbols. The partial
    ///   symbol is kept, so once the source has more bytes the next call
    ///   resumes it.
    /// - `HuffmanError::InvalidCode` if a `1` bit arrives for a single-symbol
    ///   tree. The offending bit is consumed.
    /// - `Error::Io` if the source fails.
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }

        let tree = self.tree;
        let mut decoded = 0;

        while decoded < out.len() {
            if self.bit_position >= self.pending.len() * 8 {
                match self.refill() {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(err) => return self.fail(err, decoded),
                }
            }

            let mut bits = BitReader::at(&self.pending, self.bit_position);
            let mut invalid = None;

            while decoded < out.len() {
                let Some(bit) = bits.read_bit() else {
                    break;
                };
                self.depth += 1;

                let node = self.cursor;
                self.cursor = match node {
                    Node::Internal { left, right, .. } => {
                        if bit {
                            &**right
                        } else {
                            &**left
                        }
                    }
                    // Lone root leaf: its only code is a single `0`
                    Node::Leaf { .. } if !bit => node,
                    Node::Leaf { .. } => {
                        invalid = Some(
                            self.bits_consumed + bits.position() - self.bit_position - 1,
                        );
                        self.depth = 0;
                        break;
                    }
                };

                if let Node::Leaf { symbol, .. } = self.cursor {
                    out[decoded] = *symbol;
                    decoded += 1;
                    self.cursor = tree.root();
                    self.depth = 0;
                }
            }

            let consumed = bits.position() - self.bit_position;
            self.bits_consumed += consumed;
            self.bit_position += consumed;

            if let Some(position) = invalid {
                return self.fail(HuffmanError::InvalidCode { position }.into(), decoded);
            }
        }

        if self.depth > 0 {
            return Err(HuffmanError::TruncatedStream { decoded }.into());
        }

        log::trace!("decoded {} symbols", decoded);
        Ok(decoded)
    }

    /// Report `err` now, or hold it for the next call if `decoded` symbols
    /// are already in the caller's buffer.
    fn fail(&mut self, err: Error, decoded: usize) -> Result<usize> {
        if decoded == 0 {
            return Err(err);
        }
        log::trace!("decoded {} symbols, deferring error: {}", decoded, err);
        self.deferred = Some(err);
        Ok(decoded)
    }

    /// Decode exactly `count` symbols.
    ///
    /// # Errors
    /// - `HuffmanError::LengthMismatch` if the source ends cleanly early
    /// - any error from [`Reader::read`]
    pub fn read_symbols(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; count];
        let mut filled = 0;

        while filled < count {
            let n = self.read(&mut out[filled..])?;
            if n == 0 {
                return Err(HuffmanError::LengthMismatch {
                    expected: count,
                    actual: filled,
                }
                .into());
            }
            filled += n;
        }

        Ok(out)
    }

    /// Total number of bits consumed from the source so far.
    pub fn bits_consumed(&self) -> usize {
        self.bits_consumed
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying source, e.g. to append bytes after a
    /// `TruncatedStream`.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the underlying source. Buffered but undecoded bits are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Replace the consumed buffer with the next bytes from the source.
    ///
    /// Returns `false` once the source is exhausted.
    fn refill(&mut self) -> Result<bool> {
        self.pending.resize(REFILL_BYTES, 0);
        let n = loop {
            match self.inner.read(&mut self.pending) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.pending.clear();
                    self.bit_position = 0;
                    return Err(e.into());
                }
            }
        };
        self.pending.truncate(n);
        self.bit_position = 0;
        Ok(n > 0)
    }
}

impl<R: Read> Read for Reader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let result = match Reader::read(self, buf) {
            // Hand back the complete symbols; the next call reports the truncation
            Err(Error::Huffman(HuffmanError::TruncatedStream { decoded })) if decoded > 0 => {
                Ok(decoded)
            }
            result => result,
        };
        result.map_err(|e| match e {
            Error::Io(e) => e,
            e @ Error::Huffman(HuffmanError::TruncatedStream { .. }) => {
                io::Error::new(io::ErrorKind::UnexpectedEof, e)
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        })
    }
}
