//! Error types for the huffstream codec.
//!
//! All operations return structured errors rather than panicking. A clean end
//! of input on a symbol boundary is never an error; it is reported as a short
//! (or zero) read.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Huffman: distribution, tree construction, encode/decode failures
/// - CRC: round-trip verification failed
/// - I/O: the underlying byte sink or source
/// - Config: invalid demonstration-program arguments
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., unknown symbol, truncated stream)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Decoded data does not match the original. Raised by the demonstration
    /// program's round-trip check; the codec itself never produces it.
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// Byte sink or source error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// Zero-sample distribution, or a tree requested over an empty alphabet
    #[error("empty distribution: no symbols to build a code from")]
    EmptyDistribution,

    /// Symbol counts whose sum does not fit in `u64`
    #[error("symbol counts overflow at symbol {symbol}")]
    CountOverflow { symbol: u8 },

    /// Encode-time symbol with no code in the table
    #[error("symbol {symbol} ({}) was not in the distribution", display_symbol(.symbol))]
    UnknownSymbol { symbol: u8 },

    /// Input ended part-way through a code
    #[error("stream truncated mid-symbol after {decoded} decoded symbols")]
    TruncatedStream { decoded: usize },

    /// Bit sequence that does not lead to any leaf
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Stream ended cleanly before the requested number of symbols
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Code length exceeds the 64-bit path representation
    #[error("code length {length} exceeds maximum 64")]
    CodeLengthTooLong { length: usize },
}

/// Printable rendering of a byte for messages, `.` for non-graphic bytes.
pub(crate) fn display_symbol(symbol: &u8) -> char {
    if symbol.is_ascii_graphic() || *symbol == b' ' {
        *symbol as char
    } else {
        '.'
    }
}

impl Error {
    /// Returns the codec error kind, if this is one.
    pub fn huffman(&self) -> Option<&HuffmanError> {
        match self {
            Error::Huffman(e) => Some(e),
            _ => None,
        }
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
