//! huffstream-core: Huffman prefix coding over byte streams
//!
//! This library builds an optimal prefix code from an empirical byte
//! distribution and uses it to pack symbols into a dense, LSB-first bit
//! stream, and to walk the tree back to symbols on decode.
//!
//! # Architecture
//!
//! - `distribution`: frequency model over a byte sample
//! - `tree`: deterministic Huffman tree construction
//! - `code_table`: per-symbol codes derived from the tree
//! - `bitio`: LSB-first bit writer and lazy bit reader
//! - `writer`: encoder over any `std::io::Write` sink
//! - `reader`: decoder over any `std::io::Read` source
//! - `metrics`: observable codec behavior
//!
//! # Wire format
//!
//! Only code bits, LSB-first per byte, with the unused high bits of the last
//! byte zeroed. There is no header, embedded tree, or symbol count: the
//! decoder must be given the encoder's tree and the expected symbol count.
//!
//! # Example
//! ```
//! use huffstream_core::{Distribution, Reader, Writer};
//!
//! let dist = Distribution::from_sample(b"aaab")?;
//! let mut writer = Writer::new(Vec::new(), &dist)?;
//! assert_eq!(writer.write(b"aaab")?, 4);
//!
//! let (encoded, tree) = writer.into_parts();
//! assert_eq!(encoded, vec![0b0000_0111]);
//!
//! let mut reader = Reader::new(encoded.as_slice(), &tree);
//! let mut out = [0u8; 4];
//! assert_eq!(reader.read(&mut out)?, 4);
//! assert_eq!(&out, b"aaab");
//! # Ok::<(), huffstream_core::Error>(())
//! ```

pub mod bitio;
pub mod code_table;
pub mod distribution;
pub mod error;
pub mod metrics;
pub mod reader;
pub mod tree;
pub mod writer;

// Re-export commonly used types
pub use code_table::{Code, CodeTable};
pub use distribution::Distribution;
pub use error::{BitIoError, Error, HuffmanError, Result};
pub use reader::Reader;
pub use tree::{HuffmanTree, Node};
pub use writer::Writer;
