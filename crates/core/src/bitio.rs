//! Bit-level I/O utilities for reading and writing individual bits.
//!
//! Both `BitWriter` and `BitReader` operate LSB-first: the first bit written
//! into a byte occupies bit 0, the eighth occupies bit 7. This is the order
//! in which Huffman codes are packed on the wire.
//!
//! # Padding Rules
//! - BitWriter: leaves the unused high bits of the final byte as zero
//! - BitReader: cannot tell padding from data (caller must know the symbol count)
//!
//! # Example
//! ```
//! use huffstream_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap(); // bits 1, 0, 1
//! writer.write_bits(0b11, 2).unwrap(); // bits 1, 1
//! // Byte layout (bit 7 .. bit 0): 000_11_101
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b0001_1101]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits LSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - bits of `bit_buffer` at positions >= `bit_count` are zero
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a BitWriter whose output buffer can hold `bytes` bytes
    /// without reallocating.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.bit_buffer |= (bit as u8) << self.bit_count;
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write up to 64 bits to the output.
    ///
    /// Bits are taken from `value` starting at its least significant bit, so
    /// bit 0 of `value` is written first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        let mut val = value;

        while remaining > 0 {
            // Room left in the current byte
            let bits_to_write = remaining.min(8 - self.bit_count as usize);
            let mask = (1u16 << bits_to_write) - 1;
            let bits = (val & mask as u64) as u8;

            self.bit_buffer |= bits << self.bit_count;
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            val = val.checked_shr(bits_to_write as u32).unwrap_or(0);
            remaining -= bits_to_write;
        }

        Ok(())
    }

    /// Finish writing and return the output bytes.
    ///
    /// A partially filled final byte is emitted with its unused high bits
    /// left as zero.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Return the number of complete bytes written so far.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

/// Lazy, forward-only view of a byte slice as a sequence of bits,
/// LSB-first per byte.
///
/// Exhaustion is reported as `None` from [`BitReader::read_bit`] (and from the
/// `Iterator` impl), distinct from the `Err` returned by a `read_bits` call
/// that asks for more bits than remain.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = LSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader for the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Create a BitReader that resumes at `position` bits into `data`.
    ///
    /// Positions past the end are clamped, yielding an exhausted reader.
    pub fn at(data: &'a [u8], position: usize) -> Self {
        Self {
            data,
            bit_position: position.min(data.len() * 8),
        }
    }

    /// Read a single bit, or `None` once the data is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.bit_position / 8)?;
        let bit = (byte >> (self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Some(bit)
    }

    /// Read up to 64 bits from the input.
    ///
    /// The first bit read lands in bit 0 of the result, mirroring
    /// [`BitWriter::write_bits`].
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut filled = 0usize;

        while filled < count {
            let byte_idx = self.bit_position / 8;
            let bit_offset = self.bit_position % 8;

            let bits_to_read = (count - filled).min(8 - bit_offset);
            let mask = ((1u16 << bits_to_read) - 1) as u8;
            let bits = (self.data[byte_idx] >> bit_offset) & mask;

            result |= (bits as u64) << filled;

            self.bit_position += bits_to_read;
            filled += bits_to_read;
        }

        Ok(result)
    }

    /// Return the number of bits remaining in the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if we're at the end of the buffer.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110011, 8).unwrap();

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b10110011]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(8).unwrap(), 0b10110011);
    }

    #[test]
    fn test_lsb_first_order() {
        // Bits a,a,a,b with a=0 and b=1 land in positions 0..4
        let mut writer = BitWriter::new();
        for bit in [false, false, false, true] {
            writer.write_bit(bit);
        }
        assert_eq!(writer.finish(), vec![8]);
    }

    #[test]
    fn test_padding() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        assert_eq!(writer.bit_len(), 1);
        assert_eq!(writer.byte_len(), 0);

        // High bits stay zero
        assert_eq!(writer.finish(), vec![0b0000_0001]);
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1010101111110000, 16).unwrap();

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b11110000, 0b10101011]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(16).unwrap(), 0b1010101111110000);
    }

    #[test]
    fn test_straddles_byte_boundary() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b111111, 6).unwrap();
        writer.write_bits(0b0101, 4).unwrap();

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b0111_1111, 0b0000_0001]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(6).unwrap(), 0b111111);
        assert_eq!(reader.read_bits(4).unwrap(), 0b0101);
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0b10101010];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(8).unwrap(), 0b10101010);
        assert!(matches!(
            reader.read_bits(1),
            Err(Error::BitIo(BitIoError::UnexpectedEof))
        ));
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(0, 65),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));

        let mut reader = BitReader::new(&[0u8; 16]);
        assert!(reader.read_bits(65).is_err());
    }

    #[test]
    fn test_zero_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 0).unwrap();
        assert!(writer.finish().is_empty());

        let mut reader = BitReader::new(&[0xFF]);
        assert_eq!(reader.read_bits(0).unwrap(), 0);
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        let val = 0x123456789ABCDEF0u64;
        writer.write_bits(val, 64).unwrap();

        let bytes = writer.finish();
        assert_eq!(bytes.len(), 9);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bits(64).unwrap(), val);
    }

    #[test]
    fn test_iterator_yields_lsb_first() {
        let data = [0b0000_0101u8, 0b1000_0000];
        let bits: Vec<bool> = BitReader::new(&data).collect();

        assert_eq!(bits.len(), 16);
        assert_eq!(&bits[..4], &[true, false, true, false]);
        assert!(bits[15]);
        assert_eq!(bits.iter().filter(|b| **b).count(), 3);
    }

    #[test]
    fn test_resume_at_position() {
        let data = [0b1111_0000u8];
        let mut reader = BitReader::at(&data, 4);
        assert_eq!(reader.bits_remaining(), 4);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert!(reader.is_empty());

        let reader = BitReader::at(&data, 100);
        assert_eq!(reader.position(), 8);
        assert!(reader.is_empty());
    }
}
