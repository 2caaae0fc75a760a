//! Empirical frequency model over byte symbols.
//!
//! A [`Distribution`] approximates the probability of each byte value by its
//! frequency in a sample. Only symbols that occurred at least once belong to
//! the alphabet the Huffman tree is built over.

use std::fmt;

use crate::error::{display_symbol, HuffmanError, Result};

/// Occurrence counts for all 256 byte values plus the total sample size.
///
/// # Invariants
/// - `total` equals the sum of `counts`
/// - `total > 0` (empty samples are rejected at construction)
#[derive(Clone, PartialEq, Eq)]
pub struct Distribution {
    counts: [u64; 256],
    total: u64,
}

impl Distribution {
    /// Build a distribution from the byte frequencies of `sample`.
    ///
    /// # Errors
    /// `HuffmanError::EmptyDistribution` if `sample` is empty.
    pub fn from_sample(sample: &[u8]) -> Result<Self> {
        let mut counts = [0u64; 256];
        for &byte in sample {
            counts[byte as usize] += 1;
        }
        Self::from_count_array(counts)
    }

    /// Build a distribution from explicit `(symbol, count)` pairs.
    ///
    /// Pairs may arrive in any order; repeated symbols accumulate.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyDistribution` if all counts sum to zero
    /// - `HuffmanError::CountOverflow` if the counts do not sum within `u64`
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = [0u64; 256];
        for (symbol, count) in counts {
            let slot = &mut table[symbol as usize];
            *slot = slot
                .checked_add(count)
                .ok_or(HuffmanError::CountOverflow { symbol })?;
        }
        Self::from_count_array(table)
    }

    fn from_count_array(counts: [u64; 256]) -> Result<Self> {
        let mut total = 0u64;
        for (symbol, &count) in counts.iter().enumerate() {
            total = total.checked_add(count).ok_or(HuffmanError::CountOverflow {
                symbol: symbol as u8,
            })?;
        }
        if total == 0 {
            return Err(HuffmanError::EmptyDistribution.into());
        }
        Ok(Self { counts, total })
    }

    /// Probability of `symbol`, `0.0` for symbols absent from the sample.
    pub fn probability_of(&self, symbol: u8) -> f64 {
        self.counts[symbol as usize] as f64 / self.total as f64
    }

    /// Number of times `symbol` occurred in the sample.
    pub fn count_of(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total sample size.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols with a non-zero count.
    pub fn alphabet_size(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Iterate `(symbol, count)` for the alphabet, ascending by symbol.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Shannon entropy in bits per symbol.
    pub fn entropy(&self) -> f64 {
        self.symbols()
            .map(|(symbol, _)| {
                let p = self.probability_of(symbol);
                p * (1.0 / p).log2()
            })
            .sum()
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Distribution")
            .field("total", &self.total)
            .field("counts", &self.symbols().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dist[")?;
        for (i, (symbol, _)) in self.symbols().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{}({}):{:.3}",
                symbol,
                display_symbol(&symbol),
                self.probability_of(symbol)
            )?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_counts_and_total() {
        let dist = Distribution::from_sample(b"aaab").unwrap();

        assert_eq!(dist.count_of(b'a'), 3);
        assert_eq!(dist.count_of(b'b'), 1);
        assert_eq!(dist.total(), 4);
        assert_eq!(dist.alphabet_size(), 2);
        assert_eq!(dist.probability_of(b'a'), 0.75);
        assert_eq!(dist.probability_of(b'b'), 0.25);
    }

    #[test]
    fn test_absent_symbol_has_zero_probability() {
        let dist = Distribution::from_sample(b"hello").unwrap();
        assert_eq!(dist.probability_of(b'z'), 0.0);
        assert_eq!(dist.count_of(b'z'), 0);
    }

    #[test]
    fn test_empty_sample_rejected() {
        assert!(matches!(
            Distribution::from_sample(b""),
            Err(Error::Huffman(HuffmanError::EmptyDistribution))
        ));
        assert!(matches!(
            Distribution::from_counts([(b'a', 0), (b'b', 0)]),
            Err(Error::Huffman(HuffmanError::EmptyDistribution))
        ));
    }

    #[test]
    fn test_from_counts_accumulates() {
        let dist = Distribution::from_counts([(b'b', 1), (b'a', 2), (b'a', 1)]).unwrap();
        assert_eq!(dist, Distribution::from_sample(b"aaab").unwrap());
    }

    #[test]
    fn test_count_overflow_rejected() {
        // Total overflows
        assert!(matches!(
            Distribution::from_counts([(0, u64::MAX), (1, 1)]),
            Err(Error::Huffman(HuffmanError::CountOverflow { symbol: 1 }))
        ));

        // A single symbol's accumulated count overflows
        assert!(matches!(
            Distribution::from_counts([(b'a', u64::MAX), (b'a', 1)]),
            Err(Error::Huffman(HuffmanError::CountOverflow { symbol: b'a' }))
        ));

        let dist = Distribution::from_counts([(0, u64::MAX - 1), (1, 1)]).unwrap();
        assert_eq!(dist.total(), u64::MAX);
    }

    #[test]
    fn test_symbols_ascending() {
        let dist = Distribution::from_sample(b"zyxzz").unwrap();
        let symbols: Vec<_> = dist.symbols().collect();
        assert_eq!(symbols, vec![(b'x', 1), (b'y', 1), (b'z', 3)]);
    }

    #[test]
    fn test_entropy() {
        let uniform = Distribution::from_sample(b"abcd").unwrap();
        assert!((uniform.entropy() - 2.0).abs() < 1e-12);

        let single = Distribution::from_sample(b"aaaa").unwrap();
        assert_eq!(single.entropy(), 0.0);
    }

    #[test]
    fn test_display() {
        let dist = Distribution::from_sample(b"aaab").unwrap();
        assert_eq!(dist.to_string(), "dist[97(a):0.750, 98(b):0.250]");

        let dist = Distribution::from_sample(&[0u8, 0u8]).unwrap();
        assert_eq!(dist.to_string(), "dist[0(.):1.000]");
    }
}
