//! Sample generation for the demonstration.
//!
//! With `--seed`, the sample is generated instead of taken from text or a
//! file. Generated data mixes sections with different symbol statistics so
//! the code lengths visibly differ:
//! - Skewed text (letters drawn with English-like frequencies)
//! - Runs of a single byte
//! - Short repeating patterns

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Letters ordered by rough English frequency, most common first.
const LETTERS: &[u8] = b" etaoinshrdlcumwfgypbvkjxqz";

/// Generate a sample with mixed symbol statistics.
///
/// The same `seed` and `size_bytes` always produce the same bytes.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;

    while remaining > 0 {
        let section = remaining.min(rng.gen_range(64..=1024));

        match rng.gen_range(0..10u8) {
            // 60% skewed text
            0..=5 => {
                for _ in 0..section {
                    data.push(skewed_letter(&mut rng));
                }
            }

            // 20% runs of the same letter
            6..=7 => {
                let byte_value = LETTERS[rng.gen_range(0..LETTERS.len())];
                data.extend(std::iter::repeat(byte_value).take(section));
            }

            // 20% repeating patterns
            _ => {
                let pattern = generate_pattern(&mut rng);
                data.extend(pattern.iter().cycle().take(section));
            }
        }

        remaining -= section;
    }

    data
}

/// Pick a letter, favoring the front of [`LETTERS`].
fn skewed_letter(rng: &mut ChaCha8Rng) -> u8 {
    let r: f64 = rng.gen();
    let idx = (r * r * LETTERS.len() as f64) as usize;
    LETTERS[idx.min(LETTERS.len() - 1)]
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let pattern_len = rng.gen_range(4..=32);
    (0..pattern_len).map(|_| skewed_letter(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_data() {
        let data = generate_sample_data(42, 1000);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|b| LETTERS.contains(b)));
    }

    #[test]
    fn test_determinism() {
        let data1 = generate_sample_data(12345, 5000);
        let data2 = generate_sample_data(12345, 5000);

        assert_eq!(data1, data2);
    }

    #[test]
    fn test_different_seeds() {
        let data1 = generate_sample_data(1, 1000);
        let data2 = generate_sample_data(2, 1000);

        assert_ne!(data1, data2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 1000, 10000, 100000] {
            let data = generate_sample_data(999, size);
            assert_eq!(data.len(), size);
        }
    }
}
