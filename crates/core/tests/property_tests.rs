//! Property-based tests for the codec invariants.

use huffstream_core::{CodeTable, Distribution, HuffmanTree, Reader, Writer};
use proptest::prelude::*;

fn table_for(dist: &Distribution) -> CodeTable {
    CodeTable::from_tree(&HuffmanTree::build(dist).unwrap()).unwrap()
}

proptest! {
    #[test]
    fn test_round_trip_property(
        sample in prop::collection::vec(any::<u8>(), 1..512),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..512),
    ) {
        // Build the message from symbols that occur in the sample
        let message: Vec<u8> = picks.iter().map(|i| *i.get(&sample)).collect();

        let dist = Distribution::from_sample(&sample)?;
        let mut writer = Writer::new(Vec::new(), &dist)?;
        prop_assert_eq!(writer.write(&message)?, message.len());

        let (encoded, tree) = writer.into_parts();
        let mut reader = Reader::new(encoded.as_slice(), &tree);
        prop_assert_eq!(reader.read_symbols(message.len())?, message);
    }

    #[test]
    fn test_prefix_property(sample in prop::collection::vec(any::<u8>(), 1..1024)) {
        let dist = Distribution::from_sample(&sample)?;
        let table = table_for(&dist);
        prop_assert_eq!(table.len(), dist.alphabet_size());

        for (a, code_a) in table.iter() {
            prop_assert!(code_a.len >= 1);
            for (b, code_b) in table.iter() {
                if a != b {
                    prop_assert!(!code_a.is_prefix_of(code_b));
                }
            }
        }
    }

    #[test]
    fn test_average_length_within_entropy_bound(
        sample in prop::collection::vec(any::<u8>(), 2..2048)
    ) {
        let dist = Distribution::from_sample(&sample)?;
        prop_assume!(dist.alphabet_size() > 1);

        let avg = table_for(&dist).average_length(&dist);
        let entropy = dist.entropy();
        prop_assert!(avg + 1e-9 >= entropy);
        prop_assert!(avg < entropy + 1.0);
    }

    #[test]
    fn test_determinism_under_reordering(
        counts in prop::collection::vec((any::<u8>(), 1u64..1000), 1..64)
    ) {
        let forward = Distribution::from_counts(counts.iter().copied())?;
        let reversed = Distribution::from_counts(counts.iter().rev().copied())?;

        prop_assert_eq!(table_for(&forward), table_for(&reversed));
    }
}
