//! Sweep-line merge of address ranges.

use crate::models::AddrRange;

/// Merge `ranges` into sorted, maximal ranges that neither overlap nor touch.
///
/// Ranges are sorted by their integer lower bound, so each candidate only
/// needs comparing against the last accepted range: every later candidate
/// starts at or after it, and cannot reach any range accepted before it.
pub fn merge_ranges(mut ranges: Vec<AddrRange>) -> Vec<AddrRange> {
    ranges.sort_unstable();
    let mut merged: Vec<AddrRange> = Vec::with_capacity(ranges.len());

    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.touches(&range) => {
                log::trace!("merge {last} + {range}");
                *last = last.combine(&range);
            }
            _ => merged.push(range),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;

    fn ranges(cidrs: &[&str]) -> Vec<AddrRange> {
        cidrs
            .iter()
            .map(|c| Ipv4::new(c).unwrap().range())
            .collect()
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_ranges(vec![]).is_empty());
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge_ranges(ranges(&["10.0.0.0/8", "10.1.0.0/16", "10.255.255.255/32"]));
        assert_eq!(merged, ranges(&["10.0.0.0/8"]));
    }

    #[test]
    fn test_merge_adjacent() {
        let merged = merge_ranges(ranges(&["192.168.1.0/24", "192.168.0.0/24"]));
        assert_eq!(merged, ranges(&["192.168.0.0/23"]));
    }

    #[test]
    fn test_merge_keeps_gap() {
        let input = vec![AddrRange { lo: 0, hi: 9 }, AddrRange { lo: 11, hi: 20 }];
        assert_eq!(merge_ranges(input.clone()), input);
    }

    #[test]
    fn test_merge_sorts_numerically() {
        // "9.0.0.0" sorts after "10.0.0.0" as text
        let merged = merge_ranges(ranges(&["10.0.0.0/8", "9.0.0.0/8", "100.0.0.0/8"]));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].to_string(), "9.0.0.0 - 10.255.255.255");
        assert_eq!(merged[1].to_string(), "100.0.0.0 - 100.255.255.255");
    }

    #[test]
    fn test_merge_chain_through_long_range() {
        // A long range absorbs later ones that do not touch the one before it
        let input = vec![
            AddrRange { lo: 0, hi: 100 },
            AddrRange { lo: 5, hi: 6 },
            AddrRange { lo: 50, hi: 60 },
            AddrRange { lo: 101, hi: 101 },
            AddrRange { lo: 200, hi: 300 },
        ];
        assert_eq!(
            merge_ranges(input),
            vec![AddrRange { lo: 0, hi: 101 }, AddrRange { lo: 200, hi: 300 }]
        );
    }

    #[test]
    fn test_merge_address_space_edges() {
        let merged = merge_ranges(ranges(&[
            "255.255.255.255/32",
            "0.0.0.0/32",
            "0.0.0.0/1",
            "128.0.0.0/1",
        ]));
        assert_eq!(merged, vec![AddrRange { lo: 0, hi: u32::MAX }]);

        let merged = merge_ranges(ranges(&["255.255.255.255/32", "0.0.0.0/32"]));
        assert_eq!(merged.len(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn range_strategy() -> impl Strategy<Value = AddrRange> {
        // Narrow value space so overlaps and adjacency are common
        (0u32..2000, 0u32..200).prop_map(|(lo, len)| AddrRange {
            lo,
            hi: lo + len,
        })
    }

    fn ranges_strategy() -> impl Strategy<Value = Vec<AddrRange>> {
        prop::collection::vec(range_strategy(), 0..60)
    }

    proptest! {
        #[test]
        fn prop_merge_idempotent(input in ranges_strategy()) {
            let once = merge_ranges(input);
            let twice = merge_ranges(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_merge_sorted_and_separated(input in ranges_strategy()) {
            let merged = merge_ranges(input);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].hi + 1 < pair[1].lo, "{} and {} touch", pair[0], pair[1]);
            }
        }

        #[test]
        fn prop_merge_complete(input in ranges_strategy()) {
            let merged = merge_ranges(input.clone());
            for range in &input {
                let holders = merged
                    .iter()
                    .filter(|m| m.lo <= range.lo && range.hi <= m.hi)
                    .count();
                prop_assert_eq!(holders, 1, "{} not held by exactly one range", range);
            }
            // Nothing outside the union is added
            for m in &merged {
                for v in [m.lo, m.hi] {
                    prop_assert!(input.iter().any(|r| r.contains(v)));
                }
            }
            let covered: u64 = merged.iter().map(|m| m.size()).sum();
            let mut values: Vec<u32> = input.iter().flat_map(|r| r.lo..=r.hi).collect();
            values.sort_unstable();
            values.dedup();
            prop_assert_eq!(covered, values.len() as u64);
        }

        #[test]
        fn prop_merge_order_invariant(input in ranges_strategy()) {
            let mut reversed = input.clone();
            reversed.reverse();
            prop_assert_eq!(merge_ranges(input), merge_ranges(reversed));
        }
    }
}
