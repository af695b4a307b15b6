//! Covering CIDR blocks for sets of addresses and ranges.
//!
//! [`covering_cidr`] returns one block that contains every input address and
//! may reach past them. [`range_to_cidrs`] returns the exact list of aligned
//! blocks whose union is the range.

use crate::error::CidrError;
use crate::models::{address_to_value, get_cidr_mask, lo_mask, AddrRange, Ipv4, MAX_LENGTH};
use itertools::{Itertools, MinMaxResult};
use std::net::Ipv4Addr;

/// Smallest CIDR block containing every address in `addresses`.
///
/// # Examples
/// ```
/// use inetnum_cidr_summary::processing::covering_cidr;
/// let cidr = covering_cidr(&["1.2.3.4", "1.2.3.5"]).unwrap();
/// assert_eq!(cidr.to_string(), "1.2.3.4/31");
/// ```
pub fn covering_cidr<S: AsRef<str>>(addresses: &[S]) -> Result<Ipv4, CidrError> {
    let values = addresses
        .iter()
        .map(|a| address_to_value(a.as_ref()))
        .collect::<Result<Vec<u32>, CidrError>>()?;
    covering_block(&values)
}

/// Smallest CIDR block containing every address value in `values`.
///
/// The prefix length is the number of leading bits shared by all values,
/// which is the number shared by the lowest and highest of them.
pub fn covering_block(values: &[u32]) -> Result<Ipv4, CidrError> {
    let (lo, hi) = match values.iter().minmax() {
        MinMaxResult::NoElements => return Err(CidrError::EmptyInput("covering_cidr")),
        MinMaxResult::OneElement(v) => (*v, *v),
        MinMaxResult::MinMax(lo, hi) => (*lo, *hi),
    };
    // Identical values give 32 leading zeros, i.e. a /32
    let mask = (lo ^ hi).leading_zeros() as u8;
    let prefix = lo & get_cidr_mask(mask)?;
    log::trace!(
        "covering_block lo={} hi={} => {}/{mask}",
        Ipv4Addr::from(lo),
        Ipv4Addr::from(hi),
        Ipv4Addr::from(prefix)
    );
    Ok(Ipv4 {
        addr: Ipv4Addr::from(prefix),
        mask,
    })
}

/// Smallest single CIDR block containing `range`.
pub fn covering_range(range: &AddrRange) -> Ipv4 {
    let mask = (range.lo ^ range.hi).leading_zeros() as u8;
    Ipv4 {
        addr: Ipv4Addr::from(range.lo),
        mask,
    }
    .normalized()
}

/// Split `range` into the fewest aligned CIDR blocks whose union is exactly `range`.
///
/// Each step takes the largest block that starts at the current address
/// (limited by its alignment) and does not run past the end of the range.
pub fn range_to_cidrs(range: &AddrRange) -> Vec<Ipv4> {
    let mut blocks = Vec::new();
    let end = u64::from(range.hi);
    let mut next = u64::from(range.lo);

    while next <= end {
        let addr = Ipv4Addr::from(next as u32);
        let remaining = end - next + 1;
        // floor(log2(remaining)) host bits fit without passing the end
        let fit_bits = (63 - remaining.leading_zeros()) as u8;
        let mask = lo_mask(addr).max(MAX_LENGTH - fit_bits.min(MAX_LENGTH));
        blocks.push(Ipv4 { addr, mask });
        next += 1u64 << (MAX_LENGTH - mask);
    }

    blocks
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn range_strategy() -> impl Strategy<Value = AddrRange> {
        (any::<u32>(), any::<u32>()).prop_map(|(a, b)| AddrRange {
            lo: a.min(b),
            hi: a.max(b),
        })
    }

    proptest! {
        /// Exact decomposition covers the range with adjacent, aligned blocks
        #[test]
        fn prop_range_to_cidrs_exact(range in range_strategy()) {
            let blocks = range_to_cidrs(&range);
            prop_assert!(!blocks.is_empty());
            prop_assert!(blocks.len() <= 62);
            prop_assert_eq!(blocks[0].lo_value(), range.lo);
            prop_assert_eq!(blocks[blocks.len() - 1].hi_value(), range.hi);
            for block in &blocks {
                prop_assert_eq!(block.normalized(), *block, "block {} not aligned", block);
            }
            for pair in blocks.windows(2) {
                prop_assert_eq!(u64::from(pair[0].hi_value()) + 1, u64::from(pair[1].lo_value()));
            }
        }

        /// The covering block contains every value and no shorter prefix would be needed
        #[test]
        fn prop_covering_block_contains(values in prop::collection::vec(any::<u32>(), 1..20)) {
            let block = covering_block(&values).unwrap();
            for v in &values {
                prop_assert!(block.range().contains(*v));
            }
            if block.mask < MAX_LENGTH {
                let half = Ipv4 { addr: block.addr, mask: block.mask + 1 };
                prop_assert!(!values.iter().all(|v| half.range().contains(*v)));
            }
        }
    }
}
