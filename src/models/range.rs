//! Inclusive address value ranges.

use super::ipv4::value_to_address;
use crate::error::CidrError;
use serde::Serialize;
use std::fmt;

/// All addresses in `[lo, hi]`, stored as 32-bit values.
///
/// Ordering is by `lo` first, then `hi`, on the integer values.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddrRange {
    pub lo: u32,
    pub hi: u32,
}

impl AddrRange {
    pub fn new(lo: u32, hi: u32) -> Result<AddrRange, CidrError> {
        if lo > hi {
            return Err(CidrError::Format(format!(
                "Range start {} is after end {}",
                value_to_address(lo),
                value_to_address(hi)
            )));
        }
        Ok(AddrRange { lo, hi })
    }

    /// Closed-interval intersection test. Ranges with a one-value gap do not overlap.
    pub fn overlaps(&self, other: &AddrRange) -> bool {
        self.hi >= other.lo && other.hi >= self.lo
    }

    /// Overlapping, or adjacent with no address between them.
    pub fn touches(&self, other: &AddrRange) -> bool {
        self.hi.saturating_add(1) >= other.lo && other.hi.saturating_add(1) >= self.lo
    }

    /// Smallest range containing both.
    pub fn combine(&self, other: &AddrRange) -> AddrRange {
        AddrRange {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Number of addresses, 1 to 2^32.
    pub fn size(&self) -> u64 {
        u64::from(self.hi) - u64::from(self.lo) + 1
    }

    /// Endpoints in dotted-quad form.
    pub fn addresses(&self) -> (String, String) {
        (value_to_address(self.lo), value_to_address(self.hi))
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = self.addresses();
        write!(f, "{lo} - {hi}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_reversed() {
        assert!(AddrRange::new(5, 4).is_err());
        assert_eq!(AddrRange::new(4, 4).unwrap().size(), 1);
    }

    #[test]
    fn test_overlaps() {
        let a = AddrRange { lo: 10, hi: 20 };
        assert!(a.overlaps(&AddrRange { lo: 20, hi: 30 }), "shared endpoint");
        assert!(a.overlaps(&AddrRange { lo: 0, hi: 10 }), "shared endpoint");
        assert!(a.overlaps(&AddrRange { lo: 12, hi: 13 }), "contained");
        assert!(a.overlaps(&AddrRange { lo: 0, hi: 100 }), "containing");
        assert!(!a.overlaps(&AddrRange { lo: 21, hi: 30 }), "adjacent, no overlap");
        assert!(!a.overlaps(&AddrRange { lo: 0, hi: 9 }), "adjacent, no overlap");
    }

    #[test]
    fn test_touches() {
        let a = AddrRange { lo: 10, hi: 20 };
        assert!(a.touches(&AddrRange { lo: 21, hi: 30 }));
        assert!(a.touches(&AddrRange { lo: 0, hi: 9 }));
        assert!(a.touches(&AddrRange { lo: 15, hi: 16 }));
        assert!(!a.touches(&AddrRange { lo: 22, hi: 30 }), "one-value gap");
        assert!(!a.touches(&AddrRange { lo: 0, hi: 8 }), "one-value gap");
        let top = AddrRange { lo: u32::MAX, hi: u32::MAX };
        assert!(top.touches(&AddrRange { lo: u32::MAX - 1, hi: u32::MAX - 1 }));
        assert!(!top.touches(&AddrRange { lo: 0, hi: 0 }));
    }

    #[test]
    fn test_combine() {
        let a = AddrRange { lo: 10, hi: 20 };
        let b = AddrRange { lo: 15, hi: 40 };
        assert_eq!(a.combine(&b), AddrRange { lo: 10, hi: 40 });
        assert_eq!(b.combine(&a), AddrRange { lo: 10, hi: 40 });
    }

    #[test]
    fn test_size_full_space() {
        let all = AddrRange { lo: 0, hi: u32::MAX };
        assert_eq!(all.size(), 1u64 << 32);
    }

    #[test]
    fn test_display() {
        let r = AddrRange {
            lo: 3232235776,
            hi: 3232236031,
        };
        assert_eq!(r.to_string(), "192.168.1.0 - 192.168.1.255");
    }
}
