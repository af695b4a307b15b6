//! IPv4 address and CIDR notation utilities.
//!
//! Addresses are handled either as [`Ipv4Addr`] or as their `u32` value
//! (most significant octet in the highest bits). [`Ipv4`] is a prefix plus
//! mask length and derives its inclusive value range.

use super::AddrRange;
use crate::error::CidrError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a dotted-quad address to its 32-bit value.
///
/// Each of the four octets is a decimal number from 0 to 255. Leading zeros
/// are accepted, so `"192.168.001.010"` is `192.168.1.10`.
///
/// # Examples
/// ```
/// use inetnum_cidr_summary::models::address_to_value;
/// assert_eq!(address_to_value("192.168.1.0").unwrap(), 3232235776);
/// assert_eq!(address_to_value("192.168.001.010").unwrap(), 3232235786);
/// ```
pub fn address_to_value(address: &str) -> Result<u32, CidrError> {
    let invalid = || CidrError::Format(format!("Invalid address '{address}'"));
    let octets: Vec<&str> = address.trim().split('.').collect();
    if octets.len() != 4 {
        return Err(invalid());
    }
    octets.iter().try_fold(0u32, |value, octet| {
        if octet.is_empty() || !octet.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let octet: u8 = octet.parse().map_err(|_| invalid())?;
        Ok((value << 8) | u32::from(octet))
    })
}

/// Convert a 32-bit value back to dotted-quad form.
pub fn value_to_address(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// Leading one-bits for a prefix length, clamped to [`MAX_LENGTH`].
fn prefix_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use inetnum_cidr_summary::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, CidrError> {
    if len > MAX_LENGTH {
        Err(CidrError::Format(format!("Network length /{len} is too long")))
    } else {
        Ok(prefix_bits(len))
    }
}

/// Value of the lowest address in `prefix/mask`. Host bits of the prefix are cleared.
pub fn min_value(prefix: &str, mask: u8) -> Result<u32, CidrError> {
    Ok(address_to_value(prefix)? & get_cidr_mask(mask)?)
}

/// Value of the highest address of a block starting at `min` with length `mask`.
pub fn max_value(min: u32, mask: u8) -> Result<u32, CidrError> {
    let host_bits = !get_cidr_mask(mask)?;
    min.checked_add(host_bits).ok_or_else(|| {
        CidrError::Format(format!(
            "Block {}/{mask} runs past 255.255.255.255",
            value_to_address(min)
        ))
    })
}

/// Value range `(low, high)` of a CIDR string such as `"10.0.0.0/8"`.
pub fn to_range(cidr: &str) -> Result<(u32, u32), CidrError> {
    let range = Ipv4::new(cidr)?.range();
    Ok((range.lo, range.hi))
}

/// Lowest and highest address of a CIDR string, in dotted-quad form.
pub fn to_address_pair(cidr: &str) -> Result<(String, String), CidrError> {
    let (lo, hi) = to_range(cidr)?;
    Ok((value_to_address(lo), value_to_address(hi)))
}

/// True if `address` lies inside `cidr`.
pub fn is_ip_in_cidr(address: &str, cidr: &str) -> Result<bool, CidrError> {
    let value = address_to_value(address)?;
    Ok(Ipv4::new(cidr)?.range().contains(value))
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
///
/// `0.0.0.0` has no set bits and can start any block, so it maps to `/0`.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros() as u8;
    MAX_LENGTH - trailing_zeros
}

/// IPv4 prefix with CIDR mask length.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The prefix address. Host bits are not required to be zero.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, CidrError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| CidrError::Format(format!("Missing '/' in CIDR '{addr_cidr}'")))?;
        let addr = Ipv4Addr::from(address_to_value(addr)?);
        if mask.is_empty() || !mask.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CidrError::Format(format!(
                "Invalid mask '{mask}' in CIDR '{addr_cidr}'"
            )));
        }
        let mask: u8 = mask
            .parse()
            .map_err(|_| CidrError::Format(format!("Invalid mask '{mask}' in CIDR '{addr_cidr}'")))?;
        if mask > MAX_LENGTH {
            return Err(CidrError::Format(format!(
                "Mask /{mask} is too long in CIDR '{addr_cidr}'"
            )));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Value of the lowest (network) address in the block.
    pub fn lo_value(&self) -> u32 {
        u32::from(self.addr) & prefix_bits(self.mask)
    }

    /// Value of the highest (broadcast) address in the block.
    pub fn hi_value(&self) -> u32 {
        self.lo_value() | !prefix_bits(self.mask)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.lo_value())
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.hi_value())
    }

    /// Inclusive value range covered by this block.
    pub fn range(&self) -> AddrRange {
        AddrRange {
            lo: self.lo_value(),
            hi: self.hi_value(),
        }
    }

    /// Same block with host bits cleared.
    pub fn normalized(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.range().contains(u32::from(addr))
    }
}

impl FromStr for Ipv4 {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_to_value() {
        assert_eq!(address_to_value("0.0.0.0").unwrap(), 0);
        assert_eq!(address_to_value("0.0.1.0").unwrap(), 256);
        assert_eq!(address_to_value("10.0.0.5").unwrap(), 167772165);
        assert_eq!(address_to_value("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(address_to_value(" 1.2.3.4 ").unwrap(), 0x01020304);
    }

    #[test]
    fn test_address_to_value_leading_zeros() {
        assert_eq!(address_to_value("192.168.001.010").unwrap(), 3232235786);
        assert_eq!(address_to_value("010.000.000.001").unwrap(), 167772161);
        assert_eq!(to_range("010.0.0.0/8").unwrap(), to_range("10.0.0.0/8").unwrap());
        assert_eq!(Ipv4::new("010.0.0.0/8").unwrap().to_string(), "10.0.0.0/8");
        assert!(address_to_value("1.2.3.0256").is_err());
    }

    #[test]
    fn test_address_to_value_malformed() {
        for bad in ["", "1.2.3", "1.2.3.4.5", "1.2.3.256", "a.b.c.d", "1.2.3.-4", "1.2.3.+4", "1..3.4", "1.2.3.4."] {
            assert!(
                matches!(address_to_value(bad), Err(CidrError::Format(_))),
                "Expected format error for '{bad}'"
            );
        }
    }

    #[test]
    fn test_value_to_address() {
        assert_eq!(value_to_address(0), "0.0.0.0");
        assert_eq!(value_to_address(3232235776), "192.168.1.0");
        assert_eq!(value_to_address(u32::MAX), "255.255.255.255");
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_min_max_value() {
        assert_eq!(min_value("192.168.1.42", 24).unwrap(), 3232235776);
        assert_eq!(min_value("192.168.1.42", 0).unwrap(), 0);
        assert_eq!(min_value("192.168.1.42", 32).unwrap(), 3232235818);
        assert_eq!(max_value(3232235776, 24).unwrap(), 3232236031);
        assert_eq!(max_value(0, 0).unwrap(), u32::MAX);
        assert_eq!(max_value(167772165, 32).unwrap(), 167772165);
        assert!(max_value(u32::MAX, 24).is_err());
        assert!(max_value(0, 33).is_err());
    }

    #[test]
    fn test_to_range() {
        assert_eq!(to_range("0.0.0.0/0").unwrap(), (0, 4294967295));
        assert_eq!(
            to_range("192.168.1.0/24").unwrap(),
            (3232235776, 3232236031)
        );
        assert_eq!(to_range("10.0.0.5/32").unwrap(), (167772165, 167772165));
        // Host bits in the prefix are masked off
        assert_eq!(to_range("210.105.44.170/21").unwrap(), to_range("210.105.40.0/21").unwrap());
    }

    #[test]
    fn test_to_range_malformed() {
        for bad in ["10.0.0.0", "10.0.0.0/33", "10.0.0.0/", "10.0.0/8", "10.0.0.0/+8", "10.0.0.0/8/8"] {
            assert!(
                matches!(to_range(bad), Err(CidrError::Format(_))),
                "Expected format error for '{bad}'"
            );
        }
    }

    #[test]
    fn test_to_address_pair() {
        assert_eq!(
            to_address_pair("210.105.44.170/21").unwrap(),
            ("210.105.40.0".to_string(), "210.105.47.255".to_string())
        );
        assert_eq!(
            to_address_pair("0.0.0.0/0").unwrap(),
            ("0.0.0.0".to_string(), "255.255.255.255".to_string())
        );
    }

    #[test]
    fn test_is_ip_in_cidr() {
        assert!(is_ip_in_cidr("210.105.41.0", "210.105.44.170/21").unwrap());
        assert!(!is_ip_in_cidr("210.105.48.0", "210.105.44.170/21").unwrap());
        assert!(is_ip_in_cidr("255.255.255.255", "0.0.0.0/0").unwrap());
    }

    #[test]
    fn test_lo_mask() {
        assert_eq!(lo_mask(Ipv4Addr::new(192, 168, 1, 1)), 32);
        assert_eq!(lo_mask(Ipv4Addr::new(192, 168, 1, 0)), 24);
        assert_eq!(lo_mask(Ipv4Addr::new(0, 0, 0, 0)), 0);
    }

    #[test]
    fn test_ip4_cmp_overlap() {
        let ip1 = Ipv4::new("10.0.10.0/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.0/8").unwrap();
        let ip3 = Ipv4::new("10.0.10.64/26").unwrap();

        assert!(ip1 > ip2);
        assert!(ip1 < ip3);
        assert!(ip2.lo() < ip1.lo());
        assert!(ip2.hi() > ip3.hi());
        assert_eq!(ip2.hi(), Ipv4Addr::new(10, 255, 255, 255));
        assert!(ip2.contains(ip3.addr));
        assert!(!ip1.contains(Ipv4Addr::new(10, 0, 11, 0)));
    }

    #[test]
    fn test_ipv4_normalized() {
        let ip = Ipv4::new("210.105.44.170/21").unwrap();
        assert_eq!(ip.normalized().to_string(), "210.105.40.0/21");
        assert_eq!(ip.to_string(), "210.105.44.170/21");
    }

    #[test]
    fn test_ipv4_serde() {
        let ip: Ipv4 = serde_json::from_str("\"10.1.0.0/16\"").unwrap();
        assert_eq!(ip, "10.1.0.0/16".parse().unwrap());
        assert_eq!(serde_json::to_string(&ip).unwrap(), "\"10.1.0.0/16\"");
        assert!(serde_json::from_str::<Ipv4>("\"10.1.0.0/40\"").is_err());
    }
}
