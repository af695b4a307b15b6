//! Domain models for registry CIDR consolidation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 prefix with CIDR mask, plus address/value conversions
//! - [`AddrRange`] - Inclusive range of address values
//! - [`InetnumRecord`] - One record parsed from a registry dump

mod ipv4;
mod range;
mod record;

// Re-export public types
pub use ipv4::{
    address_to_value, get_cidr_mask, is_ip_in_cidr, lo_mask, max_value, min_value,
    to_address_pair, to_range, value_to_address, Ipv4, MAX_LENGTH,
};
pub use range::AddrRange;
pub use record::InetnumRecord;
