//! CIDR range algebra and consolidation.
//!
//! This module contains the algorithms that work on address values:
//! - [`cover`] - Covering CIDR for a set of addresses, and exact range decomposition
//! - [`merge`] - Sweep-line merge of address ranges
//! - [`consolidate`] - CIDR strings in, consolidated CIDR blocks out

mod consolidate;
mod cover;
mod merge;

// Re-export public functions
pub use consolidate::{
    consolidate, consolidate_ip_cidrs, Consolidation, ConsolidationReport, CoverMode,
};
pub use cover::{covering_block, covering_cidr, covering_range, range_to_cidrs};
pub use merge::merge_ranges;
