//! CIDR consolidation pipeline.
//!
//! CIDR strings are turned into value ranges, merged, and re-expressed as
//! CIDR blocks.

use super::cover::{covering_range, range_to_cidrs};
use super::merge::merge_ranges;
use crate::error::CidrError;
use crate::models::{AddrRange, Ipv4};
use colored::Colorize;
use serde::Serialize;

/// How a merged range is turned back into CIDR blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoverMode {
    /// One covering block per merged range. May include addresses outside the range.
    #[default]
    Covering,
    /// Exact list of aligned blocks per merged range.
    Exact,
}

/// Counts observed at each pipeline stage.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    pub input_cidrs: usize,
    pub ranges: usize,
    pub merged_ranges: usize,
    pub output_cidrs: usize,
}

/// Result of [`consolidate`]: sorted, non-overlapping blocks plus stage counts.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub cidrs: Vec<Ipv4>,
    pub report: ConsolidationReport,
}

impl Consolidation {
    pub fn cidr_strings(&self) -> Vec<String> {
        self.cidrs.iter().map(|c| c.to_string()).collect()
    }
}

/// Reduce `cidrs` to sorted, non-overlapping blocks covering their union.
///
/// Fails on the first malformed CIDR, or if `cidrs` is empty.
pub fn consolidate<S: AsRef<str>>(cidrs: &[S], mode: CoverMode) -> Result<Consolidation, CidrError> {
    if cidrs.is_empty() {
        return Err(CidrError::EmptyInput("consolidate"));
    }

    let ranges = cidrs
        .iter()
        .map(|c| Ipv4::new(c.as_ref()).map(|ip| ip.range()))
        .collect::<Result<Vec<AddrRange>, CidrError>>()?;
    log::info!(
        "Converted {} IP CIDRs to {} IP ranges",
        cidrs.len().to_string().green(),
        ranges.len().to_string().green()
    );
    let range_count = ranges.len();

    let merged = merge_ranges(ranges);
    log::info!(
        "Merged {} IP ranges into {} non-overlapping ranges",
        range_count.to_string().green(),
        merged.len().to_string().green()
    );

    let blocks = match mode {
        CoverMode::Covering => drop_nested(merged.iter().map(covering_range).collect()),
        CoverMode::Exact => merged.iter().flat_map(range_to_cidrs).collect(),
    };
    log::info!(
        "Re-expressed {} ranges as {} CIDR blocks ({mode:?})",
        merged.len(),
        blocks.len().to_string().green()
    );

    let report = ConsolidationReport {
        input_cidrs: cidrs.len(),
        ranges: range_count,
        merged_ranges: merged.len(),
        output_cidrs: blocks.len(),
    };
    Ok(Consolidation {
        cidrs: blocks,
        report,
    })
}

/// Consolidate with single covering blocks and return CIDR strings.
pub fn consolidate_ip_cidrs<S: AsRef<str>>(cidrs: &[S]) -> Result<Vec<String>, CidrError> {
    Ok(consolidate(cidrs, CoverMode::Covering)?.cidr_strings())
}

/// Drop blocks contained in another block.
///
/// Covering blocks can reach past their range into a neighbour's block.
/// Two CIDR blocks are either disjoint or nested, so after sorting by start
/// and then by size (largest first) a block overlaps an earlier one only
/// when the last kept block contains it.
fn drop_nested(mut blocks: Vec<Ipv4>) -> Vec<Ipv4> {
    blocks.sort_by_key(|b| (b.lo_value(), b.mask));
    let mut kept: Vec<Ipv4> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match kept.last() {
            Some(last) if last.range().contains(block.lo_value()) => {
                log::debug!(
                    "{} {block} is inside covering block {last}",
                    "Dropping".yellow()
                );
            }
            _ => kept.push(block),
        }
    }
    kept
}
