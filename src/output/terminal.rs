//! Aligned terminal table of consolidated CIDR blocks.

use crate::models::Ipv4;
use std::fmt::Display;

/// Column widths: row number, block, first address, last address, address count.
const WIDTHS: [usize; 5] = [7, 20, 17, 17, 12];

/// Quote `value` and right-align it to `width`. Longer values are not cut.
fn quoted<T: Display>(value: T, width: usize) -> String {
    format!("{:>width$}", format!("\"{value}\""))
}

/// One table line for block number `i` (zero based).
pub fn format_block_row(i: usize, block: &Ipv4) -> String {
    let range = block.normalized().range();
    let (first, last) = range.addresses();
    [
        quoted(i + 1, WIDTHS[0]),
        quoted(block.normalized(), WIDTHS[1]),
        quoted(first, WIDTHS[2]),
        quoted(last, WIDTHS[3]),
        quoted(range.size(), WIDTHS[4]),
    ]
    .join(",")
}

fn format_header() -> String {
    ["cnt", "cidr", "first", "last", "addresses"]
        .iter()
        .zip(WIDTHS)
        .map(|(name, width)| quoted(name, width))
        .collect::<Vec<String>>()
        .join(",")
}

/// Print consolidated blocks as a table to stdout.
pub fn print_blocks(blocks: &[Ipv4]) {
    println!("{}", format_header());
    for (i, block) in blocks.iter().enumerate() {
        println!("{}", format_block_row(i, block));
    }
}
