//! Output formatting for records and consolidated CIDRs.
//!
//! This module handles writing results:
//! - [`sink`] - The record sink trait
//! - [`csv`] - CSV sink for parsed registry records
//! - [`sqlite`] - SQLite sink for parsed registry records
//! - [`cidr_list`] - One CIDR per line
//! - [`terminal`] - Aligned terminal tables

mod cidr_list;
mod csv;
mod sink;
mod sqlite;
mod terminal;

pub use cidr_list::{write_cidr_file, write_cidrs};
pub use csv::{escape_csv_field, CsvSink};
pub use sink::RecordSink;
pub use sqlite::{SqliteSink, SQLITE_TABLE};
pub use terminal::{format_block_row, print_blocks};
