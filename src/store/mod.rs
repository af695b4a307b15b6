//! Record store input.
//!
//! - [`csv`] - CSV reading
//! - [`filter`] - Country filtering and `ip_cidr` selection

mod csv;
mod filter;

pub use csv::{parse_csv, read_csv, CsvTable};
pub use filter::{read_cidr_files, read_cidrs, select_cidrs, CountryFilter};
