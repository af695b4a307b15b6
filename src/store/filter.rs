//! Country code filtering of CSV rows.

use crate::config::{COUNTRY_COLUMN, IP_CIDR_COLUMN};
use super::csv::{read_csv, CsvTable};
use colored::Colorize;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Country codes to keep. An empty filter keeps every row.
///
/// Registry data mixes casings, so each code matches its upper and lower case form.
/// Codes keep the order they were given in, upper case form first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountryFilter {
    codes: Vec<String>,
}

impl CountryFilter {
    pub fn new<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut cased: Vec<String> = Vec::new();
        for code in codes.iter().map(|c| c.as_ref().trim()).filter(|c| !c.is_empty()) {
            for form in [code.to_uppercase(), code.to_lowercase()] {
                if !cased.contains(&form) {
                    cased.push(form);
                }
            }
        }
        CountryFilter { codes: cased }
    }

    /// Parse a comma separated list such as `"cn,RU"`.
    pub fn parse(codes: &str) -> Self {
        let codes: Vec<&str> = codes.split(',').collect();
        CountryFilter::new(&codes)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn matches(&self, country: &str) -> bool {
        let country = country.trim();
        self.is_empty() || self.codes.iter().any(|c| c == country)
    }

    /// The cased codes, in input order.
    pub fn codes(&self) -> Vec<&str> {
        self.codes.iter().map(|c| c.as_str()).collect()
    }
}

/// CIDR values from the `ip_cidr` column of rows whose country passes `filter`.
///
/// Rows with an empty `ip_cidr` are skipped.
pub fn select_cidrs(table: &CsvTable, filter: &CountryFilter) -> Result<Vec<String>, Box<dyn Error>> {
    let cidr_column = table
        .column_index(IP_CIDR_COLUMN)
        .ok_or_else(|| format!("CSV has no '{IP_CIDR_COLUMN}' column"))?;
    let country_column = match table.column_index(COUNTRY_COLUMN) {
        Some(i) => Some(i),
        None if filter.is_empty() => None,
        None => return Err(format!("CSV has no '{COUNTRY_COLUMN}' column to filter on").into()),
    };

    let mut empty = 0;
    let cidrs: Vec<String> = table
        .rows
        .iter()
        .filter(|row| country_column.map_or(true, |i| filter.matches(table.value(row, i))))
        .filter_map(|row| {
            let cidr = table.value(row, cidr_column).trim();
            if cidr.is_empty() {
                empty += 1;
                None
            } else {
                Some(cidr.to_string())
            }
        })
        .collect();

    if empty > 0 {
        log::warn!("{} {empty} rows with an empty '{IP_CIDR_COLUMN}'", "Skipped".yellow());
    }
    Ok(cidrs)
}

/// Read `path` and return its filtered CIDRs.
pub fn read_cidrs(path: &Path, filter: &CountryFilter) -> Result<Vec<String>, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("Error opening {}: {e}", path.display()))?;
    let table = read_csv(BufReader::new(file))
        .map_err(|e| format!("Error reading CSV {}: {e}", path.display()))?;
    let cidrs = select_cidrs(&table, filter)
        .map_err(|e| format!("Error in CSV {}: {e}", path.display()))?;
    log::info!(
        "Read {} of {} rows from {}",
        cidrs.len(),
        table.rows.len(),
        path.display()
    );
    Ok(cidrs)
}

/// Read and concatenate the filtered CIDRs of several files, in order.
pub fn read_cidr_files<P: AsRef<Path>>(
    paths: &[P],
    filter: &CountryFilter,
) -> Result<Vec<String>, Box<dyn Error>> {
    let mut cidrs = Vec::new();
    for path in paths {
        cidrs.extend(read_cidrs(path.as_ref(), filter)?);
    }
    Ok(cidrs)
}
