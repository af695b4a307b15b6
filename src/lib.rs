//! Registry inetnum ingestion and IPv4 CIDR consolidation.
//!
//! The [`processing`] module holds the CIDR range algebra; everything else
//! moves registry data in and out of it.

pub mod cli;
pub mod config;
pub mod error;
pub mod inetnum;
pub mod models;
pub mod output;
pub mod processing;
pub mod store;

pub use error::CidrError;

use cli::{ConsolidateArgs, ParseArgs};
use colored::Colorize;
use inetnum::{parse_inetnum, ParseOptions, ParseStats};
use output::{print_blocks, write_cidr_file, CsvSink, RecordSink, SqliteSink, SQLITE_TABLE};
use processing::{consolidate, ConsolidationReport, CoverMode};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use store::{read_cidr_files, CountryFilter};

/// Parse a registry dump into a CSV file, a SQLite file, or both.
pub fn run_parse(args: &ParseArgs) -> Result<ParseStats, Box<dyn Error>> {
    if args.csv.is_none() && args.sqlite.is_none() {
        return Err("Neither CSV nor SQLite file path provided. \
            Please provide a SQLite file path, a CSV file path, or both."
            .into());
    }
    let columns = args.columns.as_deref().map(config::parse_columns);
    if columns.as_ref().is_some_and(|c| c.is_empty()) {
        return Err("No columns selected".into());
    }
    let options = ParseOptions::new(columns, config::batch_size(args.batch_size)?);
    log::info!(
        "#Start parse {} batch_size={}",
        args.input.display(),
        options.batch_size
    );

    let input = File::open(&args.input)
        .map_err(|e| format!("Error opening {}: {e}", args.input.display()))?;

    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();
    if let Some(csv) = &args.csv {
        remove_existing(csv)?;
        log::info!("Writing CSV to {}", csv.display());
        sinks.push(Box::new(CsvSink::create(csv, &options.columns)?));
    }
    if let Some(sqlite) = &args.sqlite {
        remove_existing(sqlite)?;
        log::info!("Writing SQLite table {SQLITE_TABLE} to {}", sqlite.display());
        sinks.push(Box::new(SqliteSink::create(sqlite, &options.columns)?));
    }

    let stats = parse_inetnum(BufReader::new(input), &options, &mut sinks)?;
    if stats.records == 0 {
        // Header only, so the CSV is still readable as a table
        sinks.write_batch(&[])?;
    }
    Ok(stats)
}

/// Outputs are replaced, not appended to.
fn remove_existing(path: &Path) -> Result<(), Box<dyn Error>> {
    if path.is_file() {
        log::warn!("Replacing existing file {}", path.display());
        std::fs::remove_file(path)
            .map_err(|e| format!("Error removing {}: {e}", path.display()))?;
    }
    Ok(())
}

/// Read, filter and consolidate CIDRs from parsed CSV files, then write the result.
pub fn run_consolidate(args: &ConsolidateArgs) -> Result<ConsolidationReport, Box<dyn Error>> {
    let filter = args
        .country_codes
        .as_deref()
        .map(CountryFilter::parse)
        .unwrap_or_default();
    let input_files: Vec<PathBuf> = args.input_files.iter().map(|p| trim_path(p)).collect();

    let cidrs = read_cidr_files(&input_files, &filter)?;
    println!(
        "Found {} CIDRs for country codes {}",
        cidrs.len(),
        filter.codes().join(", ")
    );

    if cidrs.is_empty() {
        log::warn!("{} No CIDRs matched, writing an empty output file", "NOTE".on_red());
        write_cidr_file(&args.output, &[])?;
        let report = ConsolidationReport::default();
        write_report(args.stats_json.as_deref(), &report)?;
        return Ok(report);
    }

    let mode = if args.exact {
        CoverMode::Exact
    } else {
        CoverMode::Covering
    };
    let consolidation = consolidate(&cidrs, mode)?;
    println!(
        "Reduced to {} IP CIDRs from {} original IP CIDRs",
        consolidation.cidrs.len(),
        cidrs.len()
    );

    write_cidr_file(&args.output, &consolidation.cidrs)?;
    if args.print {
        print_blocks(&consolidation.cidrs);
    }
    write_report(args.stats_json.as_deref(), &consolidation.report)?;
    Ok(consolidation.report)
}

fn write_report(path: Option<&Path>, report: &ConsolidationReport) -> Result<(), Box<dyn Error>> {
    if let Some(path) = path {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| format!("Error serializing JSON: {e}"))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Error writing stats file {}: {e}", path.display()))?;
        log::info!("Wrote consolidation stats to {}", path.display());
    }
    Ok(())
}

/// Strip spaces left around comma separated file names.
fn trim_path(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().trim())
}
