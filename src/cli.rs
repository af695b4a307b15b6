//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inetnum-cidr-summary")]
#[command(author, version, about = "Flatten registry inetnum dumps and consolidate their IPv4 CIDRs")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose mode (debug output, ignores log4rs.yml)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a <zone>.db.inetnum file into a CSV file, a SQLite file, or both
    Parse(ParseArgs),

    /// Consolidate overlapping CIDRs from parsed CSV files into one list
    Consolidate(ConsolidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Path to the <zone>.db.inetnum file, e.g. apnic.db.inetnum
    #[arg(short = 'i', long = "db-inetnum-file-path")]
    pub input: PathBuf,

    /// Path to the output CSV file. Replaced if it exists.
    #[arg(short = 'c', long = "output-csv-file-path")]
    pub csv: Option<PathBuf>,

    /// Path to the output SQLite file, records go to its "Data" table. Replaced if it exists.
    #[arg(short = 's', long = "output-sqlite-file-path")]
    pub sqlite: Option<PathBuf>,

    /// Columns to include, separated by commas (default: all registry columns)
    #[arg(long)]
    pub columns: Option<String>,

    /// Records written per batch (default: $INETNUM_BATCH_SIZE or 500000)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ConsolidateArgs {
    /// Input CSV files with an "ip_cidr" column, separated by commas
    #[arg(short = 'i', long = "input-files", value_delimiter = ',', required = true)]
    pub input_files: Vec<PathBuf>,

    /// Country codes to keep, separated by commas, e.g. "cn,RU"
    #[arg(short = 'c', long = "country-codes")]
    pub country_codes: Option<String>,

    /// Output file, one consolidated CIDR per line
    #[arg(short = 'o', long = "output-file")]
    pub output: PathBuf,

    /// Emit exact CIDR lists instead of one covering block per merged range
    #[arg(long)]
    pub exact: bool,

    /// Write stage counts as JSON to this file
    #[arg(long)]
    pub stats_json: Option<PathBuf>,

    /// Print the consolidated blocks as a table
    #[arg(long)]
    pub print: bool,
}
