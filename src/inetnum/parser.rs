//! Registry "inetnum" dump parser.
//!
//! A dump is a sequence of records separated by blank lines. Each record is
//! a list of `key: value` lines, where a line that is not a key line
//! continues the value of the previous key. `#` and `%` lines are comments.

use crate::config::{default_columns, INETNUM_COLUMN, IP_CIDR_COLUMN};
use crate::models::InetnumRecord;
use crate::output::RecordSink;
use crate::processing::covering_cidr;
use colored::Colorize;
use regex::Regex;
use std::collections::BTreeSet;
use std::error::Error;
use std::io::BufRead;
use std::sync::OnceLock;

/// Regex matching a `key: value` line.
static KEY_VALUE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_key_value_regex() -> &'static Regex {
    KEY_VALUE_REGEX
        .get_or_init(|| Regex::new(r"^([a-zA-Z0-9\-]+):(.*)").expect("Invalid Regex"))
}

/// Which columns to keep and how many records to hand to the sink at once.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Columns the sink writes.
    pub columns: BTreeSet<String>,
    /// Drop keys outside `columns` while reading. Otherwise every key is kept
    /// and records carrying other keys are reported when finished.
    pub restrict_keys: bool,
    pub batch_size: usize,
}

impl ParseOptions {
    /// Keep `columns` only when given, else the default registry columns.
    pub fn new(columns: Option<BTreeSet<String>>, batch_size: usize) -> Self {
        let restrict_keys = columns.is_some();
        ParseOptions {
            columns: columns.unwrap_or_else(default_columns),
            restrict_keys,
            batch_size,
        }
    }

    fn keeps(&self, key: &str) -> bool {
        !self.restrict_keys || self.columns.contains(key)
    }
}

/// Counts from one parse run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStats {
    /// Records written to the sink.
    pub records: usize,
    /// Lines read, including comments and blank lines.
    pub lines: usize,
    /// `inetnum` values that could not be turned into a CIDR.
    pub bad_inetnum: usize,
}

/// Derive the covering CIDR of an `inetnum` value such as `"1.0.0.0 - 1.0.0.255"`.
pub fn inetnum_to_cidr(value: &str) -> Result<String, Box<dyn Error>> {
    let addresses: Vec<&str> = value.split(" - ").collect();
    Ok(covering_cidr(&addresses)?.to_string())
}

/// Parser state for the record being built.
struct RecordBuilder<'a> {
    options: &'a ParseOptions,
    record: InetnumRecord,
    /// Last key seen and whether it is kept.
    current_key: Option<(String, bool)>,
    bad_inetnum: usize,
}

impl<'a> RecordBuilder<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        RecordBuilder {
            options,
            record: InetnumRecord::new(1),
            current_key: None,
            bad_inetnum: 0,
        }
    }

    /// Take the finished record, if it has any data, and start a new one.
    fn finish(&mut self, next_line_no: usize) -> Option<InetnumRecord> {
        self.current_key = None;
        let record = std::mem::replace(&mut self.record, InetnumRecord::new(next_line_no));
        if record.is_empty() {
            return None;
        }
        self.report_unrecognized(&record);
        Some(record)
    }

    fn report_unrecognized(&self, record: &InetnumRecord) {
        let unrecognized: Vec<&str> = record
            .fields
            .keys()
            .filter(|k| !self.options.columns.contains(*k))
            .map(|k| k.as_str())
            .collect();
        if !unrecognized.is_empty() {
            log::warn!(
                "{} column(s) in record at line {}: {}. These columns will be discarded from this record.",
                "Unrecognized".yellow(),
                record.line_no,
                unrecognized.join(", ")
            );
        }
    }

    fn add_line(&mut self, line: &str, line_no: usize) {
        if self.record.is_empty() && self.current_key.is_none() {
            self.record.line_no = line_no;
        }

        if let Some(caps) = get_key_value_regex().captures(line) {
            let key = &caps[1];
            let value = &caps[2];
            let kept = self.options.keeps(key);

            if key == INETNUM_COLUMN && self.options.columns.contains(IP_CIDR_COLUMN) {
                self.set_ip_cidr(value, line_no);
            }
            if kept {
                self.record.append(key, value);
            }
            self.current_key = Some((key.to_string(), kept));
            return;
        }

        match &self.current_key {
            Some((key, true)) => self.record.append(key, line),
            Some((_, false)) => {}
            None => log::warn!(
                "Line {line_no}: continuation line without a key, ignored: {}",
                line.yellow()
            ),
        }
    }

    fn set_ip_cidr(&mut self, value: &str, line_no: usize) {
        match inetnum_to_cidr(value) {
            Ok(cidr) => self.record.set(IP_CIDR_COLUMN, cidr),
            Err(e) => {
                self.bad_inetnum += 1;
                log::warn!(
                    "Line {line_no}: {} inetnum '{}': {e}",
                    "Skipping".yellow(),
                    value.trim()
                );
                self.record.fields.remove(IP_CIDR_COLUMN);
            }
        }
    }
}

/// Parse a registry dump from `reader`, handing records to `sink` in batches.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn parse_inetnum<R: BufRead, S: RecordSink>(
    mut reader: R,
    options: &ParseOptions,
    sink: &mut S,
) -> Result<ParseStats, Box<dyn Error>> {
    if options.batch_size == 0 {
        return Err("Batch size must be greater than 0".into());
    }

    let mut stats = ParseStats::default();
    let mut builder = RecordBuilder::new(options);
    let mut records: Vec<InetnumRecord> = Vec::new();
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| format!("Error reading line {}: {e}", stats.lines + 1))?;
        if read == 0 {
            break;
        }
        stats.lines += 1;
        let line_no = stats.lines;
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end();

        if line.starts_with('#') || line.starts_with('%') {
            continue;
        }

        if line.trim().is_empty() {
            if let Some(record) = builder.finish(line_no + 1) {
                records.push(record);
            }
            if records.len() == options.batch_size {
                sink.write_batch(&records)?;
                stats.records += records.len();
                log::info!("Saved batch, {} records so far", stats.records);
                records.clear();
            }
            continue;
        }

        builder.add_line(line, line_no);
    }

    if let Some(record) = builder.finish(stats.lines + 1) {
        records.push(record);
    }
    if !records.is_empty() {
        sink.write_batch(&records)?;
        stats.records += records.len();
    }
    stats.bad_inetnum = builder.bad_inetnum;

    log::info!(
        "Parsed {} records from {} lines ({} bad inetnum)",
        stats.records,
        stats.lines,
        stats.bad_inetnum
    );
    Ok(stats)
}
