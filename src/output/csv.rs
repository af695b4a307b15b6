//! CSV output for parsed registry records.

use super::RecordSink;
use crate::models::InetnumRecord;
use std::collections::BTreeSet;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Quote a CSV field if needed.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains([',', '"', '\n', '\r']) {
        // Enclose in double quotes and escape any double quotes within the field.
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}

/// Writes records as CSV rows, one column per selected field.
///
/// The header is written before the first batch. Columns are in sorted order
/// and record keys outside them are not written.
pub struct CsvSink<W: Write> {
    writer: W,
    columns: Vec<String>,
    header_written: bool,
    rows: usize,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) `path` and write records to it.
    pub fn create(path: &Path, columns: &BTreeSet<String>) -> Result<Self, Box<dyn Error>> {
        let file = File::create(path)
            .map_err(|e| format!("Error creating CSV file {}: {e}", path.display()))?;
        Ok(CsvSink::new(BufWriter::new(file), columns))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, columns: &BTreeSet<String>) -> Self {
        CsvSink {
            writer,
            columns: columns.iter().cloned().collect(),
            header_written: false,
            rows: 0,
        }
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> Result<(), Box<dyn Error>> {
        let header = self
            .columns
            .iter()
            .map(|c| escape_csv_field(c))
            .collect::<Vec<String>>()
            .join(",");
        writeln!(self.writer, "{header}")?;
        self.header_written = true;
        Ok(())
    }

    fn write_record(&mut self, record: &InetnumRecord) -> Result<(), Box<dyn Error>> {
        let row = self
            .columns
            .iter()
            .map(|c| record.get(c).map(|v| escape_csv_field(v.trim())).unwrap_or_default())
            .collect::<Vec<String>>()
            .join(",");
        writeln!(self.writer, "{row}")?;
        self.rows += 1;
        Ok(())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_batch(&mut self, records: &[InetnumRecord]) -> Result<(), Box<dyn Error>> {
        if !self.header_written {
            self.write_header()?;
        }
        for record in records {
            self.write_record(record)?;
        }
        self.writer.flush()?;
        log::debug!("Wrote batch of {} records, {} total", records.len(), self.rows);
        Ok(())
    }
}
