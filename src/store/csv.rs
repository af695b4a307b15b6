//! Reading the tabular CSV produced by the dump parser.

use std::error::Error;
use std::io::Read;
use std::mem::take;

/// A parsed CSV file: header row plus data rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }

    /// Value of `column` in `row`. Short rows read as empty.
    pub fn value<'a>(&self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(|v| v.as_str()).unwrap_or("")
    }
}

/// Split CSV text into rows of fields.
///
/// Handles quoted fields with doubled quotes and embedded newlines. Blank
/// lines are skipped.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line_no = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line_no += 1;
        }
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(take(&mut field));
                push_row(&mut rows, take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(format!("Unterminated quoted field at end of input (line {line_no})").into());
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }
    Ok(rows)
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}

/// Read a whole CSV document. The first row is the header.
pub fn read_csv<R: Read>(mut reader: R) -> Result<CsvTable, Box<dyn Error>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    let mut rows = parse_csv(&text)?.into_iter();
    let header = rows.next().ok_or("CSV input has no header row")?;
    Ok(CsvTable {
        header,
        rows: rows.collect(),
    })
}
