//! SQLite output for parsed registry records.

use super::RecordSink;
use crate::models::InetnumRecord;
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeSet;
use std::error::Error;
use std::path::Path;

/// Table the records are written to.
pub const SQLITE_TABLE: &str = "Data";

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Writes records into the [`SQLITE_TABLE`] table, one TEXT column per selected field.
///
/// Each batch is inserted in one transaction. Absent values are stored as NULL.
pub struct SqliteSink {
    conn: Connection,
    columns: Vec<String>,
    insert_sql: String,
    rows: usize,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and write records to it.
    pub fn create(path: &Path, columns: &BTreeSet<String>) -> Result<Self, Box<dyn Error>> {
        let conn = Connection::open(path)
            .map_err(|e| format!("Error opening SQLite file {}: {e}", path.display()))?;
        SqliteSink::new(conn, columns)
    }

    pub fn new(conn: Connection, columns: &BTreeSet<String>) -> Result<Self, Box<dyn Error>> {
        if columns.is_empty() {
            return Err("No columns selected for SQLite table".into());
        }
        let columns: Vec<String> = columns.iter().cloned().collect();
        let names: Vec<String> = columns.iter().map(|c| quote_identifier(c)).collect();

        let definitions = names
            .iter()
            .map(|n| format!("{n} TEXT"))
            .collect::<Vec<String>>()
            .join(", ");
        conn.execute(
            &format!("CREATE TABLE IF NOT EXISTS {SQLITE_TABLE} ({definitions})"),
            [],
        )
        .map_err(|e| format!("Error creating table {SQLITE_TABLE}: {e}"))?;

        let insert_sql = format!(
            "INSERT INTO {SQLITE_TABLE} ({}) VALUES ({})",
            names.join(", "),
            vec!["?"; names.len()].join(", ")
        );
        Ok(SqliteSink {
            conn,
            columns,
            insert_sql,
            rows: 0,
        })
    }

    /// Number of rows inserted so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl RecordSink for SqliteSink {
    fn write_batch(&mut self, records: &[InetnumRecord]) -> Result<(), Box<dyn Error>> {
        let tx = self.conn.transaction()?;
        {
            let mut insert = tx.prepare_cached(&self.insert_sql)?;
            for record in records {
                let values = self.columns.iter().map(|c| record.get(c).map(str::trim));
                insert.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        self.rows += records.len();
        log::debug!(
            "Inserted batch of {} records into {SQLITE_TABLE}, {} total",
            records.len(),
            self.rows
        );
        Ok(())
    }
}
