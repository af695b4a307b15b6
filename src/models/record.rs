//! Registry record data model.

use serde::Serialize;
use std::collections::BTreeMap;

/// One "inetnum" record from a registry dump, keyed by column name.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InetnumRecord {
    /// Column name to raw value. Repeated keys are joined with `\n`.
    pub fields: BTreeMap<String, String>,
    /// Line number in the source dump where the record started.
    #[serde(skip)]
    pub line_no: usize,
}

impl InetnumRecord {
    pub fn new(line_no: usize) -> Self {
        InetnumRecord {
            fields: BTreeMap::new(),
            line_no,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|v| v.as_str())
    }

    /// Set `column`, or append to it on a new line if already present.
    pub fn append(&mut self, column: &str, value: &str) {
        self.fields
            .entry(column.to_string())
            .and_modify(|v| {
                v.push('\n');
                v.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    pub fn set(&mut self, column: &str, value: String) {
        self.fields.insert(column.to_string(), value);
    }
}
