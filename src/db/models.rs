use serde::Serialize;
use serde_json::Value;

/// Tabular outcome of one executed statement.
///
/// Statements without a result set (DDL/DML) come back with empty columns and
/// rows. Cell values are decoded by SQLite storage class: INTEGER, REAL, TEXT,
/// BLOB (rendered as hex) or NULL.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
