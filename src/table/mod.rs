//! In-memory string tables and their CSV / spreadsheet codecs.
//!
//! A [`Table`] is an ordered list of unique column names plus rows of
//! string cells. Column names are unique ignoring ASCII case; a duplicate
//! gets `_` appended until it is unique.

pub mod csv;
pub mod error;
pub mod excel;

pub use self::csv::{read_csv, write_csv};
pub use error::TableError;
pub use excel::{read_excel, write_excel, ExcelWriteOptions};

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given columns (deduplicated).
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for column in columns {
            table.add_column(column);
        }
        table
    }

    /// Append a column and return the name it was given. Existing rows get
    /// an empty cell.
    pub fn add_column(&mut self, name: impl Into<String>) -> &str {
        let mut name = name.into();
        while self.has_column_ignore_case(&name) {
            name.push('_');
        }
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.last().map(String::as_str).unwrap_or_default()
    }

    /// Append a row. Short rows are padded with empty cells; rows with more
    /// cells than columns are rejected.
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        if row.len() > self.columns.len() {
            return Err(TableError::RowTooWide {
                row: self.rows.len(),
                found: row.len(),
                expected: self.columns.len(),
            });
        }
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of `name`, preferring an exact match over a case-insensitive one.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)))
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| r[index].as_str())
    }

    fn has_column_ignore_case(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(name))
    }
}
