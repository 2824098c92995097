//! Comma separated files.
//!
//! The format is deliberately strict: fields are split on every `,` with no
//! quoting or escaping, and every field is trimmed. The first line names
//! the columns. Blank lines are skipped.

use std::fs::OpenOptions;
use std::path::Path;

use ::csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};

use super::{Table, TableError};

/// Read a CSV file into a [`Table`].
///
/// Data rows with fewer cells than the header are padded with empty cells;
/// rows with more cells are an error.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table, TableError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_path(path)?;

    let mut records = reader.records();
    let mut table = match records.next() {
        Some(header) => {
            let header = header?;
            Table::new(header.iter().enumerate().map(|(i, name)| {
                if i == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.to_string()
                }
            }))
        }
        None => return Ok(Table::default()),
    };

    for record in records {
        let record = record?;
        table.push_row(record.iter())?;
    }

    tracing::debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.row_count(),
        "Read CSV table"
    );
    Ok(table)
}

/// Append the rows of `table` to `path`, creating the file if needed.
///
/// No header line is written. Cells are joined with `,` verbatim.
pub fn write_csv(path: impl AsRef<Path>, table: &Table) -> Result<(), TableError> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|source| TableError::Io {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!(path = %path.display(), rows = table.row_count(), "Appended CSV rows");
    Ok(())
}
