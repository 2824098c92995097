//! Spreadsheet import and export.
//!
//! Reading accepts any workbook format the file extension identifies
//! (`xlsx`, `xlsm`, `xls`, `ods`, ...). Writing always produces `xlsx`.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::Workbook;

use super::{Table, TableError};
use crate::constants::DEFAULT_SHEET_NAME;

/// Options for [`write_excel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcelWriteOptions {
    /// Write the column names as the first row
    pub include_header: bool,
    pub sheet_name: String,
}

impl Default for ExcelWriteOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// Read sheet `sheet_index` of a workbook into a [`Table`].
///
/// The first used row holds the column names; blank names become
/// `Columns<i>` where `i` is the zero-based column number. Rows whose cells
/// are all empty are skipped.
pub fn read_excel(path: impl AsRef<Path>, sheet_index: usize) -> Result<Table, TableError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or_else(|| TableError::SheetNotFound {
            path: path.display().to_string(),
            index: sheet_index,
        })??;

    let table = range_to_table(&range)?;
    tracing::debug!(
        path = %path.display(),
        sheet = sheet_index,
        columns = table.column_count(),
        rows = table.row_count(),
        "Read spreadsheet table"
    );
    Ok(table)
}

fn range_to_table(range: &Range<Data>) -> Result<Table, TableError> {
    let Some((_, first_col)) = range.start() else {
        return Ok(Table::default());
    };
    // cells left of the used range still count as columns
    let lead = first_col as usize;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let names = (0..lead)
        .map(|_| String::new())
        .chain(header.iter().map(|cell| cell.to_string().trim().to_string()));
    let table_columns: Vec<String> = names
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                format!("Columns{}", i)
            } else {
                name
            }
        })
        .collect();
    let mut table = Table::new(table_columns);

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let cells = (0..lead)
            .map(|_| String::new())
            .chain(row.iter().map(ToString::to_string));
        table.push_row(cells)?;
    }

    Ok(table)
}

/// Write `table` to a new `xlsx` workbook at `path`, replacing any file.
pub fn write_excel(
    path: impl AsRef<Path>,
    table: &Table,
    options: &ExcelWriteOptions,
) -> Result<(), TableError> {
    let path = path.as_ref();
    if table.column_count() > u16::MAX as usize {
        return Err(TableError::TooManyColumns {
            count: table.column_count(),
        });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(options.sheet_name.as_str())?;

    let mut row_index: u32 = 0;
    if options.include_header {
        for (col, name) in table.columns().iter().enumerate() {
            worksheet.write_string(row_index, col as u16, name.as_str())?;
        }
        row_index += 1;
    }

    for row in table.rows() {
        for (col, value) in row.iter().enumerate() {
            worksheet.write_string(row_index, col as u16, value.as_str())?;
        }
        row_index += 1;
    }

    workbook.save(path)?;
    tracing::debug!(
        path = %path.display(),
        sheet = %options.sheet_name,
        rows = table.row_count(),
        "Wrote spreadsheet table"
    );
    Ok(())
}
