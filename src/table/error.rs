use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("Spreadsheet read error: {source}")]
    SpreadsheetRead {
        #[from]
        source: calamine::Error,
    },

    #[error("Spreadsheet write error: {source}")]
    SpreadsheetWrite {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Sheet {index} not found in {path}")]
    SheetNotFound { path: String, index: usize },

    #[error("Row {row} has {found} cells but the table has {expected} columns")]
    RowTooWide {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Table has {count} columns, more than a worksheet can hold")]
    TooManyColumns { count: usize },
}
