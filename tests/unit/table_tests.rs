// Table conversion tests

use bizkit::table::*;
use tempfile::TempDir;

#[test]
fn test_csv_to_excel_and_back() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("orders.csv");
    std::fs::write(&csv_path, "\u{feff}Id, Name ,Qty\n1,apple,3\n2,pear\n").unwrap();

    let table = read_csv(&csv_path).unwrap();
    assert_eq!(table.columns(), &["Id", "Name", "Qty"]);
    assert_eq!(table.rows()[1], vec!["2", "pear", ""]);

    let xlsx_path = dir.path().join("orders.xlsx");
    write_excel(&xlsx_path, &table, &ExcelWriteOptions::default()).unwrap();

    let round = read_excel(&xlsx_path, 0).unwrap();
    assert_eq!(round.columns(), table.columns());
    assert_eq!(round.row_count(), 2);
    assert_eq!(round.cell(0, "name"), Some("apple"));
}

#[test]
fn test_write_csv_appends_rows_without_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    let mut table = Table::new(["a", "b"]);
    table.push_row(["1", "2"]).unwrap();
    write_csv(&path, &table).unwrap();
    write_csv(&path, &table).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,2\n1,2\n");
}

#[test]
fn test_csv_row_wider_than_header_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "a,b\n1,2,3\n").unwrap();

    let err = read_csv(&path).unwrap_err();
    assert!(matches!(err, TableError::RowTooWide { .. }));
}

#[test]
fn test_missing_sheet_index_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("one.xlsx");
    write_excel(&path, &Table::new(["x"]), &ExcelWriteOptions::default()).unwrap();

    let err = read_excel(&path, 3).unwrap_err();
    assert!(matches!(err, TableError::SheetNotFound { index: 3, .. }));
}

#[test]
fn test_duplicate_columns_are_renamed() {
    let table = Table::new(["Name", "name", "NAME"]);
    assert_eq!(table.columns(), &["Name", "name_", "NAME__"]);
}
