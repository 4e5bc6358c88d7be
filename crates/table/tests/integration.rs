use rust_xlsxwriter::Workbook as XlsxBuilder;
use sheetpress_table::{Column, Table, TableError, Value, Workbook};

// ===== XLSX to Parquet Chain Tests =====

#[test]
fn test_xlsx_to_parquet_full_chain() {
    let mut builder = XlsxBuilder::new();
    let sheet = builder.add_worksheet();
    sheet.set_name("vHost").unwrap();
    sheet.write_string(0, 0, "host").unwrap();
    sheet.write_string(0, 1, "cores").unwrap();
    sheet.write_string(1, 0, "esx01").unwrap();
    sheet.write_number(1, 1, 32.0).unwrap();
    sheet.write_string(2, 0, "esx02").unwrap();
    sheet.write_number(2, 1, 64.0).unwrap();
    let bytes = builder.save_to_buffer().unwrap();

    let workbook = Workbook::from_xlsx_bytes(&bytes).unwrap();
    let table = workbook.table("vHost").unwrap();

    let blob = table.to_parquet_bytes().unwrap();
    let loaded = Table::from_parquet_bytes(&blob).unwrap();

    assert_eq!(loaded.column_names(), vec!["host", "cores"]);
    assert_eq!(loaded.row_count(), 2);
    assert_eq!(
        loaded.column("host").unwrap().values()[0],
        Value::Text("esx01".to_string())
    );
    assert_eq!(loaded.column("cores").unwrap().values()[1], Value::Float(64.0));
}

#[test]
fn test_each_sheet_becomes_its_own_blob() {
    let mut builder = XlsxBuilder::new();
    let info = builder.add_worksheet();
    info.set_name("vInfo").unwrap();
    info.write_string(0, 0, "name").unwrap();
    info.write_string(1, 0, "esx01").unwrap();
    let cpu = builder.add_worksheet();
    cpu.set_name("vCPU").unwrap();
    cpu.write_string(0, 0, "sockets").unwrap();
    cpu.write_number(1, 0, 2.0).unwrap();
    let bytes = builder.save_to_buffer().unwrap();

    let workbook = Workbook::from_xlsx_bytes(&bytes).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["vInfo", "vCPU"]);

    let blobs: Vec<Vec<u8>> = workbook
        .tables()
        .map(|(_, table)| table.to_parquet_bytes().unwrap())
        .collect();
    assert_eq!(blobs.len(), 2);

    let cpu_back = Table::from_parquet_bytes(&blobs[1]).unwrap();
    assert_eq!(cpu_back.column_names(), vec!["sockets"]);
}

// ===== Table Stacking Tests =====

#[test]
fn test_concat_unions_columns_and_serializes() {
    let a = Table::from_columns(vec![
        Column::new("host", vec!["esx01", "esx02"]),
        Column::new("cores", vec![32i64, 64]),
    ])
    .unwrap();
    let b = Table::from_columns(vec![
        Column::new("host", vec!["esx03", "esx04"]),
        Column::new("ram", vec![256i64, 512]),
    ])
    .unwrap();

    let merged = Table::concat(&[a, b]);
    assert_eq!(merged.column_names(), vec!["host", "cores", "ram"]);
    assert_eq!(merged.row_count(), 4);
    assert!(merged.column("cores").unwrap().values()[2].is_null());
    assert!(merged.column("ram").unwrap().values()[0].is_null());

    let loaded = Table::from_parquet_bytes(&merged.to_parquet_bytes().unwrap()).unwrap();
    assert_eq!(loaded.row_count(), 4);
    assert!(loaded.column("ram").unwrap().values()[1].is_null());
    assert_eq!(loaded.column("ram").unwrap().values()[3], Value::Int(512));
}

#[test]
fn test_prepend_column_survives_roundtrip_in_first_position() {
    let mut table = Table::from_columns(vec![
        Column::new("a", vec![1i64, 2]),
        Column::new("b", vec!["x", "y"]),
    ])
    .unwrap();
    table
        .prepend_column(Column::new("sourceFilename", vec!["report.xlsx", "report.xlsx"]))
        .unwrap();

    let loaded = Table::from_parquet_bytes(&table.to_parquet_bytes().unwrap()).unwrap();
    assert_eq!(loaded.column_names(), vec!["sourceFilename", "a", "b"]);
    assert_eq!(
        loaded.column("sourceFilename").unwrap().values()[1],
        Value::Text("report.xlsx".to_string())
    );
}

// ===== Error Surface Tests =====

#[test]
fn test_from_columns_length_mismatch() {
    let result = Table::from_columns(vec![
        Column::new("a", vec![1i64, 2]),
        Column::new("b", vec![1i64]),
    ]);
    assert!(matches!(
        result,
        Err(TableError::ColumnLengthMismatch { .. })
    ));
}

#[test]
fn test_blank_workbook_sheet_refuses_serialization() {
    let mut builder = XlsxBuilder::new();
    builder.add_worksheet().set_name("Empty").unwrap();
    let bytes = builder.save_to_buffer().unwrap();

    let workbook = Workbook::from_xlsx_bytes(&bytes).unwrap();
    let table = workbook.table("Empty").unwrap();
    assert!(matches!(
        table.to_parquet_bytes(),
        Err(TableError::EmptyTable)
    ));
}
