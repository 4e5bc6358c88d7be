use crate::cell::Value;
use crate::column::Column;
use crate::error::{Result, TableError};
use crate::table::Table;
use calamine::{Data, Reader, Xlsx};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::io::Cursor;

/// A decoded upload: one table per sheet, in container order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    tables: IndexMap<String, Table>,
}

/// Convert a calamine cell to a Value, keeping the container's own typing.
fn cell_value(data: &Data) -> Value {
    match data {
        Data::Empty => Value::Null,
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) => {
            // Excel serials that have no calendar representation stay numeric.
            dt.as_datetime().map_or(Value::Float(dt.as_f64()), Value::Timestamp)
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(format!("#ERROR: {e:?}")),
    }
}

/// Column name for a header cell, with a positional fallback for blanks.
fn header_name(cell: &Data, index: usize) -> String {
    let value = cell_value(cell);
    if value.is_null() {
        return format!("Unnamed: {index}");
    }
    let name = value.to_string();
    if name.is_empty() {
        format!("Unnamed: {index}")
    } else {
        name
    }
}

/// Build a table from a sheet range: first row is the header, the rest are
/// data rows. Short rows are null-padded to the header width, long rows are
/// truncated to it.
fn table_from_range(range: &calamine::Range<Data>) -> Result<Table> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::new());
    };

    // Duplicate header cells get a ".1", ".2", ... suffix so the table's
    // unique-name invariant holds while the original text stays visible.
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    let mut used: HashSet<String> = HashSet::new();
    for (i, cell) in header.iter().enumerate() {
        let base = header_name(cell, i);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while used.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        used.insert(candidate.clone());
        names.push(candidate);
    }

    let width = names.len();
    let mut values: Vec<Vec<Value>> = vec![Vec::new(); width];
    for row in rows {
        for (i, column) in values.iter_mut().enumerate() {
            column.push(row.get(i).map_or(Value::Null, cell_value));
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, column_values)| Column::new(name, column_values))
        .collect();
    Table::from_columns(columns)
}

impl Workbook {
    /// Create an empty workbook
    #[must_use]
    pub fn new() -> Self {
        Workbook {
            tables: IndexMap::new(),
        }
    }

    /// Decode an XLSX container held in memory into one table per sheet.
    ///
    /// Sheet order and sheet names are preserved verbatim; cell types follow
    /// the container's native inference.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Decode`] when the bytes are not a well-formed
    /// XLSX container and [`TableError::NoSheets`] when the container holds
    /// no sheets at all.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(bytes);
        let mut xlsx: Xlsx<_> =
            Xlsx::new(cursor).map_err(|e| TableError::Decode(e.to_string()))?;

        let sheet_names: Vec<String> = xlsx.sheet_names().iter().map(|s| s.to_string()).collect();
        if sheet_names.is_empty() {
            return Err(TableError::NoSheets);
        }

        let mut workbook = Workbook::new();
        for sheet_name in sheet_names {
            let range = xlsx
                .worksheet_range(&sheet_name)
                .map_err(|e| TableError::Decode(e.to_string()))?;
            let table = table_from_range(&range)?;
            workbook.add_table(&sheet_name, table)?;
        }

        Ok(workbook)
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.tables.len()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Check if a sheet exists
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Get a sheet's table by name
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| TableError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Get a sheet's table mutably by name
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| TableError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Add a table under a sheet name.
    ///
    /// # Errors
    ///
    /// Returns an error when the sheet name is already taken.
    pub fn add_table(&mut self, name: &str, table: Table) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(TableError::DuplicateSheet {
                name: name.to_string(),
            });
        }
        self.tables.insert(name.to_string(), table);
        Ok(())
    }

    /// Iterate over (sheet name, table) pairs in order
    pub fn tables(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over (sheet name, table) pairs mutably, in order
    pub fn tables_mut(&mut self) -> impl Iterator<Item = (&str, &mut Table)> {
        self.tables.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}
