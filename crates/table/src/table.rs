use crate::cell::Value;
use crate::column::Column;
use crate::error::{Result, TableError};
use indexmap::{IndexMap, IndexSet};

/// An in-memory table: named columns of equal length, in a fixed order.
///
/// Column names are unique within a table; lookups by name are O(1) and
/// iteration preserves insertion order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create a new table with no columns
    #[must_use]
    pub fn new() -> Self {
        Table {
            columns: IndexMap::new(),
        }
    }

    /// Build a table from a list of columns.
    ///
    /// # Errors
    ///
    /// Returns an error when two columns share a name or when the columns
    /// have differing lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Table::new();
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, col)| col.len())
    }

    /// Get the number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get all column names in order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Check if a column exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Get a mutable column by name
    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .get_mut(name)
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Iterate over columns in order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Append a column to the end of the table.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is taken or the length does not match
    /// the current row count (the first column added sets the row count).
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        self.check_insertable(&column)?;
        self.columns.insert(column.name().to_string(), column);
        Ok(())
    }

    /// Insert a column in front of all existing columns.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Table::add_column`].
    pub fn prepend_column(&mut self, column: Column) -> Result<()> {
        self.check_insertable(&column)?;
        self.columns
            .shift_insert(0, column.name().to_string(), column);
        Ok(())
    }

    fn check_insertable(&self, column: &Column) -> Result<()> {
        if self.columns.contains_key(column.name()) {
            return Err(TableError::DuplicateColumn {
                name: column.name().to_string(),
            });
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(TableError::ColumnLengthMismatch {
                name: column.name().to_string(),
                expected: self.row_count(),
                actual: column.len(),
            });
        }
        Ok(())
    }

    /// The "worth serializing" guard: a table is empty when it has zero rows
    /// or when every value in every column is null.
    ///
    /// Empty tables are skipped by the upload pipeline and discarded by the
    /// merge engine; the serializer refuses them outright.
    #[must_use]
    pub fn is_empty_table(&self) -> bool {
        self.row_count() == 0 || self.columns.values().all(Column::is_all_null)
    }

    /// Concatenate tables row-wise, in input order.
    ///
    /// The output column set is the union of the input column sets, in
    /// first-seen order. Rows coming from a table that lacks a column get
    /// null for that column. Inputs are not required to be non-empty; a
    /// zero-row input simply contributes nothing.
    #[must_use]
    pub fn concat(tables: &[Table]) -> Table {
        let mut union: IndexSet<&str> = IndexSet::new();
        for table in tables {
            for name in table.columns.keys() {
                union.insert(name.as_str());
            }
        }

        let total_rows: usize = tables.iter().map(Table::row_count).sum();

        let mut merged = Table::new();
        for name in union {
            let mut values: Vec<Value> = Vec::with_capacity(total_rows);
            for table in tables {
                match table.columns.get(name) {
                    Some(column) => values.extend(column.values().iter().cloned()),
                    None => values.extend(std::iter::repeat(Value::Null).take(table.row_count())),
                }
            }
            // Union names are unique and every column has total_rows values,
            // so direct insertion cannot violate the table invariants.
            merged
                .columns
                .insert(name.to_string(), Column::new(name, values));
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> Table {
        Table::from_columns(vec![
            Column::new("x", vec![Value::Int(1), Value::Int(2)]),
            Column::new("y", vec![Value::Text("a".into()), Value::Text("b".into())]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns() {
        let table = two_column_table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names(), vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = Table::from_columns(vec![
            Column::new("x", vec![Value::Int(1)]),
            Column::new("x", vec![Value::Int(2)]),
        ]);
        assert!(matches!(result, Err(TableError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = Table::from_columns(vec![
            Column::new("x", vec![Value::Int(1), Value::Int(2)]),
            Column::new("y", vec![Value::Int(3)]),
        ]);
        assert!(matches!(
            result,
            Err(TableError::ColumnLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_prepend_column() {
        let mut table = two_column_table();
        table
            .prepend_column(Column::new(
                "source",
                vec![Value::Text("f".into()), Value::Text("f".into())],
            ))
            .unwrap();
        assert_eq!(table.column_names(), vec!["source", "x", "y"]);
    }

    #[test]
    fn test_column_not_found() {
        let table = two_column_table();
        assert!(matches!(
            table.column("missing"),
            Err(TableError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_is_empty_table_zero_rows() {
        let table = Table::from_columns(vec![Column::new("x", Vec::<Value>::new())]).unwrap();
        assert!(table.is_empty_table());
        assert!(Table::new().is_empty_table());
    }

    #[test]
    fn test_is_empty_table_all_null() {
        let table = Table::from_columns(vec![
            Column::new("x", vec![Value::Null, Value::Null]),
            Column::new("y", vec![Value::Null, Value::Null]),
        ])
        .unwrap();
        assert!(table.is_empty_table());
    }

    #[test]
    fn test_is_empty_table_false_with_one_value() {
        let table = Table::from_columns(vec![
            Column::new("x", vec![Value::Null, Value::Null]),
            Column::new("y", vec![Value::Null, Value::Int(1)]),
        ])
        .unwrap();
        assert!(!table.is_empty_table());
    }

    #[test]
    fn test_concat_same_schema() {
        let a = two_column_table();
        let b = two_column_table();
        let merged = Table::concat(&[a, b]);

        assert_eq!(merged.row_count(), 4);
        assert_eq!(merged.column_names(), vec!["x", "y"]);
        assert_eq!(merged.column("x").unwrap().values()[2], Value::Int(1));
    }

    #[test]
    fn test_concat_unions_columns_with_null_fill() {
        let a = Table::from_columns(vec![
            Column::new("x", vec![Value::Int(1)]),
            Column::new("y", vec![Value::Int(2)]),
        ])
        .unwrap();
        let b = Table::from_columns(vec![
            Column::new("x", vec![Value::Int(3)]),
            Column::new("z", vec![Value::Int(4)]),
        ])
        .unwrap();

        let merged = Table::concat(&[a, b]);

        assert_eq!(merged.column_names(), vec!["x", "y", "z"]);
        assert_eq!(merged.row_count(), 2);
        // row from a: {x: 1, y: 2, z: null}
        assert_eq!(merged.column("y").unwrap().values()[0], Value::Int(2));
        assert!(merged.column("z").unwrap().values()[0].is_null());
        // row from b: {x: 3, y: null, z: 4}
        assert!(merged.column("y").unwrap().values()[1].is_null());
        assert_eq!(merged.column("z").unwrap().values()[1], Value::Int(4));
    }

    #[test]
    fn test_concat_preserves_input_order() {
        let a = Table::from_columns(vec![Column::new("x", vec![Value::Int(1)])]).unwrap();
        let b = Table::from_columns(vec![Column::new("x", vec![Value::Int(2)])]).unwrap();
        let c = Table::from_columns(vec![Column::new("x", vec![Value::Int(3)])]).unwrap();

        let merged = Table::concat(&[a, b, c]);
        let values = merged.column("x").unwrap().values().to_vec();
        assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_concat_skips_nothing_but_adds_nothing_for_zero_rows() {
        let a = two_column_table();
        let empty = Table::new();
        let merged = Table::concat(&[empty, a]);
        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.column_names(), vec!["x", "y"]);
    }

    #[test]
    fn test_concat_of_nothing_is_empty() {
        let merged = Table::concat(&[]);
        assert_eq!(merged.row_count(), 0);
        assert_eq!(merged.column_count(), 0);
        assert!(merged.is_empty_table());
    }
}
