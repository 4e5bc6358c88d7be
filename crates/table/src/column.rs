use crate::cell::Value;

/// Declared semantic type of a column.
///
/// Inferred from the values a column actually holds, with wider types
/// winning: text over timestamp over float over int over bool. A column
/// that holds only nulls has no evidence and reports `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Null,
    Bool,
    Int,
    Float,
    Timestamp,
    Text,
}

/// A named column: one name, one sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Create a column from a name and values
    pub fn new<S: Into<String>, V: Into<Value>>(name: S, values: Vec<V>) -> Self {
        Column {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the column name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the values
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Get the values mutably
    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    /// Get the number of values (row count of the owning table)
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the column has no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if every value in the column is null
    #[must_use]
    pub fn is_all_null(&self) -> bool {
        self.values.iter().all(Value::is_null)
    }

    /// Infer the declared type from the values currently held.
    ///
    /// Mixed-type columns resolve to the widest type present, so a column
    /// that picked up both ints and text serializes as text rather than
    /// dropping values.
    #[must_use]
    pub fn inferred_type(&self) -> ColumnType {
        let mut has_bool = false;
        let mut has_int = false;
        let mut has_float = false;
        let mut has_timestamp = false;
        let mut has_text = false;

        for value in &self.values {
            match value {
                Value::Null => {}
                Value::Bool(_) => has_bool = true,
                Value::Int(_) => has_int = true,
                Value::Float(_) => has_float = true,
                Value::Timestamp(_) => has_timestamp = true,
                Value::Text(_) => has_text = true,
            }
        }

        if has_text || (has_timestamp && (has_float || has_int || has_bool)) {
            // Timestamps mixed with numerics have no common numeric shape;
            // text keeps every value representable.
            ColumnType::Text
        } else if has_timestamp {
            ColumnType::Timestamp
        } else if has_float {
            ColumnType::Float
        } else if has_int {
            ColumnType::Int
        } else if has_bool {
            ColumnType::Bool
        } else {
            ColumnType::Null
        }
    }
}
