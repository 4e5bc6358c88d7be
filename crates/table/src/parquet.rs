//! Parquet blob support for `Table`
//!
//! Serializes tables to Apache Parquet entirely in memory and reads
//! them back. The schema travels inside the blob, so a blob can be
//! re-read without any side channel.

use crate::cell::Value;
use crate::column::{Column, ColumnType};
use crate::error::{Result, TableError};
use crate::table::Table;
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray,
    TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use std::sync::Arc;

impl Table {
    /// Serialize the table to a Parquet blob.
    ///
    /// Each column is written with the narrowest Arrow type that holds
    /// every one of its values; mixed columns degrade to text. Tables
    /// with no rows, or where every cell is null, are refused with
    /// [`TableError::EmptyTable`] so callers can skip them instead of
    /// shipping a blob with nothing in it.
    ///
    /// # Example
    /// ```
    /// use sheetpress_table::{Column, Table};
    ///
    /// let table = Table::from_columns(vec![
    ///     Column::new("name", vec!["Alice", "Bob"]),
    ///     Column::new("age", vec![30i64, 25]),
    /// ])
    /// .unwrap();
    /// let blob = table.to_parquet_bytes().unwrap();
    /// assert!(!blob.is_empty());
    /// ```
    pub fn to_parquet_bytes(&self) -> Result<Vec<u8>> {
        if self.is_empty_table() {
            return Err(TableError::EmptyTable);
        }

        let fields: Vec<Field> = self
            .columns()
            .map(|column| Field::new(column.name(), arrow_data_type(column.inferred_type()), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let arrays: Vec<ArrayRef> = self.columns().map(build_arrow_array).collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays)
            .map_err(|e| TableError::Serialize(e.to_string()))?;

        let mut buffer = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None)
            .map_err(|e| TableError::Serialize(e.to_string()))?;
        writer
            .write(&batch)
            .map_err(|e| TableError::Serialize(e.to_string()))?;
        writer
            .close()
            .map_err(|e| TableError::Serialize(e.to_string()))?;

        Ok(buffer)
    }

    /// Read a table back from a Parquet blob.
    ///
    /// Column names and order come from the embedded schema. A blob
    /// with a schema but zero rows yields a table with named, empty
    /// columns. Bytes that are not a Parquet file fail with
    /// [`TableError::CorruptBlob`].
    ///
    /// # Example
    /// ```no_run
    /// use sheetpress_table::Table;
    ///
    /// let blob = std::fs::read("data.parquet").unwrap();
    /// let table = Table::from_parquet_bytes(&blob).unwrap();
    /// ```
    pub fn from_parquet_bytes(bytes: &[u8]) -> Result<Table> {
        let data = Bytes::copy_from_slice(bytes);
        let builder = ParquetRecordBatchReaderBuilder::try_new(data)
            .map_err(|e| TableError::CorruptBlob(e.to_string()))?;

        let schema = builder.schema().clone();
        let reader = builder
            .build()
            .map_err(|e| TableError::CorruptBlob(e.to_string()))?;

        let mut batches: Vec<RecordBatch> = Vec::new();
        for batch_result in reader {
            batches.push(batch_result.map_err(|e| TableError::CorruptBlob(e.to_string()))?);
        }

        let mut columns: Vec<Column> = Vec::with_capacity(schema.fields().len());
        for (col_idx, field) in schema.fields().iter().enumerate() {
            let mut values: Vec<Value> = Vec::new();
            for batch in &batches {
                let array = batch.column(col_idx);
                for row_idx in 0..batch.num_rows() {
                    values.push(arrow_array_to_value(array, row_idx));
                }
            }
            columns.push(Column::new(field.name().clone(), values));
        }

        Table::from_columns(columns).map_err(|e| TableError::CorruptBlob(e.to_string()))
    }
}

fn arrow_data_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Bool => DataType::Boolean,
        ColumnType::Int => DataType::Int64,
        ColumnType::Float => DataType::Float64,
        ColumnType::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
        // Null-only columns carry no shape of their own; nullable text
        // accepts whatever later readers union them with.
        ColumnType::Null | ColumnType::Text => DataType::Utf8,
    }
}

/// Build an Arrow array for one column, coercing values into the
/// column's inferred type.
fn build_arrow_array(column: &Column) -> ArrayRef {
    match column.inferred_type() {
        ColumnType::Bool => {
            let values: Vec<Option<bool>> = column.values().iter().map(Value::as_bool).collect();
            Arc::new(BooleanArray::from(values))
        }
        ColumnType::Int => {
            let values: Vec<Option<i64>> = column.values().iter().map(Value::as_int).collect();
            Arc::new(Int64Array::from(values))
        }
        ColumnType::Float => {
            let values: Vec<Option<f64>> = column.values().iter().map(Value::as_float).collect();
            Arc::new(Float64Array::from(values))
        }
        ColumnType::Timestamp => {
            let values: Vec<Option<i64>> = column
                .values()
                .iter()
                .map(|value| {
                    value
                        .as_timestamp()
                        .map(|ts| ts.and_utc().timestamp_micros())
                })
                .collect();
            Arc::new(TimestampMicrosecondArray::from(values))
        }
        ColumnType::Null | ColumnType::Text => {
            let values: Vec<Option<String>> = column
                .values()
                .iter()
                .map(|value| {
                    if value.is_null() {
                        None
                    } else {
                        Some(value.to_string())
                    }
                })
                .collect();
            Arc::new(StringArray::from(values))
        }
    }
}

/// Convert one Arrow array element back to a [`Value`].
fn arrow_array_to_value(array: &ArrayRef, idx: usize) -> Value {
    if array.is_null(idx) {
        return Value::Null;
    }

    match array.data_type() {
        DataType::Boolean => {
            if let Some(arr) = array.as_any().downcast_ref::<BooleanArray>() {
                Value::Bool(arr.value(idx))
            } else {
                Value::Null
            }
        }
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            if let Some(arr) = array.as_any().downcast_ref::<Int64Array>() {
                Value::Int(arr.value(idx))
            } else if let Some(arr) = array.as_any().downcast_ref::<arrow::array::Int32Array>() {
                Value::Int(i64::from(arr.value(idx)))
            } else if let Some(arr) = array.as_any().downcast_ref::<arrow::array::Int16Array>() {
                Value::Int(i64::from(arr.value(idx)))
            } else if let Some(arr) = array.as_any().downcast_ref::<arrow::array::Int8Array>() {
                Value::Int(i64::from(arr.value(idx)))
            } else {
                Value::Text(format!("<int:{}>", array.data_type()))
            }
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            if let Some(arr) = array.as_any().downcast_ref::<arrow::array::UInt64Array>() {
                i64::try_from(arr.value(idx)).map_or_else(
                    |_| Value::Text(arr.value(idx).to_string()),
                    Value::Int,
                )
            } else if let Some(arr) = array.as_any().downcast_ref::<arrow::array::UInt32Array>() {
                Value::Int(i64::from(arr.value(idx)))
            } else if let Some(arr) = array.as_any().downcast_ref::<arrow::array::UInt16Array>() {
                Value::Int(i64::from(arr.value(idx)))
            } else if let Some(arr) = array.as_any().downcast_ref::<arrow::array::UInt8Array>() {
                Value::Int(i64::from(arr.value(idx)))
            } else {
                Value::Text(format!("<uint:{}>", array.data_type()))
            }
        }
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            if let Some(arr) = array.as_any().downcast_ref::<Float64Array>() {
                Value::Float(arr.value(idx))
            } else if let Some(arr) = array.as_any().downcast_ref::<arrow::array::Float32Array>() {
                Value::Float(f64::from(arr.value(idx)))
            } else {
                Value::Text(format!("<float:{}>", array.data_type()))
            }
        }
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(arr) = array.as_any().downcast_ref::<StringArray>() {
                Value::Text(arr.value(idx).to_string())
            } else if let Some(arr) = array
                .as_any()
                .downcast_ref::<arrow::array::LargeStringArray>()
            {
                Value::Text(arr.value(idx).to_string())
            } else {
                Value::Null
            }
        }
        DataType::Timestamp(unit, _) => timestamp_element(array, idx, unit),
        // For other types, fall back to the display representation
        _ => {
            let formatted = arrow::util::display::array_value_to_string(array, idx);
            match formatted {
                Ok(s) => Value::Text(s),
                Err(_) => Value::Text(format!("<{}>", array.data_type())),
            }
        }
    }
}

fn timestamp_element(array: &ArrayRef, idx: usize, unit: &TimeUnit) -> Value {
    let micros = match unit {
        TimeUnit::Second => array
            .as_any()
            .downcast_ref::<arrow::array::TimestampSecondArray>()
            .map(|arr| arr.value(idx).saturating_mul(1_000_000)),
        TimeUnit::Millisecond => array
            .as_any()
            .downcast_ref::<arrow::array::TimestampMillisecondArray>()
            .map(|arr| arr.value(idx).saturating_mul(1_000)),
        TimeUnit::Microsecond => array
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .map(|arr| arr.value(idx)),
        TimeUnit::Nanosecond => array
            .as_any()
            .downcast_ref::<arrow::array::TimestampNanosecondArray>()
            .map(|arr| arr.value(idx) / 1_000),
    };

    match micros {
        Some(micros) => chrono::DateTime::from_timestamp_micros(micros)
            .map_or(Value::Null, |dt| Value::Timestamp(dt.naive_utc())),
        None => Value::Null,
    }
}
