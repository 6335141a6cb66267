//! Precondition checks run before the band engine touches any data.

use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::DataError;
use crate::frame::BandFrame;

/// Checks that `name` exists and holds a numeric type.
///
/// # Errors
/// - [`DataError::MissingColumn`] when the column does not exist.
/// - [`DataError::InvalidColumnType`] when the column is not numeric.
pub fn check_value_column(batch: &RecordBatch, name: &str) -> Result<(), DataError> {
    let data_type = column_type(batch, name)?;
    if data_type.is_numeric() {
        Ok(())
    } else {
        Err(DataError::InvalidColumnType {
            column: name.to_string(),
            expected: "numeric",
            actual: data_type.to_string(),
        })
    }
}

/// Checks that `name` exists and holds a date or timestamp type.
///
/// Only the type is checked: rows are trusted to be in chronological order
/// within each partition.
///
/// # Errors
/// - [`DataError::MissingColumn`] when the column does not exist.
/// - [`DataError::InvalidColumnType`] when the column is not a date/timestamp.
pub fn check_date_column(batch: &RecordBatch, name: &str) -> Result<(), DataError> {
    let data_type = column_type(batch, name)?;
    match data_type {
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => Ok(()),
        other => Err(DataError::InvalidColumnType {
            column: name.to_string(),
            expected: "date or timestamp",
            actual: other.to_string(),
        }),
    }
}

/// Checks that every key column exists.
///
/// # Errors
/// Returns [`DataError::MissingColumn`] for the first key that does not exist.
pub fn check_group_keys<S: AsRef<str>>(batch: &RecordBatch, keys: &[S]) -> Result<(), DataError> {
    keys.iter()
        .try_for_each(|key| column_type(batch, key.as_ref()).map(|_| ()))
}

/// Runs every precondition for one band request against `frame`.
///
/// # Errors
/// Returns the first failed check.
pub fn check_frame(frame: &BandFrame, date_column: &str, value_column: &str) -> Result<(), DataError> {
    let batch = frame.batch();
    check_value_column(batch, value_column)?;
    check_date_column(batch, date_column)?;
    check_group_keys(batch, frame.group_keys())
}

fn column_type<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a DataType, DataError> {
    batch
        .schema_ref()
        .field_with_name(name)
        .map(|field| field.data_type())
        .map_err(|_| DataError::MissingColumn(name.to_string()))
}
