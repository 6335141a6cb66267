use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::DataError;

/// Reads `name` from `batch` as a nullable `f64` series.
///
/// Any numeric Arrow type is accepted and cast to `Float64`. NaN and
/// infinities are missing observations and come back as null, so downstream
/// windows only have to reason about one kind of gap.
///
/// # Errors
///
/// - [`DataError::MissingColumn`] when the column does not exist.
/// - [`DataError::InvalidColumnType`] when the column is not numeric.
pub fn value_series(batch: &RecordBatch, name: &str) -> Result<Float64Array, DataError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;

    if !col.data_type().is_numeric() {
        return Err(DataError::InvalidColumnType {
            column: name.to_string(),
            expected: "numeric",
            actual: col.data_type().to_string(),
        });
    }

    let cast_col = cast(col, &DataType::Float64)?;
    let floats = cast_col
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataError::InvalidColumnType {
            column: name.to_string(),
            expected: "numeric",
            actual: cast_col.data_type().to_string(),
        })?;

    Ok(floats
        .iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    fn batch_with(name: &str, col: ArrayRef) -> RecordBatch {
        let schema = Schema::new(vec![Field::new(name, col.data_type().clone(), true)]);
        RecordBatch::try_new(Arc::new(schema), vec![col]).unwrap()
    }

    #[test]
    fn test_integer_column_is_cast() {
        let batch = batch_with("close", Arc::new(Int64Array::from(vec![1, 2, 3])));
        let values = value_series(&batch, "close").unwrap();
        assert_eq!(values.values().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(values.null_count(), 0);
    }

    #[test]
    fn test_nan_becomes_null() {
        let batch = batch_with(
            "close",
            Arc::new(Float64Array::from(vec![Some(1.0), Some(f64::NAN), None])),
        );
        let values = value_series(&batch, "close").unwrap();
        assert!(values.is_valid(0));
        assert!(values.is_null(1));
        assert!(values.is_null(2));
    }

    #[test]
    fn test_infinities_become_null() {
        let batch = batch_with(
            "close",
            Arc::new(Float64Array::from(vec![f64::INFINITY, 2.0, f64::NEG_INFINITY])),
        );
        let values = value_series(&batch, "close").unwrap();
        assert!(values.is_null(0));
        assert_eq!(values.value(1), 2.0);
        assert!(values.is_null(2));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let batch = batch_with("close", Arc::new(StringArray::from(vec!["1.0"])));
        let err = value_series(&batch, "close").unwrap_err();
        assert!(matches!(err, DataError::InvalidColumnType { .. }));
    }

    #[test]
    fn test_missing_column() {
        let batch = batch_with("open", Arc::new(Float64Array::from(vec![1.0])));
        let err = value_series(&batch, "close").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(name) if name == "close"));
    }
}
