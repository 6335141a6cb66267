use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

/// Builds a `date`, `symbol`, `close` batch from parallel slices.
pub fn symbol_batch(symbols: &[&str], closes: &[f64]) -> RecordBatch {
    let dates: Vec<i32> = (0..closes.len())
        .map(|i| 19_000 + i32::try_from(i).unwrap())
        .collect();
    let schema = Schema::new(vec![
        Field::new("date", DataType::Date32, false),
        Field::new("symbol", DataType::Utf8, true),
        Field::new("close", DataType::Float64, true),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Date32Array::from(dates)),
        Arc::new(StringArray::from(symbols.to_vec())),
        Arc::new(Float64Array::from(closes.to_vec())),
    ];
    RecordBatch::try_new(Arc::new(schema), columns).unwrap()
}
