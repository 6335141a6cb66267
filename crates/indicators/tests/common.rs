#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

/// `date`, `close` batch for a single series.
pub fn flat_batch(closes: &[Option<f64>]) -> RecordBatch {
    build_batch(None, closes)
}

/// `date`, `symbol`, `close` batch; `symbols` and `closes` are parallel.
pub fn symbol_batch(symbols: &[&str], closes: &[Option<f64>]) -> RecordBatch {
    build_batch(Some(symbols), closes)
}

fn build_batch(symbols: Option<&[&str]>, closes: &[Option<f64>]) -> RecordBatch {
    let dates: Vec<i32> = (0..closes.len())
        .map(|i| 19_000 + i32::try_from(i).unwrap())
        .collect();

    let mut fields = vec![Field::new("date", DataType::Date32, false)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(Date32Array::from(dates))];
    if let Some(symbols) = symbols {
        fields.push(Field::new("symbol", DataType::Utf8, true));
        columns.push(Arc::new(StringArray::from(symbols.to_vec())));
    }
    fields.push(Field::new("close", DataType::Float64, true));
    columns.push(Arc::new(Float64Array::from(closes.to_vec())));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap()
}

pub fn observed(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Column `name` of `batch` as `Option<f64>` per row.
pub fn column(batch: &RecordBatch, name: &str) -> Vec<Option<f64>> {
    let col = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("missing column {name}"));
    let arr = col
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap_or_else(|| panic!("{name} is not Float64"));
    (0..arr.len())
        .map(|i| arr.is_valid(i).then(|| arr.value(i)))
        .collect()
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

pub fn assert_close(label: &str, actual: Option<f64>, expected: f64, atol: f64) {
    match actual {
        Some(value) => assert!(
            (value - expected).abs() <= atol,
            "{label}: {value} differs from {expected} by more than {atol}"
        ),
        None => panic!("{label}: expected {expected}, got null"),
    }
}

pub fn assert_series_close(label: &str, expected: &[Option<f64>], actual: &[Option<f64>], atol: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "{label}: length mismatch {} != {}",
        expected.len(),
        actual.len()
    );

    for (idx, (exp, act)) in expected.iter().zip(actual.iter()).enumerate() {
        match (exp, act) {
            (None, None) => {}
            (Some(e), Some(a)) => {
                let diff = (e - a).abs();
                assert!(diff <= atol, "{label}[{idx}] diff {diff} exceeds {atol}");
            }
            (None, Some(a)) => panic!("{label}[{idx}] expected null, got {a}"),
            (Some(e), None) => panic!("{label}[{idx}] expected {e}, got null"),
        }
    }
}
