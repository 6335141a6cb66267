//! Multi-period band orchestration over flat and grouped tables.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use bband_data::{BandFrame, GroupedFrame, check_frame, value_series};
use bband_types::{AugmentConfig, Backend, BandColumns, BandError, PeriodSpec};

use crate::backend::backend_for;
use crate::impl_::bollinger::BollingerBands;

/// Appends middle/upper/lower Bollinger band columns for every requested
/// period to the table held by `frame`.
///
/// Columns are named `{value_column}_bband_{middle|upper|lower}_{period}` and
/// appended in period order. A period whose columns already exist (a repeated
/// period, or a clash with an input column) overwrites them in place.
///
/// # Errors
///
/// - [`BandError::Configuration`] for an invalid period specification; no
///   computation is attempted.
/// - [`BandError::Computation`] when a column is missing or ill-typed, the
///   keys cannot be partitioned, or a kernel fails. No partial table is
///   returned.
pub fn augment_bands(
    frame: &BandFrame,
    date_column: &str,
    value_column: &str,
    periods: &PeriodSpec,
    std_multiplier: f64,
    backend: Backend,
) -> Result<RecordBatch, BandError> {
    let periods = periods.normalize()?;
    check_frame(frame, date_column, value_column)?;

    let batch = frame.batch();
    let values = value_series(batch, value_column)?;
    let partitions = frame.partitions()?;
    let strategy = backend_for(backend);

    tracing::debug!(
        "Computing bollinger bands on {value_column}: periods={periods:?}, std_multiplier={std_multiplier}, backend={}, rows={}, partitions={}",
        strategy.name(),
        batch.num_rows(),
        partitions.len()
    );

    let mut seen = HashSet::new();
    let mut assembler = ColumnAssembler::new(batch);

    for period in periods {
        if !seen.insert(period) {
            tracing::warn!("Period {period} requested more than once; recomputed columns overwrite the earlier ones");
        }
        let warmup = BollingerBands::new(period, std_multiplier).warmup_periods();
        if period < 2 || warmup > partitions.max_len() {
            tracing::warn!(
                "Period {period} cannot produce bands (largest partition has {} rows); columns will be all null",
                partitions.max_len()
            );
        }

        let names = BandColumns::new(value_column, period);
        let bands = strategy.compute(&values, &partitions, period, std_multiplier)?;
        for (name, column) in names.names().into_iter().zip(bands.into_columns()) {
            assembler.put(name, column);
        }
    }

    assembler.finish()
}

/// Runs [`augment_bands`] for a request described by `config`.
///
/// # Errors
///
/// Same as [`augment_bands`]; a key column named in the config but absent
/// from `batch` is a [`BandError::Computation`].
pub fn augment_with_config(batch: &RecordBatch, config: &AugmentConfig) -> Result<RecordBatch, BandError> {
    let periods = config.periods.normalize()?;
    let frame = BandFrame::from_parts(batch.clone(), config.group_keys.as_slice())?;
    augment_bands(
        &frame,
        &config.date_column,
        &config.value_column,
        &PeriodSpec::List(periods),
        config.std_multiplier,
        config.backend,
    )
}

/// Method-call form of [`augment_bands`] on the owned table types.
pub trait AugmentBandsExt {
    /// See [`augment_bands`].
    ///
    /// # Errors
    ///
    /// Same as [`augment_bands`].
    fn augment_bands(
        &self,
        date_column: &str,
        value_column: &str,
        periods: impl Into<PeriodSpec>,
        std_multiplier: f64,
        backend: Backend,
    ) -> Result<RecordBatch, BandError>;
}

impl AugmentBandsExt for BandFrame {
    fn augment_bands(
        &self,
        date_column: &str,
        value_column: &str,
        periods: impl Into<PeriodSpec>,
        std_multiplier: f64,
        backend: Backend,
    ) -> Result<RecordBatch, BandError> {
        augment_bands(self, date_column, value_column, &periods.into(), std_multiplier, backend)
    }
}

impl AugmentBandsExt for GroupedFrame {
    fn augment_bands(
        &self,
        date_column: &str,
        value_column: &str,
        periods: impl Into<PeriodSpec>,
        std_multiplier: f64,
        backend: Backend,
    ) -> Result<RecordBatch, BandError> {
        BandFrame::Grouped(self.clone()).augment_bands(date_column, value_column, periods, std_multiplier, backend)
    }
}

impl AugmentBandsExt for RecordBatch {
    fn augment_bands(
        &self,
        date_column: &str,
        value_column: &str,
        periods: impl Into<PeriodSpec>,
        std_multiplier: f64,
        backend: Backend,
    ) -> Result<RecordBatch, BandError> {
        BandFrame::Flat(self.clone()).augment_bands(date_column, value_column, periods, std_multiplier, backend)
    }
}

/// Accumulates output columns on top of the input batch.
struct ColumnAssembler {
    schema: Arc<Schema>,
    fields: Vec<FieldRef>,
    columns: Vec<ArrayRef>,
}

impl ColumnAssembler {
    fn new(batch: &RecordBatch) -> Self {
        let schema = batch.schema();
        Self {
            fields: schema.fields().iter().cloned().collect(),
            columns: batch.columns().to_vec(),
            schema,
        }
    }

    /// Appends `column` as `name`, or replaces the existing column of that name.
    fn put(&mut self, name: &str, column: ArrayRef) {
        let field = Arc::new(Field::new(name, DataType::Float64, true));
        match self.fields.iter().position(|f| f.name() == name) {
            Some(idx) => {
                self.fields[idx] = field;
                self.columns[idx] = column;
            }
            None => {
                self.fields.push(field);
                self.columns.push(column);
            }
        }
    }

    fn finish(self) -> Result<RecordBatch, BandError> {
        let schema = Schema::new_with_metadata(self.fields, self.schema.metadata().clone());
        RecordBatch::try_new(Arc::new(schema), self.columns)
            .map_err(|e| BandError::computation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Date32Array, Float64Array};
    use std::collections::HashMap;

    fn flat_batch(closes: Vec<f64>) -> RecordBatch {
        let n = i32::try_from(closes.len()).unwrap();
        let schema = Schema::new(vec![
            Field::new("date", DataType::Date32, false),
            Field::new("close", DataType::Float64, false),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Date32Array::from((0..n).collect::<Vec<_>>())),
                Arc::new(Float64Array::from(closes)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_assembler_replaces_existing_column() {
        let batch = flat_batch(vec![1.0, 2.0]);
        let mut assembler = ColumnAssembler::new(&batch);
        assembler.put("extra", Arc::new(Float64Array::from(vec![1.0, 2.0])));
        assembler.put("close", Arc::new(Float64Array::from(vec![9.0, 9.0])));

        let out = assembler.finish().unwrap();
        let names: Vec<&str> = out.schema_ref().fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["date", "close", "extra"]);

        let close = out.column(1).as_any().downcast_ref::<Float64Array>().unwrap();
        assert_eq!(close.values().to_vec(), vec![9.0, 9.0]);
    }

    #[test]
    fn test_schema_metadata_preserved() {
        let batch = flat_batch(vec![1.0, 2.0, 3.0]);
        let metadata = HashMap::from([("source".to_string(), "unit-test".to_string())]);
        let schema = Schema::new_with_metadata(batch.schema().fields().clone(), metadata);
        let batch = batch.with_schema(Arc::new(schema)).unwrap();

        let out = batch
            .augment_bands("date", "close", 2_i64, 2.0, Backend::Eager)
            .unwrap();
        assert_eq!(out.schema().metadata().get("source").map(String::as_str), Some("unit-test"));
    }

    #[test]
    fn test_invalid_periods_fail_before_column_checks() {
        let batch = flat_batch(vec![1.0]);
        // value column does not exist either, but configuration is checked first
        let err = batch
            .augment_bands("date", "missing", (5, 3), 2.0, Backend::Eager)
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
