use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, UInt32Array};
use arrow::compute::kernels::numeric::{add, div, mul, sub};
use arrow::compute::take;
use arrow::datatypes::Float64Type;
use arrow::error::ArrowError;
use bband_data::Partitions;
use bband_types::{BandError, Period};

use crate::traits::{BandArrays, BandBackend, effective_window};

/// Evaluates the window as column expressions.
///
/// For every lag `0..period` a gather index maps each row to its
/// predecessor inside the same partition (null past the partition start),
/// so `take` materializes the lagged column with nulls exactly where the
/// window is incomplete. Mean and variance are then composed from Arrow
/// arithmetic kernels, which propagate those nulls. Rows never move.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnarBackend;

impl BandBackend for ColumnarBackend {
    fn name(&self) -> &'static str {
        "columnar"
    }

    fn compute(
        &self,
        values: &Float64Array,
        partitions: &Partitions,
        period: Period,
        std_multiplier: f64,
    ) -> Result<BandArrays, BandError> {
        let len = values.len();
        if partitions.num_rows() != len {
            return Err(BandError::computation(format!(
                "partitions cover {} rows, value column has {len}",
                partitions.num_rows()
            )));
        }

        match effective_window(period).filter(|w| *w <= partitions.max_len()) {
            Some(window) => evaluate(values, partitions, window, std_multiplier)
                .map_err(|e| BandError::computation(e.to_string())),
            None => Ok(BandArrays::undefined(len)),
        }
    }
}

/// Gather indices pointing each row at its predecessor `lag` rows back in
/// its partition.
fn lag_indices(partitions: &Partitions, lag: usize) -> Result<UInt32Array, ArrowError> {
    (0..partitions.num_rows())
        .map(|row| partitions.lagged_row(row, lag).map(u32::try_from).transpose())
        .collect::<Result<UInt32Array, _>>()
        .map_err(|_| ArrowError::ComputeError("row index exceeds u32 range".to_string()))
}

fn lagged(values: &Float64Array, partitions: &Partitions, lag: usize) -> Result<ArrayRef, ArrowError> {
    take(values, &lag_indices(partitions, lag)?, None)
}

fn to_f64(array: &ArrayRef) -> Result<Float64Array, ArrowError> {
    array
        .as_primitive_opt::<Float64Type>()
        .cloned()
        .ok_or_else(|| ArrowError::CastError(format!("expected Float64, got {}", array.data_type())))
}

#[allow(clippy::cast_precision_loss)]
fn evaluate(
    values: &Float64Array,
    partitions: &Partitions,
    window: usize,
    std_multiplier: f64,
) -> Result<BandArrays, ArrowError> {
    // oldest lag first so the summation order matches a forward window scan
    let lags = (0..window)
        .rev()
        .map(|lag| lagged(values, partitions, lag))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sum: Option<ArrayRef> = None;
    for column in &lags {
        sum = Some(match sum {
            Some(acc) => add(&acc, column)?,
            None => Arc::clone(column),
        });
    }
    let sum = sum.ok_or_else(|| ArrowError::ComputeError("empty window".to_string()))?;
    let mean = div(&sum, &Float64Array::new_scalar(window as f64))?;

    let mut sum_sq: Option<ArrayRef> = None;
    for column in &lags {
        let dev = sub(column, &mean)?;
        let sq = mul(&dev, &dev)?;
        sum_sq = Some(match sum_sq {
            Some(acc) => add(&acc, &sq)?,
            None => sq,
        });
    }
    let sum_sq = sum_sq.ok_or_else(|| ArrowError::ComputeError("empty window".to_string()))?;
    let variance = to_f64(&div(&sum_sq, &Float64Array::new_scalar((window - 1) as f64))?)?;

    let std: Float64Array = variance.unary::<_, Float64Type>(f64::sqrt);
    let band = mul(&std, &Float64Array::new_scalar(std_multiplier))?;

    Ok(BandArrays {
        upper: to_f64(&add(&mean, &band)?)?,
        lower: to_f64(&sub(&mean, &band)?)?,
        middle: to_f64(&mean)?,
    })
}
