//! Backend strategy trait and its output container.

use arrow::array::{ArrayRef, Float64Array};
use bband_data::Partitions;
use bband_types::{BandError, Period};
use std::sync::Arc;

/// The three band series for one period, aligned to the input rows.
///
/// Undefined cells are nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct BandArrays {
    /// Rolling mean
    pub middle: Float64Array,
    /// Mean + multiplier * rolling std
    pub upper: Float64Array,
    /// Mean - multiplier * rolling std
    pub lower: Float64Array,
}

impl BandArrays {
    /// All-null bands for `len` rows.
    #[must_use]
    pub fn undefined(len: usize) -> Self {
        Self {
            middle: Float64Array::new_null(len),
            upper: Float64Array::new_null(len),
            lower: Float64Array::new_null(len),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    /// Returns true when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }

    /// Columns in output order: middle, upper, lower.
    #[must_use]
    pub fn into_columns(self) -> [ArrayRef; 3] {
        [
            Arc::new(self.middle),
            Arc::new(self.upper),
            Arc::new(self.lower),
        ]
    }
}

/// A strategy for evaluating rolling Bollinger bands over a partitioned series.
///
/// Implementations must agree numerically, must not reorder rows and must
/// write every row of the output exactly once.
pub trait BandBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Computes the bands for one `period` over every partition of `values`.
    ///
    /// `values` holds one entry per input row (nulls are missing observations).
    /// Rows with fewer than `period` predecessors-or-self in their partition,
    /// windows with a missing observation, and periods below 2 yield nulls.
    ///
    /// # Errors
    ///
    /// Returns [`BandError::Computation`] when a kernel fails.
    fn compute(
        &self,
        values: &Float64Array,
        partitions: &Partitions,
        period: Period,
        std_multiplier: f64,
    ) -> Result<BandArrays, BandError>;
}

/// Window width as `usize` when it can produce defined values at all.
///
/// The unbiased standard deviation is undefined for a single observation, so
/// periods below 2 never yield bands.
#[must_use]
pub fn effective_window(period: Period) -> Option<usize> {
    usize::try_from(period).ok().filter(|p| *p >= 2)
}
