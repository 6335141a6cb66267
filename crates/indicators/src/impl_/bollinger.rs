//! Bollinger Bands indicator

use super::rolling::rolling_window_stats;
use crate::traits::effective_window;
use bband_types::Period;

/// Bollinger Bands result containing upper, middle, and lower bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerResult {
    /// Upper band = SMA + std_factor * std
    pub upper: Vec<Option<f64>>,
    /// Middle band = SMA
    pub middle: Vec<Option<f64>>,
    /// Lower band = SMA - std_factor * std
    pub lower: Vec<Option<f64>>,
}

impl BollingerResult {
    fn undefined(len: usize) -> Self {
        Self {
            upper: vec![None; len],
            middle: vec![None; len],
            lower: vec![None; len],
        }
    }
}

/// Bollinger Bands
///
/// Calculates three bands based on standard deviation around a simple moving average:
/// - Upper Band = SMA + (std_factor * StdDev)
/// - Middle Band = SMA
/// - Lower Band = SMA - (std_factor * StdDev)
///
/// Uses the sample standard deviation (n-1). A row gets bands only when its
/// full trailing window is observed, so periods below 2 never produce any.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Period for the SMA and standard deviation
    pub period: Period,
    /// Multiplier for standard deviation (typically 2.0)
    pub std_factor: f64,
}

impl BollingerBands {
    /// Creates new Bollinger Bands with the given parameters.
    #[must_use]
    pub fn new(period: Period, std_factor: f64) -> Self {
        Self { period, std_factor }
    }

    /// Computes all three bands for one contiguous series.
    #[must_use]
    pub fn compute_all(&self, values: &[Option<f64>]) -> BollingerResult {
        let len = values.len();
        let Some(window) = effective_window(self.period).filter(|w| *w <= len) else {
            return BollingerResult::undefined(len);
        };

        let mut result = BollingerResult::undefined(len);
        for (i, stats) in rolling_window_stats(values, window).into_iter().enumerate() {
            if let Some(stats) = stats {
                let band = self.std_factor * stats.std;
                result.middle[i] = Some(stats.mean);
                result.upper[i] = Some(stats.mean + band);
                result.lower[i] = Some(stats.mean - band);
            }
        }
        result
    }

    /// Minimum number of rows for a defined output.
    #[must_use]
    pub fn warmup_periods(&self) -> usize {
        usize::try_from(self.period).unwrap_or(0).max(2)
    }
}
