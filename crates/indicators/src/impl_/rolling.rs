//! Trailing-window statistics over a series with gaps.

/// Mean and unbiased standard deviation of one full window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
}

/// Statistics of `window`, or `None` if it holds a missing observation or
/// fewer than two observations.
#[must_use]
pub fn window_stats(window: &[Option<f64>]) -> Option<WindowStats> {
    if window.len() < 2 {
        return None;
    }
    let observed: Vec<f64> = window.iter().copied().collect::<Option<_>>()?;

    #[allow(clippy::cast_precision_loss)]
    let n = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / n;
    let variance = observed
        .iter()
        .map(|x| {
            let dev = x - mean;
            dev * dev
        })
        .sum::<f64>()
        / (n - 1.0);

    Some(WindowStats {
        mean,
        std: variance.sqrt(),
    })
}

/// Statistics of every trailing window of width `window` over `values`.
///
/// Entry `i` covers `values[i + 1 - window..=i]`; the first `window - 1`
/// entries are `None`, as is every entry when the series is shorter than
/// the window.
#[must_use]
pub fn rolling_window_stats(values: &[Option<f64>], window: usize) -> Vec<Option<WindowStats>> {
    let len = values.len();
    let mut result = vec![None; len];

    if window == 0 || len < window {
        return result;
    }

    for i in (window - 1)..len {
        result[i] = window_stats(&values[i + 1 - window..=i]);
    }

    result
}
