//! Output column naming.

use crate::periods::Period;

/// Names of the three band columns produced for one value column and period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BandColumns {
    /// `{value}_bband_middle_{period}`
    pub middle: String,
    /// `{value}_bband_upper_{period}`
    pub upper: String,
    /// `{value}_bband_lower_{period}`
    pub lower: String,
}

impl BandColumns {
    /// Builds the column names for `value_column` and `period`.
    #[must_use]
    pub fn new(value_column: &str, period: Period) -> Self {
        Self {
            middle: format!("{value_column}_bband_middle_{period}"),
            upper: format!("{value_column}_bband_upper_{period}"),
            lower: format!("{value_column}_bband_lower_{period}"),
        }
    }

    /// Names in output order: middle, upper, lower.
    #[must_use]
    pub fn names(&self) -> [&str; 3] {
        [&self.middle, &self.upper, &self.lower]
    }
}
