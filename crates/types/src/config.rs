use std::path::Path;

use crate::backend::Backend;
use crate::error::BandError;
use crate::periods::PeriodSpec;

/// Default number of standard deviations between the middle and outer bands.
pub const DEFAULT_STD_MULTIPLIER: f64 = 2.0;

/// A complete band request: which columns to read, which windows to compute,
/// how wide the bands are and which backend evaluates them.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AugmentConfig {
    /// Date/time column, checked for a temporal type but not used for windowing
    pub date_column: String,
    /// Numeric column the bands are computed from
    pub value_column: String,
    /// Window lengths
    pub periods: PeriodSpec,
    /// Multiple of the rolling standard deviation added to / subtracted from the mean
    pub std_multiplier: f64,
    /// Partition columns; empty means the whole table is one series
    pub group_keys: Vec<String>,
    /// Execution backend
    pub backend: Backend,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct AugmentConfigRaw {
    date_column: String,
    value_column: String,
    #[serde(default)]
    periods: Option<serde_json::Value>,
    #[serde(default = "default_std_multiplier")]
    std_multiplier: f64,
    #[serde(default)]
    group_keys: Vec<String>,
    #[serde(default)]
    backend: Option<String>,
}

fn default_std_multiplier() -> f64 {
    DEFAULT_STD_MULTIPLIER
}

impl TryFrom<AugmentConfigRaw> for AugmentConfig {
    type Error = BandError;

    fn try_from(raw: AugmentConfigRaw) -> Result<Self, Self::Error> {
        let periods = match raw.periods {
            Some(value) => PeriodSpec::from_value(&value)?,
            None => PeriodSpec::default(),
        };
        let backend = match raw.backend {
            Some(name) => name.parse()?,
            None => Backend::default(),
        };

        Ok(Self {
            date_column: raw.date_column,
            value_column: raw.value_column,
            periods,
            std_multiplier: raw.std_multiplier,
            group_keys: raw.group_keys,
            backend,
        })
    }
}

impl<'de> serde::Deserialize<'de> for AugmentConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = AugmentConfigRaw::deserialize(deserializer)?;
        raw.try_into().map_err(serde::de::Error::custom)
    }
}

impl AugmentConfig {
    /// Creates a request with default periods (20), multiplier (2.0), no
    /// grouping and the eager backend.
    #[must_use]
    pub fn new(date_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            value_column: value_column.into(),
            periods: PeriodSpec::default(),
            std_multiplier: DEFAULT_STD_MULTIPLIER,
            group_keys: Vec::new(),
            backend: Backend::default(),
        }
    }

    /// Sets the window lengths.
    #[must_use]
    pub fn with_periods(mut self, periods: impl Into<PeriodSpec>) -> Self {
        self.periods = periods.into();
        self
    }

    /// Sets the standard deviation multiplier.
    #[must_use]
    pub fn with_std_multiplier(mut self, std_multiplier: f64) -> Self {
        self.std_multiplier = std_multiplier;
        self
    }

    /// Sets the partition columns.
    #[must_use]
    pub fn with_group_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Parses a request from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`BandError::Configuration`] for malformed JSON, unknown
    /// fields, an unsupported `periods` shape or an unknown backend.
    pub fn from_json_str(json: &str) -> Result<Self, BandError> {
        let raw: AugmentConfigRaw = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Reads and parses a JSON request file.
    ///
    /// # Errors
    ///
    /// Returns [`BandError::Configuration`] if the file cannot be read or
    /// does not hold a valid request.
    pub fn from_path(path: &Path) -> Result<Self, BandError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            BandError::configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}
