//! Rolling window period specifications.
//!
//! A request may name its window lengths as a single integer, an inclusive
//! range or an explicit list. [`PeriodSpec::normalize`] turns any of them into
//! the ordered sequence the engine iterates, which also fixes the order of the
//! output columns.

use serde::Serialize;
use serde_json::Value;

use crate::error::BandError;

/// Width of one rolling window, in rows.
///
/// Signed on purpose: non-positive values are passed through untouched and
/// produce all-undefined bands instead of being rejected.
pub type Period = i64;

/// Default window length.
pub const DEFAULT_PERIOD: Period = 20;

/// Largest number of periods a range may expand to.
pub const MAX_RANGE_LEN: u64 = 10_000;

/// The accepted shapes of a period request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PeriodSpec {
    /// One window length.
    Single(Period),
    /// Every window length from `start` to `end`, both inclusive.
    Range {
        /// First period of the range.
        start: Period,
        /// Last period of the range.
        end: Period,
    },
    /// Explicit window lengths, order preserved, duplicates kept.
    List(Vec<Period>),
}

impl PeriodSpec {
    /// Creates an inclusive range specification.
    #[must_use]
    pub fn range(start: Period, end: Period) -> Self {
        PeriodSpec::Range { start, end }
    }

    /// Expands the specification into the ordered period sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BandError::Configuration`] for a range whose end lies before
    /// its start or that spans more than [`MAX_RANGE_LEN`] periods.
    pub fn normalize(&self) -> Result<Vec<Period>, BandError> {
        match self {
            PeriodSpec::Single(period) => Ok(vec![*period]),
            PeriodSpec::Range { start, end } => {
                if end < start {
                    return Err(BandError::configuration(format!(
                        "Invalid periods range: end {end} is before start {start}"
                    )));
                }
                let span = end.abs_diff(*start);
                if span >= MAX_RANGE_LEN {
                    return Err(BandError::configuration(format!(
                        "Invalid periods range: {start}..={end} expands to more than {MAX_RANGE_LEN} periods"
                    )));
                }
                Ok((*start..=*end).collect())
            }
            PeriodSpec::List(periods) => Ok(periods.clone()),
        }
    }

    /// Interprets a dynamically typed value (e.g. from a JSON document).
    ///
    /// Integers become [`PeriodSpec::Single`], `{"start": a, "end": b}`
    /// objects become [`PeriodSpec::Range`] and arrays of integers become
    /// [`PeriodSpec::List`].
    ///
    /// # Errors
    ///
    /// Returns [`BandError::Configuration`] for any other shape.
    pub fn from_value(value: &Value) -> Result<Self, BandError> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .map(PeriodSpec::Single)
                .ok_or_else(|| unsupported(value)),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_i64().ok_or_else(|| unsupported(value)))
                .collect::<Result<Vec<_>, _>>()
                .map(PeriodSpec::List),
            Value::Object(map) if map.len() == 2 => {
                let start = map.get("start").and_then(Value::as_i64);
                let end = map.get("end").and_then(Value::as_i64);
                match (start, end) {
                    (Some(start), Some(end)) => Ok(PeriodSpec::Range { start, end }),
                    _ => Err(unsupported(value)),
                }
            }
            _ => Err(unsupported(value)),
        }
    }
}

fn unsupported(value: &Value) -> BandError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "non-integer number",
        Value::String(_) => "string",
        Value::Array(_) => "array with non-integer items",
        Value::Object(_) => "object",
    };
    BandError::configuration(format!(
        "Invalid periods specification: type {kind} ({value}). Use an integer, a {{\"start\", \"end\"}} range or a list of integers"
    ))
}

impl Default for PeriodSpec {
    fn default() -> Self {
        PeriodSpec::Single(DEFAULT_PERIOD)
    }
}

impl From<Period> for PeriodSpec {
    fn from(period: Period) -> Self {
        PeriodSpec::Single(period)
    }
}

impl From<usize> for PeriodSpec {
    fn from(period: usize) -> Self {
        PeriodSpec::Single(Period::try_from(period).unwrap_or(Period::MAX))
    }
}

impl From<(Period, Period)> for PeriodSpec {
    fn from((start, end): (Period, Period)) -> Self {
        PeriodSpec::Range { start, end }
    }
}

impl From<Vec<Period>> for PeriodSpec {
    fn from(periods: Vec<Period>) -> Self {
        PeriodSpec::List(periods)
    }
}

impl From<&[Period]> for PeriodSpec {
    fn from(periods: &[Period]) -> Self {
        PeriodSpec::List(periods.to_vec())
    }
}

impl<'de> serde::Deserialize<'de> for PeriodSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        PeriodSpec::from_value(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_single_normalizes_to_one_element() {
        assert_eq!(PeriodSpec::Single(5).normalize().unwrap(), vec![5]);
        assert_eq!(
            PeriodSpec::from(5_i64).normalize().unwrap(),
            PeriodSpec::List(vec![5]).normalize().unwrap()
        );
    }

    #[test]
    fn test_range_is_inclusive() {
        assert_eq!(PeriodSpec::range(3, 5).normalize().unwrap(), vec![3, 4, 5]);
        assert_eq!(PeriodSpec::from((7, 7)).normalize().unwrap(), vec![7]);
    }

    #[test]
    fn test_reversed_range_is_configuration_error() {
        let err = PeriodSpec::range(5, 3).normalize().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_oversized_range_is_configuration_error() {
        let err = PeriodSpec::range(0, i64::MAX).normalize().unwrap_err();
        assert!(err.is_configuration());

        let err = PeriodSpec::from_value(&json!({"start": 0, "end": i64::MAX}))
            .unwrap()
            .normalize()
            .unwrap_err();
        assert!(err.is_configuration());

        let end = i64::try_from(MAX_RANGE_LEN).unwrap();
        assert_eq!(PeriodSpec::range(1, end).normalize().unwrap().len(), 10_000);
        assert!(PeriodSpec::range(0, end).normalize().is_err());
    }

    #[test]
    fn test_list_keeps_order_and_duplicates() {
        let spec = PeriodSpec::from(vec![40, 20, 40, 0, -3]);
        assert_eq!(spec.normalize().unwrap(), vec![40, 20, 40, 0, -3]);
    }

    #[test]
    fn test_default_is_twenty() {
        assert_eq!(PeriodSpec::default().normalize().unwrap(), vec![DEFAULT_PERIOD]);
    }

    #[test]
    fn test_from_value_shapes() {
        assert_eq!(PeriodSpec::from_value(&json!(20)).unwrap(), PeriodSpec::Single(20));
        assert_eq!(
            PeriodSpec::from_value(&json!({"start": 3, "end": 5})).unwrap(),
            PeriodSpec::range(3, 5)
        );
        assert_eq!(
            PeriodSpec::from_value(&json!([20, 40])).unwrap(),
            PeriodSpec::List(vec![20, 40])
        );
    }

    #[test]
    fn test_from_value_rejects_other_types() {
        for value in [
            json!("20"),
            json!(2.5),
            json!(true),
            json!(null),
            json!([1, "2"]),
            json!({"start": 3}),
            json!({"start": 3, "stop": 5}),
        ] {
            let err = PeriodSpec::from_value(&value).unwrap_err();
            assert!(err.is_configuration(), "{value} should be rejected");
        }
    }

    #[test]
    fn test_serde_roundtrip_shapes() {
        for spec in [
            PeriodSpec::Single(10),
            PeriodSpec::range(2, 4),
            PeriodSpec::List(vec![5, 10]),
        ] {
            let json = serde_json::to_string(&spec).unwrap();
            let back: PeriodSpec = serde_json::from_str(&json).unwrap();
            assert_eq!(back, spec);
        }
    }

    proptest! {
        #[test]
        fn prop_range_matches_explicit_list(start in -5_i64..50, len in 0_i64..30) {
            let end = start + len;
            let expected: Vec<Period> = (start..=end).collect();
            prop_assert_eq!(PeriodSpec::range(start, end).normalize().unwrap(), expected);
        }

        #[test]
        fn prop_single_matches_singleton_list(period in -10_i64..500) {
            prop_assert_eq!(
                PeriodSpec::Single(period).normalize().unwrap(),
                PeriodSpec::List(vec![period]).normalize().unwrap()
            );
        }
    }
}
