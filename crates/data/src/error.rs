//! Data-layer error types.

use arrow::error::ArrowError;
use bband_types::BandError;
use thiserror::Error;

/// Errors that can occur while inspecting or partitioning an input table.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required column is missing.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column has an unexpected data type.
    #[error("Invalid column type for {column}: expected {expected}, got {actual}")]
    InvalidColumnType {
        /// Name of the offending column.
        column: String,
        /// Human readable description of the accepted types.
        expected: &'static str,
        /// Observed Arrow data type.
        actual: String,
    },

    /// The table container itself is not usable (e.g. grouped without keys).
    #[error("Unsupported table: {0}")]
    UnsupportedTable(String),

    /// An Arrow kernel or row conversion failed.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl From<DataError> for BandError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::UnsupportedTable(_) => BandError::Configuration(err.to_string()),
            DataError::MissingColumn(_)
            | DataError::InvalidColumnType { .. }
            | DataError::Arrow(_) => BandError::Computation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_table_maps_to_configuration() {
        let err: BandError = DataError::UnsupportedTable("no keys".to_string()).into();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_column_errors_map_to_computation() {
        let err: BandError = DataError::MissingColumn("close".to_string()).into();
        assert!(err.is_computation());
        assert_eq!(err.to_string(), "Computation error: Missing column: close");

        let err: BandError = DataError::InvalidColumnType {
            column: "close".to_string(),
            expected: "numeric",
            actual: "Utf8".to_string(),
        }
        .into();
        assert!(err.is_computation());
    }

    #[test]
    fn test_arrow_error_maps_to_computation() {
        let err: DataError = ArrowError::ComputeError("boom".to_string()).into();
        let err: BandError = err.into();
        assert!(err.is_computation());
    }
}
