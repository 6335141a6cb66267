//! Bollinger Band Data
//!
//! Owned table abstraction for the band engine: flat and grouped Arrow
//! record batches, row partitioning by key columns, value extraction and the
//! precondition checks run before any computation.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Data-layer error types.
pub mod error;
/// Flat / grouped table container.
pub mod frame;
/// Row partitioning by key columns.
pub mod partition;
/// Precondition checks on table shape and column types.
pub mod validation;
/// Value column extraction.
pub mod values;

/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: tagged flat/grouped table.
pub use frame::BandFrame;
/// Re-export: record batch bound to its partition keys.
pub use frame::GroupedFrame;
/// Re-export: row partitioning result.
pub use partition::Partitions;
/// Re-export: date column check.
pub use validation::check_date_column;
/// Re-export: all checks for one request.
pub use validation::check_frame;
/// Re-export: key column check.
pub use validation::check_group_keys;
/// Re-export: value column check.
pub use validation::check_value_column;
/// Re-export: value column as nullable `f64`.
pub use values::value_series;
