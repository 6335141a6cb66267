//! Bollinger Band Indicators
//!
//! Rolling Bollinger bands over flat or grouped Arrow tables.
//!
//! # Features
//! - Rolling mean and sample standard deviation over trailing row windows
//! - Any number of window lengths per call, each adding three columns
//! - Independent rolling scopes per group key combination
//! - Two interchangeable backends (eager, columnar) with matching output
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use arrow::array::{Date32Array, Float64Array};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use bband_indicators::{AugmentBandsExt, Backend};
//!
//! let schema = Schema::new(vec![
//!     Field::new("date", DataType::Date32, false),
//!     Field::new("close", DataType::Float64, false),
//! ]);
//! let batch = RecordBatch::try_new(
//!     Arc::new(schema),
//!     vec![
//!         Arc::new(Date32Array::from(vec![0, 1, 2])),
//!         Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
//!     ],
//! )?;
//!
//! let out = batch.augment_bands("date", "close", 3_i64, 2.0, Backend::Eager)?;
//! assert_eq!(out.num_columns(), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(clippy::all)]

pub mod backend;
pub mod engine;
pub mod impl_;
pub mod traits;

// Re-export main types
pub use backend::{ColumnarBackend, EagerBackend, backend_for};
pub use bband_data::{BandFrame, GroupedFrame};
pub use bband_types::{AugmentConfig, Backend, BandColumns, BandError, Period, PeriodSpec};
pub use engine::{AugmentBandsExt, augment_bands, augment_with_config};
pub use traits::{BandArrays, BandBackend};

// Re-export indicator implementations
pub use impl_::{
    bollinger::{BollingerBands, BollingerResult},
    rolling::WindowStats,
};
