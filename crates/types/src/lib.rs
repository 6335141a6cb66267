//! Bollinger Band Types
//!
//! Shared vocabulary for the rolling band engine: period specifications and
//! their normalization, backend selection, request configuration, output
//! column naming and the error taxonomy.

#![deny(clippy::all)]

pub mod backend;
pub mod columns;
pub mod config;
pub mod error;
pub mod periods;

// Re-export main types for convenience
pub use backend::Backend;
pub use columns::BandColumns;
pub use config::AugmentConfig;
pub use error::BandError;
pub use periods::{DEFAULT_PERIOD, MAX_RANGE_LEN, Period, PeriodSpec};
