//! Indicator implementations

pub mod bollinger;
pub mod rolling;
