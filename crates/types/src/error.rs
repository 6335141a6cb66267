use thiserror::Error;

/// Errors surfaced by the Bollinger band engine.
///
/// Configuration errors are raised before any computation starts. Computation
/// errors abort the call; the engine never hands back a partially built table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandError {
    /// Invalid period specification, backend selector or table container
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure while aggregating (non-numeric values, bad key columns, kernel errors)
    #[error("Computation error: {0}")]
    Computation(String),
}

impl BandError {
    /// Creates a `Configuration` error with a message.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        BandError::Configuration(msg.into())
    }

    /// Creates a `Computation` error with a message.
    #[must_use]
    pub fn computation(msg: impl Into<String>) -> Self {
        BandError::Computation(msg.into())
    }

    /// Returns true for configuration errors.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, BandError::Configuration(_))
    }

    /// Returns true for computation errors.
    #[must_use]
    pub fn is_computation(&self) -> bool {
        matches!(self, BandError::Computation(_))
    }
}

impl From<serde_json::Error> for BandError {
    fn from(err: serde_json::Error) -> Self {
        BandError::Configuration(err.to_string())
    }
}
