use crate::error::BandError;

/// Execution strategy used to evaluate the rolling windows.
///
/// Both strategies implement the same contract and agree numerically; the
/// choice only affects how the work is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Per-partition windowed slices evaluated row by row
    #[default]
    Eager,
    /// Lagged-column expressions evaluated with Arrow kernels
    Columnar,
}

impl Backend {
    /// All selectable backends.
    pub const ALL: [Backend; 2] = [Backend::Eager, Backend::Columnar];

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Eager => "eager",
            Backend::Columnar => "columnar",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = BandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "eager" | "pandas" => Ok(Backend::Eager),
            "b" | "columnar" | "polars" => Ok(Backend::Columnar),
            other => Err(BandError::configuration(format!(
                "Invalid backend '{other}'. Use 'eager' (a) or 'columnar' (b)"
            ))),
        }
    }
}
