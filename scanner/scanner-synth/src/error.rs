//! Error types for synthetic scanner construction and event generation.

use thiserror::Error;

use scanner_efficiency::EfficiencyError;
use scanner_types::{ScannerError, TypeOfModulePair};

/// Result type for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors raised while building synthetic scanners or sampling events.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SynthError {
    /// Geometry or bin indexing failed.
    #[error(transparent)]
    Scanner(#[from] ScannerError),

    /// Efficiency evaluation failed.
    #[error(transparent)]
    Efficiency(#[from] EfficiencyError),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },

    /// The acceptance-rejection loop found no bin pair with nonzero efficiency.
    #[error("no coincident bin pair found for module-type pair {pair} after {attempts} attempts")]
    NoCoincidenceFound {
        /// The pair sampled.
        pair: TypeOfModulePair,
        /// Attempts made.
        attempts: usize,
    },
}

impl SynthError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
