//! Configuration for efficiency evaluation.
//!
//! # Example
//!
//! ```
//! use scanner_efficiency::EvaluationConfig;
//!
//! let config = EvaluationConfig::default()
//!     .with_apply_calibration(false)
//!     .with_parallel(false);
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EfficiencyError, Result};

/// Controls how efficiencies are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationConfig {
    /// Multiply by the scanner-wide calibration factor.
    pub apply_calibration: bool,

    /// Evaluate large batches on the rayon thread pool.
    pub parallel: bool,

    /// Smallest batch evaluated in parallel. Below this the thread-pool
    /// overhead dominates the O(1) per-event cost.
    pub min_parallel_events: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            apply_calibration: true,
            parallel: true,
            min_parallel_events: 4096,
        }
    }
}

impl EvaluationConfig {
    /// Single-threaded evaluation, for deterministic profiling or callers
    /// that already parallelize over batches.
    #[must_use]
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Relative efficiencies, without the calibration factor.
    #[must_use]
    pub fn uncalibrated() -> Self {
        Self {
            apply_calibration: false,
            ..Self::default()
        }
    }

    /// Set whether the calibration factor is applied.
    #[must_use]
    pub const fn with_apply_calibration(mut self, apply: bool) -> Self {
        self.apply_calibration = apply;
        self
    }

    /// Enable or disable parallel batch evaluation.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the smallest batch evaluated in parallel.
    #[must_use]
    pub const fn with_min_parallel_events(mut self, count: usize) -> Self {
        self.min_parallel_events = count;
        self
    }

    /// Whether a batch of `len` events goes to the thread pool.
    #[must_use]
    pub const fn use_parallel(&self, len: usize) -> bool {
        self.parallel && len >= self.min_parallel_events
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EfficiencyError::InvalidConfig`] if parallel evaluation is
    /// enabled with a zero batch threshold.
    pub fn validate(&self) -> Result<()> {
        if self.parallel && self.min_parallel_events == 0 {
            return Err(EfficiencyError::invalid_config(
                "min_parallel_events must be at least 1 when parallel evaluation is enabled",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EvaluationConfig::default();
        assert!(config.apply_calibration);
        assert!(config.parallel);
        assert_eq!(config.min_parallel_events, 4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets() {
        assert!(!EvaluationConfig::serial().parallel);
        assert!(EvaluationConfig::serial().apply_calibration);
        assert!(!EvaluationConfig::uncalibrated().apply_calibration);
    }

    #[test]
    fn parallel_threshold() {
        let config = EvaluationConfig::default().with_min_parallel_events(10);
        assert!(!config.use_parallel(9));
        assert!(config.use_parallel(10));
        assert!(!config.with_parallel(false).use_parallel(1000));
    }

    #[test]
    fn zero_threshold_rejected() {
        let config = EvaluationConfig::default().with_min_parallel_events(0);
        assert!(config.validate().is_err());
        assert!(config.with_parallel(false).validate().is_ok());
    }
}
