//! Error types for scanner descriptions and bin indexing.

use thiserror::Error;

use crate::ids::{DetectionBin, ExpandedDetectionBin, TypeOfModule};

/// Result type for scanner operations.
pub type Result<T> = std::result::Result<T, ScannerError>;

/// Errors raised while indexing into a scanner description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScannerError {
    /// A module type past the end of the geometry.
    #[error("module type {type_of_module} does not exist (scanner has {num_module_types} types)")]
    UnknownModuleType {
        /// The requested type.
        type_of_module: TypeOfModule,
        /// Number of types the scanner has.
        num_module_types: usize,
    },

    /// A module type whose energy binning has no bins.
    #[error("module type {type_of_module} has no event energy bins")]
    NoEnergyBins {
        /// The offending type.
        type_of_module: TypeOfModule,
    },

    /// A detection bin outside `[0, num_detection_bins)`.
    #[error("detection bin {bin} out of range for module type {type_of_module} ({num_detection_bins} bins)")]
    DetectionBinOutOfRange {
        /// Module type of the bin.
        type_of_module: TypeOfModule,
        /// The bin.
        bin: DetectionBin,
        /// Number of bins of this type.
        num_detection_bins: usize,
    },

    /// An expanded bin with an index past its cardinality.
    #[error(
        "expanded bin {expanded} out of range for module type {type_of_module} \
         ({num_modules} modules, {num_elements_per_module} elements, {num_energy_bins} energy bins)"
    )]
    ExpandedBinOutOfRange {
        /// Module type of the bin.
        type_of_module: TypeOfModule,
        /// The expanded bin.
        expanded: ExpandedDetectionBin,
        /// Module count of this type.
        num_modules: usize,
        /// Elements per module of this type.
        num_elements_per_module: usize,
        /// Energy bins of this type.
        num_energy_bins: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
}

impl ScannerError {
    /// Creates an unknown module type error.
    #[must_use]
    pub const fn unknown_type(type_of_module: TypeOfModule, num_module_types: usize) -> Self {
        Self::UnknownModuleType {
            type_of_module,
            num_module_types,
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScannerError::unknown_type(TypeOfModule(3), 2);
        let msg = err.to_string();
        assert!(msg.contains("module type 3"));
        assert!(msg.contains("2 types"));
    }

    #[test]
    fn bin_out_of_range_display() {
        let err = ScannerError::DetectionBinOutOfRange {
            type_of_module: TypeOfModule(0),
            bin: DetectionBin(24),
            num_detection_bins: 24,
        };
        let msg = err.to_string();
        assert!(msg.contains("24"));
        assert!(msg.contains("module type 0"));
    }

    #[test]
    fn invalid_config_display() {
        let err = ScannerError::invalid_config("radius must be positive");
        assert!(err.to_string().contains("radius must be positive"));
    }
}
