//! Error types for efficiency evaluation and validation.

use thiserror::Error;

use scanner_types::{DetectionBin, ScannerError, TypeOfModule, TypeOfModulePair};

/// Result type for efficiency operations.
pub type Result<T> = std::result::Result<T, EfficiencyError>;

/// Data-integrity faults in a [`DetectionEfficiencies`](scanner_types::DetectionEfficiencies)
/// dataset.
///
/// None of these are recoverable for the affected event: a malformed table is
/// reported, never replaced by a default value.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum EfficiencyError {
    /// Bin decoding failed.
    #[error(transparent)]
    Scanner(#[from] ScannerError),

    /// Module-pair efficiencies exist for a pair with no SGID LUT.
    #[error("module-type pair {pair} has efficiency tables but no SGID LUT")]
    MissingSgidLut {
        /// The pair.
        pair: TypeOfModulePair,
    },

    /// An SGID LUT exists for a pair with no efficiency tables.
    #[error("module-type pair {pair} has an SGID LUT but no efficiency tables")]
    MissingPairTable {
        /// The pair.
        pair: TypeOfModulePair,
    },

    /// A per-type or per-pair container sized for the wrong number of module types.
    #[error("{table} covers {found} module types, scanner has {expected}")]
    TypeCountMismatch {
        /// Which container.
        table: &'static str,
        /// Module types in the scanner.
        expected: usize,
        /// Module types in the container.
        found: usize,
    },

    /// The LUT names an SGID past the end of the efficiency vector.
    #[error("SGID {sgid} for pair {pair} out of range ({num_entries} efficiency tables)")]
    SgidOutOfRange {
        /// The pair.
        pair: TypeOfModulePair,
        /// SGID read from the LUT.
        sgid: u32,
        /// Length of the efficiency vector.
        num_entries: usize,
    },

    /// An efficiency table stored at one SGID claims another.
    #[error("efficiency table at SGID {expected} for pair {pair} is labelled SGID {found}")]
    SgidMismatch {
        /// The pair.
        pair: TypeOfModulePair,
        /// Position in the vector.
        expected: u32,
        /// SGID recorded in the table.
        found: u32,
    },

    /// A LUT entry below `-1`.
    #[error("SGID LUT for pair {pair} has invalid entry {sgid} at modules ({module0}, {module1})")]
    InvalidSgid {
        /// The pair.
        pair: TypeOfModulePair,
        /// First module instance.
        module0: usize,
        /// Second module instance.
        module1: usize,
        /// The entry.
        sgid: i32,
    },

    /// The efficiency vector length is not `max(LUT) + 1`.
    #[error("pair {pair}: largest SGID is {max_sgid} but {num_entries} efficiency tables are stored")]
    NonContiguousSgids {
        /// The pair.
        pair: TypeOfModulePair,
        /// Largest LUT entry (`-1` when none is in coincidence).
        max_sgid: i32,
        /// Length of the efficiency vector.
        num_entries: usize,
    },

    /// The LUT is not `num_modules0 x num_modules1`.
    #[error("SGID LUT for pair {pair} is {found:?}, expected {expected:?}")]
    LutShapeMismatch {
        /// The pair.
        pair: TypeOfModulePair,
        /// `(num_modules0, num_modules1)`.
        expected: (usize, usize),
        /// Actual shape.
        found: (usize, usize),
    },

    /// An efficiency table that is not
    /// `(elements0 * energy0) x (elements1 * energy1)`.
    #[error("efficiency table {sgid} for pair {pair} is {found:?}, expected {expected:?}")]
    ValuesShapeMismatch {
        /// The pair.
        pair: TypeOfModulePair,
        /// SGID of the table.
        sgid: u32,
        /// Required shape.
        expected: (usize, usize),
        /// Actual shape.
        found: (usize, usize),
    },

    /// A bin with no per-bin efficiency entry.
    #[error("no detection-bin efficiency for bin {bin} of module type {type_of_module} ({len} entries)")]
    BinEfficiencyMissing {
        /// Module type of the bin.
        type_of_module: TypeOfModule,
        /// The bin.
        bin: DetectionBin,
        /// Entries stored for this type.
        len: usize,
    },

    /// A per-bin efficiency vector whose length is not `num_detection_bins`.
    #[error("module type {type_of_module} has {found} detection-bin efficiencies, expected {expected}")]
    BinEfficiencyLength {
        /// Module type.
        type_of_module: TypeOfModule,
        /// `num_detection_bins` of the type.
        expected: usize,
        /// Stored length.
        found: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
}

impl EfficiencyError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// The module-type pair involved, when the fault is pair-scoped.
    #[must_use]
    pub fn pair(&self) -> Option<TypeOfModulePair> {
        match self {
            Self::MissingSgidLut { pair }
            | Self::MissingPairTable { pair }
            | Self::SgidOutOfRange { pair, .. }
            | Self::SgidMismatch { pair, .. }
            | Self::InvalidSgid { pair, .. }
            | Self::NonContiguousSgids { pair, .. }
            | Self::LutShapeMismatch { pair, .. }
            | Self::ValuesShapeMismatch { pair, .. } => Some(*pair),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = EfficiencyError::SgidMismatch {
            pair: TypeOfModulePair::new(0, 1),
            expected: 3,
            found: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("(0, 1)"));
        assert!(msg.contains("SGID 3"));
        assert!(msg.contains("SGID 4"));
        assert_eq!(err.pair(), Some(TypeOfModulePair::new(0, 1)));
    }

    #[test]
    fn scanner_errors_convert() {
        let err: EfficiencyError = ScannerError::unknown_type(TypeOfModule(5), 2).into();
        assert!(matches!(err, EfficiencyError::Scanner(_)));
        assert!(err.to_string().contains("module type 5"));
        assert_eq!(err.pair(), None);
    }
}
