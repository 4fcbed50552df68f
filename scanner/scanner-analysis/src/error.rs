//! Error types for scanner analysis.

use thiserror::Error;

use scanner_efficiency::EfficiencyError;
use scanner_types::ScannerError;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while summarising a scanner or its events.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnalysisError {
    /// A bin or module type could not be resolved.
    #[error(transparent)]
    Scanner(#[from] ScannerError),

    /// Efficiency evaluation failed.
    #[error(transparent)]
    Efficiency(#[from] EfficiencyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner_types::TypeOfModule;

    #[test]
    fn wraps_scanner_errors() {
        let err: AnalysisError = ScannerError::NoEnergyBins {
            type_of_module: TypeOfModule(1),
        }
        .into();
        assert!(matches!(err, AnalysisError::Scanner(_)));
        assert!(err.to_string().contains('1'));
    }
}
