//! Modular PET scanner toolkit.
//!
//! This umbrella crate re-exports all scanner-* crates: the geometry data
//! model, the detection-bin codec, detection-efficiency evaluation through
//! symmetry-group lookup tables, synthetic scanners and event generation, and
//! header/event summaries. All crates are Layer 0 with no I/O.
//!
//! # Quick Start
//!
//! ```
//! use scanner::prelude::*;
//!
//! // A two-module-type scanner with synthetic efficiencies
//! let scanner = scanner::synth::scanner_information(&[
//!     CylindricalBlocksConfig::large_ring().with_modules(6, 1),
//!     CylindricalBlocksConfig::half_ring_insert().with_modules(4, 1),
//! ])
//! .unwrap();
//!
//! // Bin codec
//! let codec = BinCodec::new(&scanner).unwrap();
//! let bin = codec.encode(TypeOfModule(0), ExpandedDetectionBin::new(2, 5, 1)).unwrap();
//! assert_eq!(codec.expand(TypeOfModule(0), bin).unwrap(), ExpandedDetectionBin::new(2, 5, 1));
//!
//! // Efficiency of a coincidence
//! let model = EfficiencyModel::new(&scanner).unwrap();
//! let pair = TypeOfModulePair::new(0, 0);
//! let other = codec.encode(TypeOfModule(0), ExpandedDetectionBin::new(4, 0, 0)).unwrap();
//! assert!(model.efficiency(pair, bin, other).unwrap() > 0.0);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - transforms, shapes, replication tree, bin ids, efficiency tables, events
//! - [`bins`] - `expand`/`encode`, bin counts, element placement
//! - [`efficiency`] - `detection_efficiency`, `EfficiencyModel`, validation
//! - [`synth`] - cylindrical scanners, SGID LUT construction, event generation
//! - [`analysis`] - `ScannerSummary` and event statistics
//!
//! # Feature Flags
//!
//! - `serde` - serialization for every data type

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Transforms, shapes, replication tree, bin ids, efficiency tables, events.
pub use scanner_types as types;

/// Detection-bin codec and element placement.
pub use scanner_bins as bins;

/// Detection-efficiency evaluation.
pub use scanner_efficiency as efficiency;

/// Synthetic scanners and event generation.
pub use scanner_synth as synth;

/// Header summaries and event statistics.
pub use scanner_analysis as analysis;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for scanner work.
///
/// # Usage
///
/// ```
/// use scanner::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use scanner_types::{
        BinEdges, CoincidenceEvent, DetectionBin, DetectionEfficiencies, EventTimeBlock,
        ExpandedDetectionBin, PairTable, RigidTransform, ScannerGeometry, ScannerInformation,
        TypeOfModule, TypeOfModulePair,
    };

    // Codec
    pub use scanner_bins::{BinCodec, BinLayout};

    // Efficiency
    pub use scanner_efficiency::{
        EfficiencyModel, EvaluationConfig, detection_efficiency, validate_efficiencies,
    };

    // Synthesis
    pub use scanner_synth::{CylindricalBlocksConfig, EventGenerator, GeneratorConfig};

    // Analysis
    pub use scanner_analysis::{EventStatistics, ScannerSummary, summarize_time_blocks};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let scanner = ScannerInformation::new("bare", ScannerGeometry::default(), Vec::new());
        assert_eq!(scanner.number_of_module_types(), 0);
        assert!(EvaluationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::RigidTransform::identity();
        let _ = efficiency::EvaluationConfig::serial();
        let _ = synth::GeneratorConfig::default();
        let _ = bins::BinLayout::new(types::TypeOfModule(0), 1, 1, 1);
    }
}
