//! Detection-efficiency evaluation for modular PET scanners.
//!
//! The efficiency of a coincidence between two detection bins is the product
//! of:
//!
//! 1. the scanner-wide calibration factor (optional per call),
//! 2. the per-bin efficiency of each bin,
//! 3. the module-pair efficiency of the pair's symmetry group.
//!
//! Storing one table per module-instance pair is quadratic in the number of
//! modules. Instead an SGID lookup table maps each `(module0, module1)` to a
//! symmetry group, and only one table per group is stored. LUT entry `-1`
//! marks module pairs that are never in coincidence.
//!
//! # Entry Points
//!
//! - [`detection_efficiency`] - one bin pair, straight from a
//!   [`ScannerInformation`](scanner_types::ScannerInformation)
//! - [`EfficiencyModel`] - bound to a scanner with cached bin layouts; batch
//!   and time-block evaluation, parallel over events via rayon
//! - [`validate_efficiencies`] - eager structural checks after loading
//!
//! # Missing Data
//!
//! Absent tables are not errors. A scanner without efficiencies evaluates to
//! 1 everywhere (logged once by [`EfficiencyModel::new`]); a missing per-bin
//! or module-pair part contributes a factor of 1. Inconsistent tables are
//! always reported as an [`EfficiencyError`].
//!
//! # Example
//!
//! ```
//! use scanner_efficiency::{EfficiencyModel, EvaluationConfig};
//! use scanner_types::{
//!     BinEdges, BoxShape, DMatrix, DetectionBin, DetectionEfficiencies, DetectorModule,
//!     ModulePairEfficiencies, PairTable, ReplicatedObject, RigidTransform, ScannerGeometry,
//!     ScannerInformation, SolidVolume, TypeOfModulePair,
//! };
//!
//! let crystal = SolidVolume::new(BoxShape::cuboid([20.0, 4.0, 4.0]), 1);
//! let elements = ReplicatedObject::with_transforms(crystal, vec![RigidTransform::identity()]);
//! let modules = ReplicatedObject::with_transforms(
//!     DetectorModule::new(elements),
//!     vec![RigidTransform::identity(); 2],
//! );
//! let pair = TypeOfModulePair::new(0, 0);
//! let mut luts = PairTable::new(1);
//! luts.insert(pair, DMatrix::from_row_slice(2, 2, &[-1, 0, 0, -1]));
//! let mut vectors = PairTable::new(1);
//! vectors.insert(pair, vec![ModulePairEfficiencies::filled(1, 1, 1.0, 0)]);
//!
//! let scanner = ScannerInformation::new(
//!     "two modules",
//!     ScannerGeometry::new(vec![modules]),
//!     vec![BinEdges::linspace(430.0, 650.0, 1)],
//! )
//! .with_detection_efficiencies(
//!     DetectionEfficiencies::default()
//!         .with_calibration_factor(2.0)
//!         .with_detection_bin_efficiencies(vec![vec![1.0, 1.0]])
//!         .with_module_pair_efficiencies(luts, vectors),
//! );
//!
//! let model = EfficiencyModel::with_config(&scanner, EvaluationConfig::default()).unwrap();
//! assert_eq!(model.efficiency(pair, DetectionBin(0), DetectionBin(1)).unwrap(), 2.0);
//! assert_eq!(model.efficiency(pair, DetectionBin(0), DetectionBin(0)).unwrap(), 0.0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod model;
mod validate;

#[cfg(test)]
mod fixtures;

pub use config::EvaluationConfig;
pub use error::{EfficiencyError, Result};
pub use model::{EfficiencyModel, detection_efficiency};
pub use validate::validate_efficiencies;
