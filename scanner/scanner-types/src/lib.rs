//! Data types for modular PET scanners.
//!
//! This crate describes a PET scanner's physical layout and its
//! detection-efficiency tables:
//!
//! - [`RigidTransform`] with [`compose`], [`apply`], [`transform_shape`] - placement algebra
//! - [`BoxShape`] and [`SolidVolume`] - shared crystal shapes
//! - [`ReplicatedObject`], [`DetectorModule`], [`ScannerGeometry`] - the replication tree
//! - [`DetectionBin`] and [`ExpandedDetectionBin`] - compact and structured bin ids
//! - [`BinEdges`] - event energy and TOF binning
//! - [`DetectionEfficiencies`] - per-bin and symmetry-reduced module-pair efficiencies
//! - [`CoincidenceEvent`] and [`EventTimeBlock`] - list-mode events
//! - [`ScannerInformation`] - everything above, loaded once per session
//!
//! Index arithmetic lives in `scanner-bins`; efficiency evaluation in
//! `scanner-efficiency`.
//!
//! # Layer 0
//!
//! Pure data with no I/O. Serialization is available through the `serde`
//! feature.
//!
//! # Coordinate System
//!
//! Millimetres, right-handed, scanner axis along z.
//!
//! # Example
//!
//! ```
//! use scanner_types::{
//!     BoxShape, DetectorModule, ReplicatedObject, RigidTransform, ScannerGeometry, SolidVolume,
//! };
//!
//! let crystal = SolidVolume::new(BoxShape::cuboid([20.0, 4.0, 4.0]), 1);
//! let mut elements = ReplicatedObject::new(crystal);
//! elements.push(RigidTransform::translation(400.0, 0.0, 0.0));
//!
//! let mut modules = ReplicatedObject::new(DetectorModule::new(elements));
//! modules.push(RigidTransform::identity());
//!
//! let geometry = ScannerGeometry::new(vec![modules]);
//! assert_eq!(geometry.number_of_module_types(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod binning;
mod efficiency;
mod error;
mod event;
mod geometry;
mod ids;
mod pair_table;
mod scanner;
mod shape;
mod transform;

pub use binning::BinEdges;
pub use efficiency::{
    DetectionBinEfficiencies, DetectionEfficiencies, ModulePairEfficiencies,
    ModulePairEfficienciesVector, ModulePairSgidLut,
};
pub use error::{Result, ScannerError};
pub use event::{CoincidenceEvent, EventTimeBlock, TimeInterval};
pub use geometry::{
    DetectorModule, ReplicatedDetectorModule, ReplicatedObject, ReplicatedSolidVolume,
    ScannerGeometry,
};
pub use ids::{DetectionBin, ExpandedDetectionBin, TypeOfModule, TypeOfModulePair};
pub use pair_table::PairTable;
pub use scanner::ScannerInformation;
pub use shape::{BoxShape, SolidVolume};
pub use transform::{RigidTransform, apply, apply_all, compose, transform_shape};

// Re-export math types for convenience
pub use nalgebra::{DMatrix, Point3, Vector3};
