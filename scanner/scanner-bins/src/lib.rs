//! Detection-bin codec and element placement.
//!
//! A [`DetectionBin`](scanner_types::DetectionBin) is the compact id every
//! event and efficiency table uses. This crate converts it to and from the
//! structured `(module, element, energy)` triple and resolves where an
//! element sits in the scanner.
//!
//! - [`BinLayout`] - cardinalities of one module type; O(1) `expand`/`encode`
//! - [`BinCodec`] - layouts of every module type, built once per scanner
//! - [`expand`], [`encode`], [`num_detecting_elements`], [`num_detection_bins`] -
//!   bounds-checked queries straight off a geometry
//! - [`resolve_box`], [`element_transform`] - diagnostics
//!
//! # Hot Path
//!
//! [`BinLayout::expand`] and [`BinLayout::encode`] are a handful of integer
//! operations with no allocation or branching. Build the layout (or a
//! [`BinCodec`]) once and reuse it; the free functions re-read the geometry on
//! every call.
//!
//! # Example
//!
//! ```
//! use scanner_bins::{encode, expand};
//! use scanner_types::{
//!     BinEdges, BoxShape, DetectionBin, DetectorModule, ExpandedDetectionBin, ReplicatedObject,
//!     RigidTransform, ScannerGeometry, SolidVolume, TypeOfModule,
//! };
//!
//! let crystal = SolidVolume::new(BoxShape::cuboid([20.0, 4.0, 4.0]), 1);
//! let elements = ReplicatedObject::with_transforms(crystal, vec![RigidTransform::identity(); 3]);
//! let modules = ReplicatedObject::with_transforms(
//!     DetectorModule::new(elements),
//!     vec![RigidTransform::identity(); 4],
//! );
//! let geometry = ScannerGeometry::new(vec![modules]);
//! let energy = vec![BinEdges::linspace(430.0, 650.0, 2)];
//!
//! let bin = encode(&geometry, &energy, TypeOfModule(0), ExpandedDetectionBin::new(2, 1, 1)).unwrap();
//! assert_eq!(bin, DetectionBin(15));
//! assert_eq!(
//!     expand(&geometry, &energy, TypeOfModule(0), bin).unwrap(),
//!     ExpandedDetectionBin::new(2, 1, 1)
//! );
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod codec;
mod layout;
mod placement;

pub use codec::{
    BinCodec, encode, expand, expand_detection_bins, make_detection_bins, num_detecting_elements,
    num_detection_bins,
};
pub use layout::BinLayout;
pub use placement::{element_transform, resolve_box, resolve_box_for_bin};
