//! Synthetic cylindrical PET scanners for tests, demos and benchmarks.
//!
//! - [`scanner_information`] - a complete scanner from one
//!   [`CylindricalBlocksConfig`] per module type, with binning and synthetic
//!   efficiencies attached
//! - [`SymmetryPolicy`], [`build_sgid_lut`], [`build_module_pair_tables`] -
//!   pure construction of SGID lookup tables and their efficiency vectors
//! - [`EventGenerator`] - acceptance-rejection sampling of coincidence events
//!   and time blocks
//!
//! The efficiency values are not physical. Every table of symmetry group `g`
//! holds `g`, which makes the group visible in evaluated efficiencies.
//!
//! # Example
//!
//! ```
//! use scanner_synth::{CylindricalBlocksConfig, EventGenerator, GeneratorConfig, scanner_information};
//!
//! let scanner = scanner_information(&[
//!     CylindricalBlocksConfig::large_ring().with_modules(6, 1),
//!     CylindricalBlocksConfig::half_ring_insert(),
//! ])
//! .unwrap();
//!
//! let mut generator = EventGenerator::new(&scanner, GeneratorConfig::new().with_seed(9)).unwrap();
//! let blocks = generator.time_blocks(2, 1.0, 3).unwrap();
//! assert_eq!(blocks[1].num_prompts(), 12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod config;
mod error;
mod events;
mod geometry;
mod scanner;
mod symmetry;

pub use config::{CylindricalBlocksConfig, GeneratorConfig};
pub use error::{Result, SynthError};
pub use events::EventGenerator;
pub use geometry::{crystal, detector_module, replicated_module, scanner_geometry};
pub use scanner::{
    CROSS_TYPE_TOF_RESOLUTION, SYNTHETIC_CALIBRATION_FACTOR, SYNTHETIC_MODEL_NAME,
    scanner_information, synthetic_efficiencies,
};
pub use symmetry::{SymmetryPolicy, build_module_pair_tables, build_sgid_lut};
