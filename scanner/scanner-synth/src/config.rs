//! Configuration for synthetic scanners and event generation.
//!
//! # Presets
//!
//! - [`CylindricalBlocksConfig::large_ring()`] - 40 large blocks on a full ring, two axial slots
//! - [`CylindricalBlocksConfig::half_ring_insert()`] - 15 thin blocks on a half ring
//!
//! Together they form a two-module-type demo scanner. The values are
//! illustrative, not a physically optimised design.
//!
//! # Example
//!
//! ```
//! use scanner_synth::{CylindricalBlocksConfig, GeneratorConfig};
//!
//! let ring = CylindricalBlocksConfig::large_ring().with_modules(8, 1);
//! assert!(ring.validate().is_ok());
//! assert_eq!(ring.num_modules(), 8);
//!
//! let gen_config = GeneratorConfig::default().with_seed(42);
//! assert_eq!(gen_config.seed, Some(42));
//! ```

use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/// A cylindrical arrangement of identical block modules of one type.
///
/// Crystals are stacked on a `N0 x N1 x N2` grid inside a module, with the
/// first axis radial. Modules are rotated about the scanner axis over `arc`
/// and stacked along it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CylindricalBlocksConfig {
    /// Crystal size (mm) along the radial, tangential and axial directions.
    pub crystal_length: [f32; 3],
    /// Crystals per module along the same three directions.
    pub num_crystals_per_module: [usize; 3],
    /// Angular slots around the ring.
    pub num_modules_along_ring: usize,
    /// Axial slots.
    pub num_modules_along_axis: usize,
    /// Inner radius (mm).
    pub radius: f32,
    /// Angle covered by the ring (radians).
    pub arc: f32,
    /// Angle of the first slot (radians).
    pub start_angle: f32,
    /// Distance between axial slots (mm).
    pub module_spacing_along_axis: f32,
    /// TOF bins for coincidences within this type.
    pub number_of_tof_bins: usize,
    /// Coincidence timing resolution within this type (FWHM, mm).
    pub tof_resolution: f32,
    /// Lower level discriminator (keV).
    pub lld: f32,
    /// Upper level discriminator (keV).
    pub uld: f32,
    /// Event energy bins between LLD and ULD.
    pub number_of_event_energy_bins: usize,
    /// FWHM energy resolution at 511 keV, as a fraction.
    pub energy_resolution: f32,
    /// Material of the crystals.
    pub material_id: u32,
}

impl Default for CylindricalBlocksConfig {
    fn default() -> Self {
        Self::large_ring()
    }
}

impl CylindricalBlocksConfig {
    /// Full ring of 20 angular by 2 axial slots at 400 mm, 2x4x7 crystals
    /// of 20x4x4 mm, 11 TOF bins, 3 energy bins over 450-650 keV.
    #[must_use]
    pub fn large_ring() -> Self {
        Self {
            crystal_length: [20.0, 4.0, 4.0],
            num_crystals_per_module: [2, 4, 7],
            num_modules_along_ring: 20,
            num_modules_along_axis: 2,
            radius: 400.0,
            arc: TAU,
            start_angle: 0.0,
            // Seven crystals plus a 24-crystal gap.
            module_spacing_along_axis: (7.0 + 24.0) * 4.0,
            number_of_tof_bins: 11,
            tof_resolution: 9.0,
            lld: 450.0,
            uld: 650.0,
            number_of_event_energy_bins: 3,
            energy_resolution: 0.1,
            material_id: 1,
        }
    }

    /// Half ring of 15 slots at 150 mm, 1x3x30 crystals of 10x2x2 mm,
    /// 5 TOF bins, one energy bin over 460-640 keV.
    #[must_use]
    pub fn half_ring_insert() -> Self {
        Self {
            crystal_length: [10.0, 2.0, 2.0],
            num_crystals_per_module: [1, 3, 30],
            num_modules_along_ring: 15,
            num_modules_along_axis: 1,
            radius: 150.0,
            arc: PI,
            start_angle: 0.0,
            module_spacing_along_axis: 0.0,
            number_of_tof_bins: 5,
            tof_resolution: 6.0,
            lld: 460.0,
            uld: 640.0,
            number_of_event_energy_bins: 1,
            energy_resolution: 0.8,
            material_id: 1,
        }
    }

    /// Set the crystal size.
    #[must_use]
    pub const fn with_crystal_length(mut self, length: [f32; 3]) -> Self {
        self.crystal_length = length;
        self
    }

    /// Set the crystal grid of one module.
    #[must_use]
    pub const fn with_crystals_per_module(mut self, counts: [usize; 3]) -> Self {
        self.num_crystals_per_module = counts;
        self
    }

    /// Set the number of angular and axial module slots.
    #[must_use]
    pub const fn with_modules(mut self, along_ring: usize, along_axis: usize) -> Self {
        self.num_modules_along_ring = along_ring;
        self.num_modules_along_axis = along_axis;
        self
    }

    /// Set the inner radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the angle covered by the ring.
    #[must_use]
    pub const fn with_arc(mut self, arc: f32) -> Self {
        self.arc = arc;
        self
    }

    /// Set the axial module spacing.
    #[must_use]
    pub const fn with_module_spacing_along_axis(mut self, spacing: f32) -> Self {
        self.module_spacing_along_axis = spacing;
        self
    }

    /// Set the TOF binning within this type.
    #[must_use]
    pub const fn with_tof(mut self, number_of_bins: usize, resolution: f32) -> Self {
        self.number_of_tof_bins = number_of_bins;
        self.tof_resolution = resolution;
        self
    }

    /// Set the energy window and its number of bins.
    #[must_use]
    pub const fn with_energy_window(mut self, lld: f32, uld: f32, number_of_bins: usize) -> Self {
        self.lld = lld;
        self.uld = uld;
        self.number_of_event_energy_bins = number_of_bins;
        self
    }

    /// Module instances: angular slots times axial slots.
    #[must_use]
    pub const fn num_modules(&self) -> usize {
        self.num_modules_along_ring * self.num_modules_along_axis
    }

    /// Crystals in one module.
    #[must_use]
    pub const fn num_elements_per_module(&self) -> usize {
        let [n0, n1, n2] = self.num_crystals_per_module;
        n0 * n1 * n2
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidConfig`] for non-positive sizes or
    /// counts, an empty energy window, or an arc outside `(0, 2π]`.
    pub fn validate(&self) -> Result<()> {
        if self.crystal_length.iter().any(|&l| l <= 0.0) {
            return Err(SynthError::invalid_config("crystal lengths must be positive"));
        }
        if self.num_crystals_per_module.contains(&0) {
            return Err(SynthError::invalid_config(
                "every module needs at least one crystal along each axis",
            ));
        }
        if self.num_modules_along_ring == 0 || self.num_modules_along_axis == 0 {
            return Err(SynthError::invalid_config(
                "at least one module slot is required along ring and axis",
            ));
        }
        if self.radius <= 0.0 {
            return Err(SynthError::invalid_config("radius must be positive"));
        }
        if !(self.arc > 0.0 && self.arc <= TAU) {
            return Err(SynthError::invalid_config(format!(
                "arc must be in (0, 2π], got {}",
                self.arc
            )));
        }
        if self.number_of_tof_bins == 0 {
            return Err(SynthError::invalid_config("at least one TOF bin is required"));
        }
        if self.number_of_event_energy_bins == 0 {
            return Err(SynthError::invalid_config("at least one energy bin is required"));
        }
        if self.uld <= self.lld {
            return Err(SynthError::invalid_config(format!(
                "ULD ({}) must exceed LLD ({})",
                self.uld, self.lld
            )));
        }
        Ok(())
    }
}

/// Controls the acceptance-rejection event generator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Bin pairs drawn per event before giving up.
    pub max_attempts_per_event: usize,
    /// Optional seed for reproducible results.
    pub seed: Option<u64>,
    /// Include the calibration factor in the acceptance test. Only matters
    /// when the calibration factor is zero.
    pub apply_calibration: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts_per_event: 10_000,
            seed: None,
            apply_calibration: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt budget per event.
    #[must_use]
    pub const fn with_max_attempts_per_event(mut self, attempts: usize) -> Self {
        self.max_attempts_per_event = attempts;
        self
    }

    /// Set a random seed for reproducibility.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set whether the calibration factor enters the acceptance test.
    #[must_use]
    pub const fn with_apply_calibration(mut self, apply: bool) -> Self {
        self.apply_calibration = apply;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidConfig`] for a zero attempt budget.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts_per_event == 0 {
            return Err(SynthError::invalid_config(
                "max_attempts_per_event must be at least 1",
            ));
        }
        Ok(())
    }
}
