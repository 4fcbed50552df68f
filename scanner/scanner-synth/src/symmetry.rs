//! Symmetry policies and module-pair table construction.
//!
//! A policy maps every `(module0, module1)` instance pair to a symmetry group
//! id, or `-1` for pairs that are never in coincidence. The tables built here
//! are immutable once returned.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use scanner_bins::BinLayout;
use scanner_types::{DMatrix, ModulePairEfficiencies, ScannerInformation, TypeOfModulePair};

use crate::config::CylindricalBlocksConfig;
use crate::error::{Result, SynthError};

/// How module-instance pairs are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymmetryPolicy {
    /// Rotational symmetry about the ring plus axial translation.
    ///
    /// With instance `m = z + NZ * a`, pairs in the same angular slot are
    /// never in coincidence and all others get
    /// `z1 + NZ * (z2 + NZ * (|a2 - a1| - 1))`, dense over
    /// `[0, NZ² (NA - 1))`.
    RingAdjacent {
        /// Axial slots `NZ`.
        modules_along_axis: usize,
        /// Angular slots `NA`.
        modules_along_ring: usize,
    },
    /// No symmetry: every pair its own group, row-major.
    AllDistinct,
    /// Nothing is in coincidence.
    NoCoincidences,
}

impl SymmetryPolicy {
    /// Ring symmetry of one cylindrical module type.
    #[must_use]
    pub const fn ring_adjacent(config: &CylindricalBlocksConfig) -> Self {
        Self::RingAdjacent {
            modules_along_axis: config.num_modules_along_axis,
            modules_along_ring: config.num_modules_along_ring,
        }
    }

    /// Number of symmetry groups over `num_modules0 x num_modules1` pairs.
    #[must_use]
    pub const fn num_sgids(&self, num_modules0: usize, num_modules1: usize) -> usize {
        match *self {
            Self::RingAdjacent {
                modules_along_axis: nz,
                modules_along_ring: na,
            } => nz * nz * na.saturating_sub(1),
            Self::AllDistinct => num_modules0 * num_modules1,
            Self::NoCoincidences => 0,
        }
    }

    fn check(&self, num_modules0: usize, num_modules1: usize) -> Result<()> {
        if let Self::RingAdjacent {
            modules_along_axis: nz,
            modules_along_ring: na,
        } = *self
        {
            let expected = nz * na;
            if num_modules0 != expected || num_modules1 != expected {
                return Err(SynthError::invalid_config(format!(
                    "ring symmetry with {nz} axial x {na} angular slots needs {expected} modules \
                     on both sides, got {num_modules0} and {num_modules1}"
                )));
            }
        }
        if i32::try_from(self.num_sgids(num_modules0, num_modules1)).is_err() {
            return Err(SynthError::invalid_config(
                "number of symmetry groups does not fit an SGID LUT entry",
            ));
        }
        Ok(())
    }

    /// Group of one pair; callers have checked the bounds.
    #[allow(clippy::cast_possible_wrap)]
    fn sgid(&self, module0: usize, module1: usize, num_modules1: usize) -> i32 {
        match *self {
            Self::RingAdjacent {
                modules_along_axis: nz,
                ..
            } => {
                let (z1, a1) = (module0 % nz, module0 / nz);
                let (z2, a2) = (module1 % nz, module1 / nz);
                if a1 == a2 {
                    -1
                } else {
                    (z1 + nz * (z2 + nz * (a1.abs_diff(a2) - 1))) as i32
                }
            }
            Self::AllDistinct => (module0 * num_modules1 + module1) as i32,
            Self::NoCoincidences => -1,
        }
    }
}

/// The SGID LUT of `policy` over `num_modules0 x num_modules1` instance pairs.
///
/// # Errors
///
/// Returns [`SynthError::InvalidConfig`] if a ring policy does not match the
/// module counts, or the groups overflow an `i32`.
///
/// # Example
///
/// ```
/// use scanner_synth::{SymmetryPolicy, build_sgid_lut};
///
/// let policy = SymmetryPolicy::RingAdjacent { modules_along_axis: 1, modules_along_ring: 2 };
/// let lut = build_sgid_lut(policy, 2, 2).unwrap();
/// assert_eq!(lut[(0, 0)], -1);
/// assert_eq!(lut[(0, 1)], 0);
/// assert_eq!(lut[(1, 0)], 0);
/// assert_eq!(lut[(1, 1)], -1);
/// ```
pub fn build_sgid_lut(
    policy: SymmetryPolicy,
    num_modules0: usize,
    num_modules1: usize,
) -> Result<DMatrix<i32>> {
    policy.check(num_modules0, num_modules1)?;
    Ok(DMatrix::from_fn(num_modules0, num_modules1, |m0, m1| {
        policy.sgid(m0, m1, num_modules1)
    }))
}

/// SGID LUT and efficiency vector for one module-type pair.
///
/// Every table is filled with `value_fn(sgid)` and sized
/// `(elements0 * energy0) x (elements1 * energy1)`.
///
/// # Errors
///
/// Fails for an unknown module type, a type without energy bins, or a policy
/// that does not fit the module counts.
pub fn build_module_pair_tables(
    scanner: &ScannerInformation,
    pair: TypeOfModulePair,
    policy: SymmetryPolicy,
    mut value_fn: impl FnMut(u32) -> f32,
) -> Result<(DMatrix<i32>, Vec<ModulePairEfficiencies>)> {
    let geometry = &scanner.scanner_geometry;
    let edges = &scanner.event_energy_bin_edges;
    let layout0 = BinLayout::for_module_type(geometry, edges, pair.first())?;
    let layout1 = BinLayout::for_module_type(geometry, edges, pair.second())?;

    let lut = build_sgid_lut(policy, layout0.num_modules(), layout1.num_modules())?;
    let num_sgids = policy.num_sgids(layout0.num_modules(), layout1.num_modules());
    let (rows, cols) = (layout0.num_bins_per_module(), layout1.num_bins_per_module());
    let vector = (0..num_sgids as u32)
        .map(|sgid| ModulePairEfficiencies::filled(rows, cols, value_fn(sgid), sgid))
        .collect();

    debug!(%pair, ?policy, num_sgids, rows, cols, "built module-pair efficiency tables");
    Ok((lut, vector))
}
