//! Detection-efficiency tables.
//!
//! Efficiencies are stored in two factors:
//!
//! - a flat per-bin vector for every module type
//! - a symmetry-reduced module-pair table for every ordered module-type pair
//!
//! The module-pair factor goes through a symmetry-group lookup table (SGID
//! LUT) indexed by `(module_index0, module_index1)`. Its entry selects one
//! table of the efficiency vector, or is `-1` when the two module
//! instances are never in coincidence. Storing one table per symmetry
//! group instead of per module pair turns `O(M^2)` storage into `O(M)` for
//! ring scanners.

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pair_table::PairTable;

/// Per-bin efficiencies of one module type, indexed by detection bin.
pub type DetectionBinEfficiencies = Vec<f32>;

/// SGID lookup table for one module-type pair.
///
/// Shape `(num_modules0, num_modules1)`; entries are SGIDs or `-1`.
pub type ModulePairSgidLut = DMatrix<i32>;

/// Efficiency tables for one module-type pair, indexed by SGID.
pub type ModulePairEfficienciesVector = Vec<ModulePairEfficiencies>;

/// Efficiencies shared by every module pair of one symmetry group.
///
/// `values` has shape `(elements0 * energies0, elements1 * energies1)` and
/// is indexed by `element_index * num_energy + energy_index` on each side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModulePairEfficiencies {
    /// Efficiency per (element, energy) pair.
    pub values: DMatrix<f32>,
    /// Symmetry group this table belongs to.
    pub sgid: u32,
}

impl ModulePairEfficiencies {
    /// Creates a table for the given symmetry group.
    #[must_use]
    pub const fn new(values: DMatrix<f32>, sgid: u32) -> Self {
        Self { values, sgid }
    }

    /// A `rows x cols` table filled with one value.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f32, sgid: u32) -> Self {
        Self {
            values: DMatrix::from_element(rows, cols, value),
            sgid,
        }
    }
}

/// Scanner-wide efficiency data.
///
/// Every part is optional. A missing part contributes a factor of 1.
///
/// # Example
///
/// ```
/// use scanner_types::DetectionEfficiencies;
///
/// let effs = DetectionEfficiencies::with_dimensions(2, true, true);
/// assert_eq!(effs.detection_bin_efficiencies.as_ref().map(Vec::len), Some(2));
/// assert!(effs.module_pair_sgidlut.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionEfficiencies {
    /// Global multiplier applied to every efficiency.
    pub calibration_factor: f32,
    /// Per-bin efficiencies, indexed by module type.
    pub detection_bin_efficiencies: Option<Vec<DetectionBinEfficiencies>>,
    /// SGID lookup tables per module-type pair.
    pub module_pair_sgidlut: Option<PairTable<ModulePairSgidLut>>,
    /// Symmetry-group efficiency tables per module-type pair.
    pub module_pair_efficiencies_vectors: Option<PairTable<ModulePairEfficienciesVector>>,
}

impl Default for DetectionEfficiencies {
    fn default() -> Self {
        Self {
            calibration_factor: 1.0,
            detection_bin_efficiencies: None,
            module_pair_sgidlut: None,
            module_pair_efficiencies_vectors: None,
        }
    }
}

impl DetectionEfficiencies {
    /// Pre-sizes the containers for `num_types` module types.
    ///
    /// Per-type vectors are created empty and per-pair tables have no
    /// entries; the caller fills in the values.
    #[must_use]
    pub fn with_dimensions(
        num_types: usize,
        allocate_detection_bin_efficiencies: bool,
        allocate_module_pair_efficiencies: bool,
    ) -> Self {
        Self {
            calibration_factor: 1.0,
            detection_bin_efficiencies: allocate_detection_bin_efficiencies
                .then(|| vec![Vec::new(); num_types]),
            module_pair_sgidlut: allocate_module_pair_efficiencies
                .then(|| PairTable::new(num_types)),
            module_pair_efficiencies_vectors: allocate_module_pair_efficiencies
                .then(|| PairTable::new(num_types)),
        }
    }

    /// Sets the calibration factor.
    #[must_use]
    pub fn with_calibration_factor(mut self, calibration_factor: f32) -> Self {
        self.calibration_factor = calibration_factor;
        self
    }

    /// Sets the per-bin efficiencies.
    #[must_use]
    pub fn with_detection_bin_efficiencies(mut self, effs: Vec<DetectionBinEfficiencies>) -> Self {
        self.detection_bin_efficiencies = Some(effs);
        self
    }

    /// Sets the module-pair LUTs and efficiency vectors together.
    #[must_use]
    pub fn with_module_pair_efficiencies(
        mut self,
        sgidlut: PairTable<ModulePairSgidLut>,
        vectors: PairTable<ModulePairEfficienciesVector>,
    ) -> Self {
        self.module_pair_sgidlut = Some(sgidlut);
        self.module_pair_efficiencies_vectors = Some(vectors);
        self
    }

    /// Whether any module-pair data is present.
    #[must_use]
    pub const fn has_module_pair_efficiencies(&self) -> bool {
        self.module_pair_efficiencies_vectors.is_some()
    }
}
