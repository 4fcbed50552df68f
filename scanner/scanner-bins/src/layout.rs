//! Per-module-type bin cardinalities and the mixed-radix codec.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scanner_types::{
    BinEdges, DetectionBin, ExpandedDetectionBin, Result, ScannerError, ScannerGeometry,
    TypeOfModule,
};

/// Cardinalities of one module type.
///
/// A detection bin is a mixed-radix number with the energy index as the
/// fastest digit, then the element index, then the module index:
///
/// ```text
/// bin = energy + num_energy_bins * (element + num_elements_per_module * module)
/// ```
///
/// # Example
///
/// ```
/// use scanner_bins::BinLayout;
/// use scanner_types::{DetectionBin, ExpandedDetectionBin, TypeOfModule};
///
/// let layout = BinLayout::new(TypeOfModule(0), 4, 3, 2);
/// let bin = layout.encode(ExpandedDetectionBin::new(2, 1, 1));
/// assert_eq!(bin, DetectionBin(15));
/// assert_eq!(layout.expand(bin), ExpandedDetectionBin::new(2, 1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinLayout {
    type_of_module: TypeOfModule,
    num_modules: u32,
    num_elements_per_module: u32,
    num_energy_bins: u32,
}

impl BinLayout {
    /// Creates a layout from explicit cardinalities.
    #[must_use]
    pub const fn new(
        type_of_module: TypeOfModule,
        num_modules: u32,
        num_elements_per_module: u32,
        num_energy_bins: u32,
    ) -> Self {
        Self {
            type_of_module,
            num_modules,
            num_elements_per_module,
            num_energy_bins,
        }
    }

    /// Reads the cardinalities of `type_of_module` from the geometry and
    /// its energy binning.
    ///
    /// # Errors
    ///
    /// Returns [`ScannerError::UnknownModuleType`] if either the geometry or
    /// the energy edges lack this type, and [`ScannerError::NoEnergyBins`] if
    /// its energy binning is empty.
    pub fn for_module_type(
        geometry: &ScannerGeometry,
        energy_bin_edges: &[BinEdges],
        type_of_module: TypeOfModule,
    ) -> Result<Self> {
        let rep_module = geometry.module_type(type_of_module).ok_or_else(|| {
            ScannerError::unknown_type(type_of_module, geometry.number_of_module_types())
        })?;
        let edges = energy_bin_edges
            .get(type_of_module.index())
            .ok_or_else(|| ScannerError::unknown_type(type_of_module, energy_bin_edges.len()))?;
        let num_energy_bins = edges.number_of_bins();
        if num_energy_bins == 0 {
            return Err(ScannerError::NoEnergyBins { type_of_module });
        }
        Self::from_counts(
            type_of_module,
            rep_module.num_replicas(),
            rep_module.object.num_elements(),
            num_energy_bins,
        )
    }

    /// Checked conversion of raw counts; each count and their product must
    /// fit in a `u32`.
    fn from_counts(
        type_of_module: TypeOfModule,
        num_modules: usize,
        num_elements_per_module: usize,
        num_energy_bins: usize,
    ) -> Result<Self> {
        let too_large = || {
            ScannerError::invalid_config(format!(
                "module type {type_of_module} has more detection bins than fit in a u32"
            ))
        };
        let modules = u32::try_from(num_modules).map_err(|_| too_large())?;
        let elements = u32::try_from(num_elements_per_module).map_err(|_| too_large())?;
        let energy = u32::try_from(num_energy_bins).map_err(|_| too_large())?;
        modules
            .checked_mul(elements)
            .and_then(|n| n.checked_mul(energy))
            .ok_or_else(too_large)?;
        Ok(Self::new(type_of_module, modules, elements, energy))
    }

    /// The module type described.
    #[must_use]
    pub const fn type_of_module(&self) -> TypeOfModule {
        self.type_of_module
    }

    /// Module instances of this type.
    #[must_use]
    pub const fn num_modules(&self) -> usize {
        self.num_modules as usize
    }

    /// Detecting elements in one module instance.
    #[must_use]
    pub const fn num_elements_per_module(&self) -> usize {
        self.num_elements_per_module as usize
    }

    /// Event energy bins.
    #[must_use]
    pub const fn num_energy_bins(&self) -> usize {
        self.num_energy_bins as usize
    }

    /// Detecting elements over all module instances.
    #[must_use]
    pub const fn num_detecting_elements(&self) -> usize {
        self.num_modules() * self.num_elements_per_module()
    }

    /// Detection bins over all module instances.
    #[must_use]
    pub const fn num_detection_bins(&self) -> usize {
        self.num_detecting_elements() * self.num_energy_bins()
    }

    /// Detection bins within one module instance; the side length of a
    /// module-pair efficiency table along this type's axis.
    #[must_use]
    pub const fn num_bins_per_module(&self) -> usize {
        self.num_elements_per_module() * self.num_energy_bins()
    }

    /// Whether `bin` is a valid bin of this type.
    #[must_use]
    pub const fn contains(&self, bin: DetectionBin) -> bool {
        bin.index() < self.num_detection_bins()
    }

    /// Splits a bin into module, element and energy indices.
    ///
    /// The bin is assumed valid; see [`BinLayout::checked_expand`].
    #[inline]
    #[must_use]
    pub const fn expand(&self, bin: DetectionBin) -> ExpandedDetectionBin {
        let num_en = self.num_energy_bins;
        let det = bin.0 / num_en;
        ExpandedDetectionBin {
            module_index: det / self.num_elements_per_module,
            element_index: det % self.num_elements_per_module,
            energy_index: bin.0 % num_en,
        }
    }

    /// Joins module, element and energy indices into a bin.
    ///
    /// The indices are assumed within bounds; see
    /// [`BinLayout::checked_encode`].
    #[inline]
    #[must_use]
    pub const fn encode(&self, expanded: ExpandedDetectionBin) -> DetectionBin {
        DetectionBin(
            expanded.energy_index
                + self.num_energy_bins
                    * (expanded.element_index + self.num_elements_per_module * expanded.module_index),
        )
    }

    /// [`BinLayout::expand`] with a range check on the bin.
    ///
    /// # Errors
    ///
    /// Returns [`ScannerError::DetectionBinOutOfRange`] if `bin` is not a
    /// bin of this type.
    pub fn checked_expand(&self, bin: DetectionBin) -> Result<ExpandedDetectionBin> {
        if self.contains(bin) {
            Ok(self.expand(bin))
        } else {
            Err(ScannerError::DetectionBinOutOfRange {
                type_of_module: self.type_of_module,
                bin,
                num_detection_bins: self.num_detection_bins(),
            })
        }
    }

    /// [`BinLayout::encode`] with a range check on every index.
    ///
    /// # Errors
    ///
    /// Returns [`ScannerError::ExpandedBinOutOfRange`] if any index is past
    /// its cardinality.
    pub fn checked_encode(&self, expanded: ExpandedDetectionBin) -> Result<DetectionBin> {
        if expanded.module_index < self.num_modules
            && expanded.element_index < self.num_elements_per_module
            && expanded.energy_index < self.num_energy_bins
        {
            Ok(self.encode(expanded))
        } else {
            Err(ScannerError::ExpandedBinOutOfRange {
                type_of_module: self.type_of_module,
                expanded,
                num_modules: self.num_modules(),
                num_elements_per_module: self.num_elements_per_module(),
                num_energy_bins: self.num_energy_bins(),
            })
        }
    }

    /// Row/column of an expanded bin in a module-pair efficiency table:
    /// `element_index * num_energy_bins + energy_index`.
    #[inline]
    #[must_use]
    pub const fn module_bin_index(&self, expanded: &ExpandedDetectionBin) -> usize {
        (expanded.element_index * self.num_energy_bins + expanded.energy_index) as usize
    }
}
