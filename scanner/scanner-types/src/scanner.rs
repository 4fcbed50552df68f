//! Scanner description: geometry, binning, efficiencies.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::binning::BinEdges;
use crate::efficiency::DetectionEfficiencies;
use crate::error::{Result, ScannerError};
use crate::geometry::{ReplicatedDetectorModule, ScannerGeometry};
use crate::ids::{TypeOfModule, TypeOfModulePair};
use crate::pair_table::PairTable;

/// Everything a list-mode consumer needs to know about the scanner.
///
/// Loaded once per session and read-only while events are processed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScannerInformation {
    /// Human-readable model name.
    pub model_name: String,
    /// Replicated detector geometry.
    pub scanner_geometry: ScannerGeometry,
    /// Event energy bin edges (keV) per module type.
    pub event_energy_bin_edges: Vec<BinEdges>,
    /// FWHM energy resolution at 511 keV per module type, as a fraction.
    pub energy_resolution_at_511: Vec<f32>,
    /// TOF bin edges (mm) per module-type pair.
    pub tof_bin_edges: PairTable<BinEdges>,
    /// TOF resolution (FWHM, mm) per module-type pair.
    pub tof_resolution: PairTable<f32>,
    /// Detection efficiencies, if configured.
    pub detection_efficiencies: Option<DetectionEfficiencies>,
}

impl ScannerInformation {
    /// A scanner with geometry and energy binning only.
    #[must_use]
    pub fn new(
        model_name: impl Into<String>,
        scanner_geometry: ScannerGeometry,
        event_energy_bin_edges: Vec<BinEdges>,
    ) -> Self {
        let num_types = scanner_geometry.number_of_module_types();
        Self {
            model_name: model_name.into(),
            scanner_geometry,
            event_energy_bin_edges,
            energy_resolution_at_511: Vec::new(),
            tof_bin_edges: PairTable::new(num_types),
            tof_resolution: PairTable::new(num_types),
            detection_efficiencies: None,
        }
    }

    /// Attaches efficiencies.
    #[must_use]
    pub fn with_detection_efficiencies(mut self, effs: DetectionEfficiencies) -> Self {
        self.detection_efficiencies = Some(effs);
        self
    }

    /// Number of module types.
    #[must_use]
    pub fn number_of_module_types(&self) -> usize {
        self.scanner_geometry.number_of_module_types()
    }

    /// The replicated module of one type, or an error naming the type.
    pub fn replicated_module(&self, type_of_module: TypeOfModule) -> Result<&ReplicatedDetectorModule> {
        self.scanner_geometry
            .module_type(type_of_module)
            .ok_or_else(|| ScannerError::unknown_type(type_of_module, self.number_of_module_types()))
    }

    /// Energy bin edges of one type, or an error naming the type.
    pub fn energy_bin_edges(&self, type_of_module: TypeOfModule) -> Result<&BinEdges> {
        self.event_energy_bin_edges
            .get(type_of_module.index())
            .ok_or_else(|| ScannerError::unknown_type(type_of_module, self.event_energy_bin_edges.len()))
    }

    /// Number of TOF bins for a pair (zero when no edges are configured).
    #[must_use]
    pub fn number_of_tof_bins(&self, pair: TypeOfModulePair) -> usize {
        self.tof_bin_edges
            .get(pair)
            .map_or(0, BinEdges::number_of_bins)
    }
}
