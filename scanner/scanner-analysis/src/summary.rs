//! Header summary of a scanner description.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scanner_bins::BinCodec;
use scanner_types::{ScannerInformation, TypeOfModule, TypeOfModulePair};

use crate::error::Result;

/// Cardinalities and energy binning of one module type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleTypeSummary {
    /// The module type.
    pub type_of_module: TypeOfModule,
    /// Module instances.
    pub num_modules: usize,
    /// Detecting elements in one module.
    pub num_elements_per_module: usize,
    /// Detecting elements over all instances.
    pub num_detecting_elements: usize,
    /// Event energy bins.
    pub num_energy_bins: usize,
    /// Centre of each energy bin (keV).
    pub energy_mid_points: Vec<f32>,
    /// Energy resolution at 511 keV, if recorded.
    pub energy_resolution_at_511: Option<f32>,
}

impl ModuleTypeSummary {
    /// Detection bins of this type.
    #[must_use]
    pub const fn num_detection_bins(&self) -> usize {
        self.num_detecting_elements * self.num_energy_bins
    }
}

/// TOF binning and symmetry groups of one module-type pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairSummary {
    /// The pair.
    pub pair: TypeOfModulePair,
    /// TOF bins.
    pub num_tof_bins: usize,
    /// TOF resolution (mm), if recorded.
    pub tof_resolution: Option<f32>,
    /// Stored module-pair efficiency tables, if any.
    pub num_sgids: Option<usize>,
}

/// What a scanner description contains, without the tables themselves.
///
/// # Example
///
/// ```
/// use scanner_analysis::ScannerSummary;
/// use scanner_types::{ScannerGeometry, ScannerInformation};
///
/// let scanner = ScannerInformation::new("empty", ScannerGeometry::default(), Vec::new());
/// let summary = ScannerSummary::from_scanner(&scanner).unwrap();
/// assert_eq!(summary.module_types.len(), 0);
/// assert_eq!(summary.calibration_factor, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScannerSummary {
    /// Model name.
    pub model_name: String,
    /// One entry per module type.
    pub module_types: Vec<ModuleTypeSummary>,
    /// One entry per module-type pair, row-major.
    pub pairs: Vec<PairSummary>,
    /// Calibration factor, when efficiencies are present.
    pub calibration_factor: Option<f32>,
}

impl ScannerSummary {
    /// Summarise `scanner`.
    ///
    /// # Errors
    ///
    /// Fails if a module type has no energy bins.
    pub fn from_scanner(scanner: &ScannerInformation) -> Result<Self> {
        let codec = BinCodec::new(scanner)?;
        let module_types = codec
            .layouts()
            .iter()
            .map(|layout| -> Result<ModuleTypeSummary> {
                let t = layout.type_of_module();
                Ok(ModuleTypeSummary {
                    type_of_module: t,
                    num_modules: layout.num_modules(),
                    num_elements_per_module: layout.num_elements_per_module(),
                    num_detecting_elements: layout.num_detecting_elements(),
                    num_energy_bins: layout.num_energy_bins(),
                    energy_mid_points: scanner.energy_bin_edges(t)?.mid_points(),
                    energy_resolution_at_511: scanner
                        .energy_resolution_at_511
                        .get(t.index())
                        .copied(),
                })
            })
            .collect::<Result<_>>()?;

        let effs = scanner.detection_efficiencies.as_ref();
        let vectors = effs.and_then(|e| e.module_pair_efficiencies_vectors.as_ref());
        let pairs = TypeOfModulePair::all(codec.number_of_module_types())
            .map(|pair| PairSummary {
                pair,
                num_tof_bins: scanner.number_of_tof_bins(pair),
                tof_resolution: scanner.tof_resolution.get(pair).copied(),
                num_sgids: vectors.and_then(|v| v.get(pair)).map(Vec::len),
            })
            .collect();

        Ok(Self {
            model_name: scanner.model_name.clone(),
            module_types,
            pairs,
            calibration_factor: effs.map(|e| e.calibration_factor),
        })
    }

    /// Detecting elements over every module type.
    #[must_use]
    pub fn total_detecting_elements(&self) -> usize {
        self.module_types
            .iter()
            .map(|t| t.num_detecting_elements)
            .sum()
    }

    /// Summary of one pair.
    #[must_use]
    pub fn pair(&self, pair: TypeOfModulePair) -> Option<&PairSummary> {
        self.pairs.iter().find(|p| p.pair == pair)
    }
}

impl fmt::Display for ScannerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scanner: {}", self.model_name)?;
        writeln!(f, "  Module types: {}", self.module_types.len())?;
        writeln!(f, "  Detecting elements: {}", self.total_detecting_elements())?;
        for t in &self.module_types {
            writeln!(f)?;
            writeln!(f, "  Module type {}:", t.type_of_module)?;
            writeln!(f, "    Modules: {}", t.num_modules)?;
            writeln!(f, "    Elements per module: {}", t.num_elements_per_module)?;
            writeln!(f, "    Energy bins: {}", t.num_energy_bins)?;
            writeln!(f, "    Energy mid points: {:?}", t.energy_mid_points)?;
        }
        if !self.pairs.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Module-type pairs:")?;
            for p in &self.pairs {
                write!(f, "    {}: {} TOF bins", p.pair, p.num_tof_bins)?;
                if let Some(n) = p.num_sgids {
                    write!(f, ", {n} SGIDs")?;
                }
                writeln!(f)?;
            }
        }
        match self.calibration_factor {
            Some(c) => writeln!(f, "  Calibration factor: {c}"),
            None => writeln!(f, "  Detection efficiencies: none"),
        }
    }
}
