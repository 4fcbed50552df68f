//! Per-event detection efficiency.

use tracing::{trace, warn};

use scanner_bins::{BinCodec, BinLayout};
use scanner_types::{
    CoincidenceEvent, DMatrix, DetectionBin, DetectionBinEfficiencies, DetectionEfficiencies,
    ExpandedDetectionBin, ModulePairEfficiencies, ScannerInformation, TypeOfModule,
    TypeOfModulePair,
};

use crate::config::EvaluationConfig;
use crate::error::{EfficiencyError, Result};

/// Efficiency of detecting a coincidence between `bin0` (of the pair's first
/// module type) and `bin1` (of its second).
///
/// The factors are, in order: the calibration factor (when
/// `apply_calibration` is set), the two per-bin efficiencies, and the
/// module-pair efficiency of the pair's symmetry group. Both bins are
/// range-checked before any table is read. Evaluation stops at the first
/// zero, so a zero per-bin efficiency never touches the module-pair tables.
/// A LUT entry of `-1` gives zero.
///
/// A scanner without [`DetectionEfficiencies`] yields 1 for every event.
/// Prefer [`EfficiencyModel`] when evaluating many events: this function
/// re-reads the bin cardinalities from the geometry on every call.
///
/// # Errors
///
/// Returns an [`EfficiencyError`] when the efficiency data is inconsistent
/// with the geometry or with itself (SGID past the end of the vector, table
/// labelled with another SGID, missing per-bin entry, bin out of range).
///
/// # Example
///
/// ```
/// use scanner_efficiency::detection_efficiency;
/// use scanner_types::{DetectionBin, ScannerGeometry, ScannerInformation, TypeOfModulePair};
///
/// let scanner = ScannerInformation::new("bare", ScannerGeometry::default(), Vec::new());
/// let eff = detection_efficiency(
///     &scanner,
///     TypeOfModulePair::new(0, 0),
///     DetectionBin(0),
///     DetectionBin(1),
///     true,
/// )
/// .unwrap();
/// assert_eq!(eff, 1.0);
/// ```
pub fn detection_efficiency(
    scanner: &ScannerInformation,
    pair: TypeOfModulePair,
    bin0: DetectionBin,
    bin1: DetectionBin,
    apply_calibration: bool,
) -> Result<f32> {
    let Some(effs) = scanner.detection_efficiencies.as_ref() else {
        trace!(%pair, "no detection efficiencies, using 1");
        return Ok(1.0);
    };
    evaluate(effs, pair, bin0, bin1, apply_calibration, || {
        let geometry = &scanner.scanner_geometry;
        let edges = &scanner.event_energy_bin_edges;
        Ok((
            BinLayout::for_module_type(geometry, edges, pair.first())?,
            BinLayout::for_module_type(geometry, edges, pair.second())?,
        ))
    })
}

/// Efficiency evaluator bound to one scanner.
///
/// Holds the bin layouts of every module type so each event costs two
/// divisions per bin and a handful of array reads.
///
/// # Example
///
/// ```
/// use scanner_efficiency::EfficiencyModel;
/// use scanner_types::{DetectionBin, ScannerGeometry, ScannerInformation, TypeOfModulePair};
///
/// let scanner = ScannerInformation::new("bare", ScannerGeometry::default(), Vec::new());
/// let model = EfficiencyModel::new(&scanner).unwrap();
/// assert!(model.is_degraded());
/// ```
#[derive(Debug, Clone)]
pub struct EfficiencyModel<'a> {
    efficiencies: Option<&'a DetectionEfficiencies>,
    codec: BinCodec,
    config: EvaluationConfig,
}

impl<'a> EfficiencyModel<'a> {
    /// Builds a model with the default [`EvaluationConfig`].
    ///
    /// # Errors
    ///
    /// Fails if a module type lacks energy bin edges or has no energy bins.
    pub fn new(scanner: &'a ScannerInformation) -> Result<Self> {
        Self::with_config(scanner, EvaluationConfig::default())
    }

    /// Builds a model with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or a scanner whose bins cannot be
    /// laid out.
    pub fn with_config(scanner: &'a ScannerInformation, config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        let codec = BinCodec::new(scanner)?;
        let efficiencies = scanner.detection_efficiencies.as_ref();
        if efficiencies.is_none() {
            warn!(
                model = %scanner.model_name,
                "scanner has no detection efficiencies; every efficiency evaluates to 1"
            );
        }
        Ok(Self {
            efficiencies,
            codec,
            config,
        })
    }

    /// Evaluation settings.
    #[must_use]
    pub const fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Bin layouts of the scanner.
    #[must_use]
    pub const fn codec(&self) -> &BinCodec {
        &self.codec
    }

    /// The efficiency data, if any.
    #[must_use]
    pub const fn detection_efficiencies(&self) -> Option<&'a DetectionEfficiencies> {
        self.efficiencies
    }

    /// True when the scanner has no efficiencies and everything evaluates to 1.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.efficiencies.is_none()
    }

    /// Efficiency of a bin pair, calibrated according to the configuration.
    ///
    /// # Errors
    ///
    /// See [`detection_efficiency`].
    pub fn efficiency(
        &self,
        pair: TypeOfModulePair,
        bin0: DetectionBin,
        bin1: DetectionBin,
    ) -> Result<f32> {
        self.efficiency_with_calibration(pair, bin0, bin1, self.config.apply_calibration)
    }

    /// Efficiency of a bin pair with an explicit calibration choice.
    ///
    /// # Errors
    ///
    /// See [`detection_efficiency`].
    pub fn efficiency_with_calibration(
        &self,
        pair: TypeOfModulePair,
        bin0: DetectionBin,
        bin1: DetectionBin,
        apply_calibration: bool,
    ) -> Result<f32> {
        let Some(effs) = self.efficiencies else {
            return Ok(1.0);
        };
        evaluate(effs, pair, bin0, bin1, apply_calibration, || {
            Ok((
                *self.codec.layout(pair.first())?,
                *self.codec.layout(pair.second())?,
            ))
        })
    }

    /// Efficiency of one event of `pair`.
    ///
    /// # Errors
    ///
    /// See [`detection_efficiency`].
    pub fn event_efficiency(&self, pair: TypeOfModulePair, event: &CoincidenceEvent) -> Result<f32> {
        let [bin0, bin1] = event.detection_bins;
        self.efficiency(pair, bin0, bin1)
    }
}

/// Shared evaluation.
///
/// `layouts` is called at most twice: once to range-check the bins before the
/// per-bin tables are read, and once more when only module-pair tables exist.
/// Neither happens when no table is stored.
#[allow(clippy::float_cmp)]
// An exactly-zero factor marks a configuration that is never detected.
pub(crate) fn evaluate(
    effs: &DetectionEfficiencies,
    pair: TypeOfModulePair,
    bin0: DetectionBin,
    bin1: DetectionBin,
    apply_calibration: bool,
    layouts: impl Fn() -> scanner_types::Result<(BinLayout, BinLayout)>,
) -> Result<f32> {
    let mut eff = if apply_calibration {
        effs.calibration_factor
    } else {
        1.0
    };

    let mut resolved = None;
    if let Some(bin_effs) = &effs.detection_bin_efficiencies {
        let bins = resolve_bins(&layouts, bin0, bin1)?;
        eff *= bin_efficiency(bin_effs, pair.first(), bin0)?
            * bin_efficiency(bin_effs, pair.second(), bin1)?;
        resolved = Some(bins);
    }
    if eff == 0.0 {
        return Ok(0.0);
    }

    let Some((lut, vector)) = module_pair_tables(effs, pair)? else {
        return Ok(eff);
    };

    let ResolvedBins {
        layout0,
        layout1,
        expanded0,
        expanded1,
    } = match resolved {
        Some(bins) => bins,
        None => resolve_bins(&layouts, bin0, bin1)?,
    };

    let modules = (
        expanded0.module_index as usize,
        expanded1.module_index as usize,
    );
    let Some(&sgid) = lut.get(modules) else {
        warn!(%pair, ?modules, shape = ?lut.shape(), "module pair outside SGID LUT");
        return Err(EfficiencyError::LutShapeMismatch {
            pair,
            expected: (layout0.num_modules(), layout1.num_modules()),
            found: lut.shape(),
        });
    };
    if sgid < 0 {
        return Ok(0.0);
    }
    let sgid = sgid.unsigned_abs();

    let Some(table) = vector.get(sgid as usize) else {
        warn!(%pair, sgid, num_entries = vector.len(), "SGID past end of efficiency vector");
        return Err(EfficiencyError::SgidOutOfRange {
            pair,
            sgid,
            num_entries: vector.len(),
        });
    };
    if table.sgid != sgid {
        warn!(%pair, sgid, found = table.sgid, "efficiency table labelled with wrong SGID");
        return Err(EfficiencyError::SgidMismatch {
            pair,
            expected: sgid,
            found: table.sgid,
        });
    }

    let index = (
        layout0.module_bin_index(&expanded0),
        layout1.module_bin_index(&expanded1),
    );
    let Some(&value) = table.values.get(index) else {
        warn!(%pair, sgid, ?index, shape = ?table.values.shape(), "element pair outside efficiency table");
        return Err(EfficiencyError::ValuesShapeMismatch {
            pair,
            sgid,
            expected: (layout0.num_bins_per_module(), layout1.num_bins_per_module()),
            found: table.values.shape(),
        });
    };
    Ok(eff * value)
}

/// Layouts of both module types and the bins expanded against them.
struct ResolvedBins {
    layout0: BinLayout,
    layout1: BinLayout,
    expanded0: ExpandedDetectionBin,
    expanded1: ExpandedDetectionBin,
}

fn resolve_bins(
    layouts: impl Fn() -> scanner_types::Result<(BinLayout, BinLayout)>,
    bin0: DetectionBin,
    bin1: DetectionBin,
) -> Result<ResolvedBins> {
    let (layout0, layout1) = layouts()?;
    Ok(ResolvedBins {
        expanded0: layout0.checked_expand(bin0)?,
        expanded1: layout1.checked_expand(bin1)?,
        layout0,
        layout1,
    })
}

fn bin_efficiency(
    bin_effs: &[DetectionBinEfficiencies],
    type_of_module: TypeOfModule,
    bin: DetectionBin,
) -> Result<f32> {
    let per_type = bin_effs.get(type_of_module.index());
    per_type
        .and_then(|v| v.get(bin.index()))
        .copied()
        .ok_or_else(|| EfficiencyError::BinEfficiencyMissing {
            type_of_module,
            bin,
            len: per_type.map_or(0, Vec::len),
        })
}

/// LUT and efficiency vector of `pair`; `None` when neither is stored.
fn module_pair_tables(
    effs: &DetectionEfficiencies,
    pair: TypeOfModulePair,
) -> Result<Option<(&DMatrix<i32>, &[ModulePairEfficiencies])>> {
    let lut = effs
        .module_pair_sgidlut
        .as_ref()
        .and_then(|table| table.get(pair));
    let vector = effs
        .module_pair_efficiencies_vectors
        .as_ref()
        .and_then(|table| table.get(pair));
    match (lut, vector) {
        (Some(lut), Some(vector)) => Ok(Some((lut, vector.as_slice()))),
        (None, None) => Ok(None),
        (None, Some(_)) => Err(EfficiencyError::MissingSgidLut { pair }),
        (Some(_), None) => Err(EfficiencyError::MissingPairTable { pair }),
    }
}
