//! Complete synthetic scanner descriptions.

use tracing::{debug, info};

use scanner_bins::BinCodec;
use scanner_types::{
    BinEdges, DetectionEfficiencies, PairTable, ScannerInformation, TypeOfModulePair,
};

use crate::config::CylindricalBlocksConfig;
use crate::error::{Result, SynthError};
use crate::geometry::scanner_geometry;
use crate::symmetry::{SymmetryPolicy, build_module_pair_tables};

/// Model name of scanners built by [`scanner_information`].
pub const SYNTHETIC_MODEL_NAME: &str = "SYNTHETIC_CYLINDRICAL";

/// Calibration factor attached by [`scanner_information`]. Arbitrary.
pub const SYNTHETIC_CALIBRATION_FACTOR: f32 = 42.0;

/// TOF resolution (mm) of coincidences between different module types,
/// which carry no timing information.
pub const CROSS_TYPE_TOF_RESOLUTION: f32 = 1000.0;

/// Geometry, energy and TOF binning, and synthetic efficiencies for one
/// module type per configuration.
///
/// The coincidence window of each pair spans `±(radius0 + radius1)`. Pairs of
/// different types get a single TOF bin.
///
/// # Errors
///
/// Fails if any configuration is invalid.
///
/// # Example
///
/// ```
/// use scanner_synth::{CylindricalBlocksConfig, scanner_information};
/// use scanner_types::TypeOfModulePair;
///
/// let scanner = scanner_information(&[
///     CylindricalBlocksConfig::large_ring().with_modules(4, 1),
///     CylindricalBlocksConfig::half_ring_insert().with_modules(3, 1),
/// ])
/// .unwrap();
/// assert_eq!(scanner.number_of_module_types(), 2);
/// assert_eq!(scanner.number_of_tof_bins(TypeOfModulePair::new(0, 0)), 11);
/// assert_eq!(scanner.number_of_tof_bins(TypeOfModulePair::new(0, 1)), 1);
/// ```
pub fn scanner_information(configs: &[CylindricalBlocksConfig]) -> Result<ScannerInformation> {
    let geometry = scanner_geometry(configs)?;
    let energy_edges = configs
        .iter()
        .map(|c| BinEdges::linspace(c.lld, c.uld, c.number_of_event_energy_bins))
        .collect();

    let mut scanner = ScannerInformation::new(SYNTHETIC_MODEL_NAME, geometry, energy_edges);
    scanner.energy_resolution_at_511 = configs.iter().map(|c| c.energy_resolution).collect();
    scanner.tof_bin_edges = PairTable::from_fn(configs.len(), |pair| {
        let (c0, c1) = pair_configs(configs, pair);
        let max_distance = c0.radius + c1.radius;
        let num_bins = if pair.is_same_type() {
            c0.number_of_tof_bins
        } else {
            1
        };
        BinEdges::linspace(-max_distance, max_distance, num_bins)
    });
    scanner.tof_resolution = PairTable::from_fn(configs.len(), |pair| {
        if pair.is_same_type() {
            pair_configs(configs, pair).0.tof_resolution
        } else {
            CROSS_TYPE_TOF_RESOLUTION
        }
    });

    let effs = synthetic_efficiencies(&scanner, configs, SYNTHETIC_CALIBRATION_FACTOR)?;
    info!(
        model = SYNTHETIC_MODEL_NAME,
        num_module_types = configs.len(),
        "built synthetic scanner"
    );
    Ok(scanner.with_detection_efficiencies(effs))
}

/// Non-physical efficiencies for a scanner built from `configs`.
///
/// Per-bin efficiencies are all 1. Pairs of the same type use
/// [`SymmetryPolicy::RingAdjacent`], pairs of different types
/// [`SymmetryPolicy::AllDistinct`]; every table of group `g` is filled with
/// `g`, so group 0 is never detected.
///
/// # Errors
///
/// Fails if `configs` does not describe the scanner's module types.
pub fn synthetic_efficiencies(
    scanner: &ScannerInformation,
    configs: &[CylindricalBlocksConfig],
    calibration_factor: f32,
) -> Result<DetectionEfficiencies> {
    let num_types = scanner.number_of_module_types();
    if configs.len() != num_types {
        return Err(SynthError::invalid_config(format!(
            "{} module configurations for a scanner with {num_types} module types",
            configs.len()
        )));
    }
    let codec = BinCodec::new(scanner)?;
    let bin_effs = codec
        .layouts()
        .iter()
        .map(|layout| vec![1.0; layout.num_detection_bins()])
        .collect();

    let mut luts = PairTable::new(num_types);
    let mut vectors = PairTable::new(num_types);
    for pair in TypeOfModulePair::all(num_types) {
        let policy = if pair.is_same_type() {
            SymmetryPolicy::ring_adjacent(pair_configs(configs, pair).0)
        } else {
            SymmetryPolicy::AllDistinct
        };
        #[allow(clippy::cast_precision_loss)]
        let (lut, vector) = build_module_pair_tables(scanner, pair, policy, |sgid| sgid as f32)?;
        luts.insert(pair, lut);
        vectors.insert(pair, vector);
    }
    debug!(num_types, calibration_factor, "built synthetic detection efficiencies");

    Ok(DetectionEfficiencies::default()
        .with_calibration_factor(calibration_factor)
        .with_detection_bin_efficiencies(bin_effs)
        .with_module_pair_efficiencies(luts, vectors))
}

/// Configurations of both sides; callers guarantee the pair is in range.
fn pair_configs(
    configs: &[CylindricalBlocksConfig],
    pair: TypeOfModulePair,
) -> (&CylindricalBlocksConfig, &CylindricalBlocksConfig) {
    (
        &configs[pair.first().index()],
        &configs[pair.second().index()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scanner_efficiency::validate_efficiencies;

    fn configs() -> Vec<CylindricalBlocksConfig> {
        vec![
            CylindricalBlocksConfig::large_ring()
                .with_modules(4, 2)
                .with_crystals_per_module([1, 2, 2]),
            CylindricalBlocksConfig::half_ring_insert()
                .with_modules(3, 1)
                .with_crystals_per_module([1, 1, 2]),
        ]
    }

    #[test]
    fn binning() {
        let s = scanner_information(&configs()).unwrap();
        assert_eq!(s.model_name, SYNTHETIC_MODEL_NAME);
        assert_eq!(s.event_energy_bin_edges[0].number_of_bins(), 3);
        assert_relative_eq!(s.event_energy_bin_edges[0].edges[0], 450.0);
        assert_relative_eq!(s.event_energy_bin_edges[1].edges[1], 640.0);
        assert_eq!(s.energy_resolution_at_511, vec![0.1, 0.8]);

        let cross = s.tof_bin_edges.get(TypeOfModulePair::new(1, 0)).unwrap();
        assert_eq!(cross.number_of_bins(), 1);
        assert_relative_eq!(cross.edges[0], -550.0);
        assert_relative_eq!(cross.edges[1], 550.0);
        assert_eq!(s.number_of_tof_bins(TypeOfModulePair::new(1, 1)), 5);
        assert_eq!(
            s.tof_resolution.get(TypeOfModulePair::new(0, 1)),
            Some(&CROSS_TYPE_TOF_RESOLUTION)
        );
        assert_eq!(s.tof_resolution.get(TypeOfModulePair::new(0, 0)), Some(&9.0));
    }

    #[test]
    fn efficiencies_are_consistent() {
        let s = scanner_information(&configs()).unwrap();
        assert!(validate_efficiencies(&s).is_ok());
        let effs = s.detection_efficiencies.as_ref().unwrap();
        assert_relative_eq!(effs.calibration_factor, SYNTHETIC_CALIBRATION_FACTOR);
        let vectors = effs.module_pair_efficiencies_vectors.as_ref().unwrap();
        // 2 * 2 * (4 - 1)
        assert_eq!(vectors.get(TypeOfModulePair::new(0, 0)).map(Vec::len), Some(12));
        // one axial slot: 1 * 1 * (3 - 1)
        assert_eq!(vectors.get(TypeOfModulePair::new(1, 1)).map(Vec::len), Some(2));
        // 8 x 3 module pairs, no symmetry
        assert_eq!(vectors.get(TypeOfModulePair::new(0, 1)).map(Vec::len), Some(24));
    }

    #[test]
    fn table_values_follow_group() {
        let s = scanner_information(&configs()).unwrap();
        let effs = s.detection_efficiencies.as_ref().unwrap();
        let vector = effs
            .module_pair_efficiencies_vectors
            .as_ref()
            .and_then(|v| v.get(TypeOfModulePair::new(0, 1)))
            .unwrap();
        // 4 elements * 3 energy bins by 2 elements * 1 energy bin
        assert_eq!(vector[5].values.shape(), (12, 2));
        assert_relative_eq!(vector[5].values[(3, 1)], 5.0);
    }

    #[test]
    fn config_count_must_match() {
        let s = scanner_information(&configs()).unwrap();
        assert!(matches!(
            synthetic_efficiencies(&s, &configs()[..1], 1.0),
            Err(SynthError::InvalidConfig { .. })
        ));
    }
}
