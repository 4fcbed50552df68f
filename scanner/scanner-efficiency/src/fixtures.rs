//! Small scanners shared by the unit tests.

use scanner_types::{
    BinEdges, BoxShape, DMatrix, DetectionEfficiencies, DetectorModule, ModulePairEfficiencies,
    PairTable, ReplicatedObject, RigidTransform, ScannerGeometry, ScannerInformation, SolidVolume,
    TypeOfModulePair,
};

/// One module type with identity placements.
pub fn scanner(num_modules: usize, num_elements: usize, num_energy_bins: usize) -> ScannerInformation {
    let crystal = SolidVolume::new(BoxShape::cuboid([20.0, 4.0, 4.0]), 1);
    let elements =
        ReplicatedObject::with_transforms(crystal, vec![RigidTransform::identity(); num_elements]);
    let modules = ReplicatedObject::with_transforms(
        DetectorModule::new(elements),
        vec![RigidTransform::identity(); num_modules],
    );
    ScannerInformation::new(
        "fixture",
        ScannerGeometry::new(vec![modules]),
        vec![BinEdges::linspace(430.0, 650.0, num_energy_bins)],
    )
}

/// Two modules of one element and one energy bin, so bin `i` is module `i`.
///
/// LUT `[[-1, 0], [0, -1]]`, one all-ones table, per-bin efficiencies all 1,
/// calibration 2.
pub fn two_module_scanner() -> ScannerInformation {
    let pair = TypeOfModulePair::new(0, 0);
    let lut = DMatrix::from_row_slice(2, 2, &[-1, 0, 0, -1]);
    let mut luts = PairTable::new(1);
    luts.insert(pair, lut);
    let mut vectors = PairTable::new(1);
    vectors.insert(pair, vec![ModulePairEfficiencies::filled(1, 1, 1.0, 0)]);

    let effs = DetectionEfficiencies::default()
        .with_calibration_factor(2.0)
        .with_detection_bin_efficiencies(vec![vec![1.0, 1.0]])
        .with_module_pair_efficiencies(luts, vectors);
    scanner(2, 1, 1).with_detection_efficiencies(effs)
}

/// 3 modules, 2 elements, 2 energy bins, every module pair its own SGID and
/// table values encoding their position: `sgid * 100 + row * 10 + col`.
pub fn labelled_scanner() -> ScannerInformation {
    let pair = TypeOfModulePair::new(0, 0);
    let lut = DMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as i32);
    let vector = (0..9u32)
        .map(|sgid| {
            let values = DMatrix::from_fn(4, 4, |r, c| (sgid * 100) as f32 + (r * 10 + c) as f32);
            ModulePairEfficiencies::new(values, sgid)
        })
        .collect();
    let mut luts = PairTable::new(1);
    luts.insert(pair, lut);
    let mut vectors = PairTable::new(1);
    vectors.insert(pair, vector);

    let effs = DetectionEfficiencies::default()
        .with_calibration_factor(1.0)
        .with_detection_bin_efficiencies(vec![vec![1.0; 12]])
        .with_module_pair_efficiencies(luts, vectors);
    scanner(3, 2, 2).with_detection_efficiencies(effs)
}
