//! API Regression Tests for the Scanner Crate Ecosystem
//!
//! These tests pin the public API of the scanner crates. They are organized
//! in 5 tiers following the dependency order:
//!
//! - Tier 1: Foundation (scanner-types: transforms, shapes, replication)
//! - Tier 2: Codec (scanner-bins: expand/encode, cardinalities, placement)
//! - Tier 3: Efficiency (scanner-efficiency: SGID lookup, calibration, batches)
//! - Tier 4: Synthesis (scanner-synth: cylindrical scanners, event generation)
//! - Tier 5: Analysis (scanner-analysis: summaries and statistics)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

use approx::assert_relative_eq;
use scanner::{bins, efficiency, prelude::*, types};

/// One module type of `num_modules` x `num_elements` identity placements.
fn flat_scanner(num_modules: usize, num_elements: usize, num_energy_bins: usize) -> ScannerInformation {
    let crystal = types::SolidVolume::new(types::BoxShape::cuboid([20.0, 4.0, 4.0]), 1);
    let elements = types::ReplicatedObject::with_transforms(
        crystal,
        vec![RigidTransform::identity(); num_elements],
    );
    let modules = types::ReplicatedObject::with_transforms(
        types::DetectorModule::new(elements),
        vec![RigidTransform::identity(); num_modules],
    );
    ScannerInformation::new(
        "flat",
        ScannerGeometry::new(vec![modules]),
        vec![BinEdges::linspace(430.0, 650.0, num_energy_bins)],
    )
}

// =============================================================================
// TIER 1: Foundation - Transforms, Shapes, Replication
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn compose_applies_last_transform_first() {
        let a = RigidTransform::ring_rotation(std::f32::consts::FRAC_PI_2, 0.0);
        let b = RigidTransform::translation(10.0, 0.0, 0.0);
        let p = types::Point3::new(1.0, 0.0, 0.0);

        let composed = types::compose(&[a, b]);
        let q = types::apply(&composed, &p);
        let expected = types::apply(&a, &types::apply(&b, &p));
        assert_relative_eq!(q.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(q.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(q.y, -11.0, epsilon = 1e-5);
    }

    #[test]
    fn empty_compose_is_identity() {
        assert_eq!(types::compose(&[]), RigidTransform::identity());
    }

    #[test]
    fn transform_shape_keeps_corner_order() {
        let shape = types::BoxShape::cuboid([1.0, 2.0, 3.0]);
        let moved = types::transform_shape(&RigidTransform::translation(5.0, 0.0, 0.0), &shape);
        for (c, m) in shape.corners().iter().zip(moved.corners()) {
            assert_relative_eq!(m.x, c.x + 5.0);
            assert_relative_eq!(m.y, c.y);
            assert_relative_eq!(m.z, c.z);
        }
    }

    #[test]
    fn replication_shares_one_object() {
        let mut rep = types::ReplicatedObject::new(types::BoxShape::cuboid([1.0, 1.0, 1.0]));
        rep.push(RigidTransform::identity());
        rep.push(RigidTransform::translation(0.0, 0.0, 1.0));
        assert_eq!(rep.num_replicas(), 2);
        assert!(rep.transform(2).is_none());
    }
}

// =============================================================================
// TIER 2: Codec - expand/encode, Cardinalities, Placement
// =============================================================================

mod tier2_codec {
    use super::*;

    #[test]
    fn concrete_encode_expand() {
        let s = flat_scanner(4, 3, 2);
        let geometry = &s.scanner_geometry;
        let edges = &s.event_energy_bin_edges;
        let t = TypeOfModule(0);
        let x = ExpandedDetectionBin::new(2, 1, 1);

        let bin = bins::encode(geometry, edges, t, x).unwrap();
        assert_eq!(bin, DetectionBin(1 + 2 * (1 + 3 * 2)));
        assert_eq!(bin, DetectionBin(15));
        assert_eq!(bins::expand(geometry, edges, t, DetectionBin(15)).unwrap(), x);
    }

    #[test]
    fn cardinality_queries() {
        let s = flat_scanner(4, 3, 2);
        let t = TypeOfModule(0);
        assert_eq!(bins::num_detecting_elements(&s.scanner_geometry, t).unwrap(), 12);
        assert_eq!(
            bins::num_detection_bins(&s.scanner_geometry, &s.event_energy_bin_edges, t).unwrap(),
            24
        );
        assert!(bins::num_detecting_elements(&s.scanner_geometry, TypeOfModule(1)).is_err());
    }

    #[test]
    fn codec_round_trips_every_bin() {
        let s = flat_scanner(4, 3, 2);
        let codec = BinCodec::new(&s).unwrap();
        let t = TypeOfModule(0);
        for b in 0..24 {
            let x = codec.expand(t, DetectionBin(b)).unwrap();
            assert_eq!(codec.encode(t, x).unwrap(), DetectionBin(b));
        }
        assert!(codec.expand(t, DetectionBin(24)).is_err());
    }

    #[test]
    fn batch_conversion() {
        let s = flat_scanner(4, 3, 2);
        let (g, e, t) = (&s.scanner_geometry, &s.event_energy_bin_edges, TypeOfModule(0));
        let raw = [DetectionBin(0), DetectionBin(7), DetectionBin(23)];
        let expanded = bins::expand_detection_bins(g, e, t, &raw).unwrap();
        assert_eq!(expanded[2], ExpandedDetectionBin::new(3, 2, 1));
        assert_eq!(bins::make_detection_bins(g, e, t, &expanded).unwrap(), raw);
    }

    #[test]
    fn resolve_box_places_element() {
        let crystal = types::SolidVolume::new(types::BoxShape::cuboid([1.0, 1.0, 1.0]), 1);
        let elements = types::ReplicatedObject::with_transforms(
            crystal,
            vec![RigidTransform::translation(100.0, 0.0, 0.0)],
        );
        let modules = types::ReplicatedObject::with_transforms(
            types::DetectorModule::new(elements),
            vec![RigidTransform::translation(0.0, 0.0, 50.0)],
        );
        let geometry = ScannerGeometry::new(vec![modules]);
        let shape =
            bins::resolve_box(&geometry, TypeOfModule(0), &ExpandedDetectionBin::new(0, 0, 0))
                .unwrap();
        let c = shape.center();
        assert_relative_eq!(c.x, 100.5);
        assert_relative_eq!(c.z, 50.5);
    }
}

// =============================================================================
// TIER 3: Efficiency - SGID Lookup, Calibration, Batches
// =============================================================================

mod tier3_efficiency {
    use super::*;

    fn two_module_scanner() -> ScannerInformation {
        let pair = TypeOfModulePair::new(0, 0);
        let mut luts = PairTable::new(1);
        luts.insert(pair, types::DMatrix::from_row_slice(2, 2, &[-1, 0, 0, -1]));
        let mut vectors = PairTable::new(1);
        vectors.insert(pair, vec![types::ModulePairEfficiencies::filled(1, 1, 1.0, 0)]);
        flat_scanner(2, 1, 1).with_detection_efficiencies(
            DetectionEfficiencies::default()
                .with_calibration_factor(2.0)
                .with_detection_bin_efficiencies(vec![vec![1.0, 1.0]])
                .with_module_pair_efficiencies(luts, vectors),
        )
    }

    #[test]
    fn concrete_sgid_scenario() {
        let s = two_module_scanner();
        let pair = TypeOfModulePair::new(0, 0);
        assert_eq!(
            detection_efficiency(&s, pair, DetectionBin(0), DetectionBin(1), true).unwrap(),
            2.0
        );
        assert_eq!(
            detection_efficiency(&s, pair, DetectionBin(0), DetectionBin(0), true).unwrap(),
            0.0
        );
        assert!(validate_efficiencies(&s).is_ok());
    }

    #[test]
    fn calibration_is_linear() {
        let s = two_module_scanner();
        let model = EfficiencyModel::new(&s).unwrap();
        let pair = TypeOfModulePair::new(0, 0);
        let (b0, b1) = (DetectionBin(1), DetectionBin(0));
        let calibrated = model.efficiency_with_calibration(pair, b0, b1, true).unwrap();
        let raw = model.efficiency_with_calibration(pair, b0, b1, false).unwrap();
        assert_eq!(calibrated, 2.0 * raw);
    }

    #[test]
    fn zero_bin_efficiency_skips_module_pair_tables() {
        let mut s = two_module_scanner();
        let effs = s.detection_efficiencies.as_mut().unwrap();
        effs.detection_bin_efficiencies = Some(vec![vec![0.0, 1.0]]);
        // A vector that would fail the SGID lookup if it were consulted.
        effs.module_pair_efficiencies_vectors
            .as_mut()
            .unwrap()
            .insert(TypeOfModulePair::new(0, 0), Vec::new());
        let eff = detection_efficiency(
            &s,
            TypeOfModulePair::new(0, 0),
            DetectionBin(0),
            DetectionBin(1),
            true,
        )
        .unwrap();
        assert_eq!(eff, 0.0);
    }

    #[test]
    fn malformed_tables_are_errors() {
        let mut s = two_module_scanner();
        s.detection_efficiencies
            .as_mut()
            .unwrap()
            .module_pair_efficiencies_vectors
            .as_mut()
            .unwrap()
            .insert(
                TypeOfModulePair::new(0, 0),
                vec![types::ModulePairEfficiencies::filled(1, 1, 1.0, 3)],
            );
        let err = detection_efficiency(
            &s,
            TypeOfModulePair::new(0, 0),
            DetectionBin(0),
            DetectionBin(1),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, efficiency::EfficiencyError::SgidMismatch { .. }));
        assert!(validate_efficiencies(&s).is_err());
    }

    #[test]
    fn missing_efficiencies_evaluate_to_one() {
        let s = flat_scanner(2, 1, 1);
        let model = EfficiencyModel::new(&s).unwrap();
        assert!(model.is_degraded());
        let pair = TypeOfModulePair::new(0, 0);
        assert_eq!(model.efficiency(pair, DetectionBin(0), DetectionBin(0)).unwrap(), 1.0);
    }

    #[test]
    fn serial_and_parallel_batches_agree() {
        let s = two_module_scanner();
        let pair = TypeOfModulePair::new(0, 0);
        let events: Vec<_> = (0..1000)
            .map(|i| CoincidenceEvent::new(DetectionBin(i % 2), DetectionBin((i / 2) % 2), 0))
            .collect();
        let serial = EfficiencyModel::with_config(&s, EvaluationConfig::serial()).unwrap();
        let parallel = EfficiencyModel::with_config(
            &s,
            EvaluationConfig::default().with_min_parallel_events(1),
        )
        .unwrap();
        assert_eq!(
            serial.efficiencies(pair, &events).unwrap(),
            parallel.efficiencies(pair, &events).unwrap()
        );
    }
}

// =============================================================================
// TIER 4: Synthesis - Cylindrical Scanners, Event Generation
// =============================================================================

mod tier4_synthesis {
    use super::*;
    use scanner::synth;

    fn configs() -> Vec<CylindricalBlocksConfig> {
        vec![
            CylindricalBlocksConfig::large_ring()
                .with_modules(5, 2)
                .with_crystals_per_module([1, 2, 2]),
            CylindricalBlocksConfig::half_ring_insert()
                .with_modules(4, 1)
                .with_crystals_per_module([1, 1, 3]),
        ]
    }

    #[test]
    fn synthetic_scanner_is_consistent() {
        let s = synth::scanner_information(&configs()).unwrap();
        assert_eq!(s.number_of_module_types(), 2);
        assert!(validate_efficiencies(&s).is_ok());
    }

    #[test]
    fn ring_adjacent_lut() {
        let policy = synth::SymmetryPolicy::RingAdjacent {
            modules_along_axis: 2,
            modules_along_ring: 3,
        };
        let lut = synth::build_sgid_lut(policy, 6, 6).unwrap();
        assert_eq!(lut[(0, 0)], -1);
        assert_eq!(lut[(1, 4)], 5);
        assert_eq!(policy.num_sgids(6, 6), 8);
    }

    #[test]
    fn generated_events_have_positive_efficiency() {
        let s = synth::scanner_information(&configs()).unwrap();
        let mut generator = EventGenerator::new(&s, GeneratorConfig::new().with_seed(21)).unwrap();
        let model = EfficiencyModel::new(&s).unwrap();
        for pair in TypeOfModulePair::all(2) {
            for event in generator.events(pair, 10).unwrap() {
                assert!(model.event_efficiency(pair, &event).unwrap() > 0.0);
            }
        }
    }

    #[test]
    fn rejection_loop_is_capped() {
        let configs = configs();
        let mut s = synth::scanner_information(&configs).unwrap();
        s.detection_efficiencies = Some(synth::synthetic_efficiencies(&s, &configs, 0.0).unwrap());
        let mut generator = EventGenerator::new(
            &s,
            GeneratorConfig::new().with_seed(1).with_max_attempts_per_event(10),
        )
        .unwrap();
        assert!(matches!(
            generator.next_event(TypeOfModulePair::new(0, 1)),
            Err(synth::SynthError::NoCoincidenceFound { attempts: 10, .. })
        ));
    }
}

// =============================================================================
// TIER 5: Analysis - Summaries and Statistics
// =============================================================================

mod tier5_analysis {
    use super::*;
    use scanner::synth;

    #[test]
    fn summary_and_statistics() {
        let s = synth::scanner_information(&[CylindricalBlocksConfig::large_ring()
            .with_modules(4, 1)
            .with_crystals_per_module([1, 2, 2])])
        .unwrap();

        let summary = ScannerSummary::from_scanner(&s).unwrap();
        assert_eq!(summary.total_detecting_elements(), 16);
        assert_eq!(
            summary.pair(TypeOfModulePair::new(0, 0)).unwrap().num_sgids,
            Some(3)
        );

        let blocks = EventGenerator::new(&s, GeneratorConfig::new().with_seed(8))
            .unwrap()
            .time_blocks(2, 1.0, 6)
            .unwrap();
        let stats = summarize_time_blocks(&s, &blocks).unwrap();
        assert_eq!(stats.num_prompts, 12);
        assert_eq!(stats.last_stop_time, Some(2.0));
        assert!(stats.mean_efficiency().unwrap() > 0.0);
    }
}
