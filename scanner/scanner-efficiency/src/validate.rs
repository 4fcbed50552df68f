//! Eager consistency checks of an efficiency dataset against its scanner.
//!
//! Per-event evaluation catches the same faults lazily; validating once
//! after loading reports them before any event is processed.

use tracing::{debug, warn};

use scanner_bins::BinCodec;
use scanner_types::{
    DMatrix, DetectionEfficiencies, ModulePairEfficiencies, ScannerInformation, TypeOfModule,
    TypeOfModulePair,
};

use crate::error::{EfficiencyError, Result};

/// Checks every structural invariant of the scanner's efficiency data.
///
/// - one per-bin vector per module type, each `num_detection_bins` long
/// - an SGID LUT for a pair exactly when an efficiency vector exists for it
/// - LUT shape `(num_modules0, num_modules1)` with entries `>= -1`
/// - vector length `max(LUT) + 1`, entry `i` labelled SGID `i`
/// - every table `(elements0 * energy0) x (elements1 * energy1)`
///
/// A scanner with no efficiencies is valid.
///
/// # Errors
///
/// Returns the first violation found, scanning module types and pairs in
/// row-major order.
pub fn validate_efficiencies(scanner: &ScannerInformation) -> Result<()> {
    let Some(effs) = scanner.detection_efficiencies.as_ref() else {
        debug!(model = %scanner.model_name, "no detection efficiencies to validate");
        return Ok(());
    };
    let codec = BinCodec::new(scanner)?;
    let num_types = codec.number_of_module_types();

    if let Some(bin_effs) = &effs.detection_bin_efficiencies {
        check_type_count("detection_bin_efficiencies", num_types, bin_effs.len())?;
        for (t, layout) in codec.layouts().iter().enumerate() {
            let expected = layout.num_detection_bins();
            let found = bin_effs[t].len();
            if found != expected {
                return Err(fault(EfficiencyError::BinEfficiencyLength {
                    type_of_module: TypeOfModule(t as u32),
                    expected,
                    found,
                }));
            }
        }
    }

    let mut num_sgids = 0;
    if let Some(luts) = &effs.module_pair_sgidlut {
        check_type_count("module_pair_sgidlut", num_types, luts.num_types())?;
    }
    if let Some(vectors) = &effs.module_pair_efficiencies_vectors {
        check_type_count("module_pair_efficiencies_vectors", num_types, vectors.num_types())?;
    }
    for pair in TypeOfModulePair::all(num_types) {
        num_sgids += validate_pair(effs, &codec, pair)?;
    }

    debug!(
        model = %scanner.model_name,
        num_types,
        num_sgids,
        "detection efficiencies validated"
    );
    Ok(())
}

/// Validates one pair, returning its number of symmetry groups.
fn validate_pair(
    effs: &DetectionEfficiencies,
    codec: &BinCodec,
    pair: TypeOfModulePair,
) -> Result<usize> {
    let lut = effs
        .module_pair_sgidlut
        .as_ref()
        .and_then(|t| t.get(pair));
    let vector = effs
        .module_pair_efficiencies_vectors
        .as_ref()
        .and_then(|t| t.get(pair));
    let (lut, vector) = match (lut, vector) {
        (Some(lut), Some(vector)) => (lut, vector),
        (None, None) => return Ok(0),
        (None, Some(_)) => return Err(fault(EfficiencyError::MissingSgidLut { pair })),
        (Some(_), None) => return Err(fault(EfficiencyError::MissingPairTable { pair })),
    };

    let layout0 = codec.layout(pair.first())?;
    let layout1 = codec.layout(pair.second())?;

    let expected = (layout0.num_modules(), layout1.num_modules());
    if lut.shape() != expected {
        return Err(fault(EfficiencyError::LutShapeMismatch {
            pair,
            expected,
            found: lut.shape(),
        }));
    }
    let max_sgid = max_sgid(lut, pair)?;
    let num_entries = vector.len();
    let expected_entries = max_sgid
        .checked_add(1)
        .and_then(|n| usize::try_from(n).ok());
    if expected_entries != Some(num_entries) {
        return Err(fault(EfficiencyError::NonContiguousSgids {
            pair,
            max_sgid,
            num_entries,
        }));
    }

    let expected = (layout0.num_bins_per_module(), layout1.num_bins_per_module());
    for (i, table) in vector.iter().enumerate() {
        check_table(table, i as u32, pair, expected)?;
    }
    Ok(num_entries)
}

/// Largest LUT entry, rejecting anything below `-1`.
fn max_sgid(lut: &DMatrix<i32>, pair: TypeOfModulePair) -> Result<i32> {
    let mut max = -1;
    for module0 in 0..lut.nrows() {
        for module1 in 0..lut.ncols() {
            let sgid = lut[(module0, module1)];
            if sgid < -1 {
                return Err(fault(EfficiencyError::InvalidSgid {
                    pair,
                    module0,
                    module1,
                    sgid,
                }));
            }
            max = max.max(sgid);
        }
    }
    Ok(max)
}

fn check_table(
    table: &ModulePairEfficiencies,
    sgid: u32,
    pair: TypeOfModulePair,
    expected: (usize, usize),
) -> Result<()> {
    if table.sgid != sgid {
        return Err(fault(EfficiencyError::SgidMismatch {
            pair,
            expected: sgid,
            found: table.sgid,
        }));
    }
    if table.values.shape() != expected {
        return Err(fault(EfficiencyError::ValuesShapeMismatch {
            pair,
            sgid,
            expected,
            found: table.values.shape(),
        }));
    }
    Ok(())
}

fn check_type_count(table: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(fault(EfficiencyError::TypeCountMismatch {
            table,
            expected,
            found,
        }))
    }
}

fn fault(err: EfficiencyError) -> EfficiencyError {
    warn!(error = %err, "invalid detection efficiencies");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{labelled_scanner, scanner, two_module_scanner};
    use scanner_types::PairTable;

    const PAIR: TypeOfModulePair = TypeOfModulePair::new(0, 0);

    fn effs_mut(s: &mut ScannerInformation) -> &mut DetectionEfficiencies {
        s.detection_efficiencies.as_mut().unwrap()
    }

    #[test]
    fn fixtures_are_valid() {
        assert!(validate_efficiencies(&two_module_scanner()).is_ok());
        assert!(validate_efficiencies(&labelled_scanner()).is_ok());
        assert!(validate_efficiencies(&scanner(2, 2, 2)).is_ok());
    }

    #[test]
    fn bin_efficiency_length() {
        let mut s = two_module_scanner();
        effs_mut(&mut s).detection_bin_efficiencies = Some(vec![vec![1.0; 3]]);
        assert_eq!(
            validate_efficiencies(&s),
            Err(EfficiencyError::BinEfficiencyLength {
                type_of_module: TypeOfModule(0),
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn bin_efficiency_type_count() {
        let mut s = two_module_scanner();
        effs_mut(&mut s).detection_bin_efficiencies = Some(vec![vec![1.0; 2]; 2]);
        assert!(matches!(
            validate_efficiencies(&s),
            Err(EfficiencyError::TypeCountMismatch { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn lut_without_vector() {
        let mut s = two_module_scanner();
        effs_mut(&mut s).module_pair_efficiencies_vectors = Some(PairTable::new(1));
        assert_eq!(
            validate_efficiencies(&s),
            Err(EfficiencyError::MissingPairTable { pair: PAIR })
        );
    }

    #[test]
    fn vector_without_lut() {
        let mut s = two_module_scanner();
        effs_mut(&mut s).module_pair_sgidlut = None;
        assert_eq!(
            validate_efficiencies(&s),
            Err(EfficiencyError::MissingSgidLut { pair: PAIR })
        );
    }

    #[test]
    fn lut_shape() {
        let mut s = two_module_scanner();
        effs_mut(&mut s)
            .module_pair_sgidlut
            .as_mut()
            .unwrap()
            .insert(PAIR, DMatrix::from_element(3, 2, 0));
        assert!(matches!(
            validate_efficiencies(&s),
            Err(EfficiencyError::LutShapeMismatch {
                expected: (2, 2),
                found: (3, 2),
                ..
            })
        ));
    }

    #[test]
    fn entries_below_sentinel() {
        let mut s = two_module_scanner();
        effs_mut(&mut s)
            .module_pair_sgidlut
            .as_mut()
            .and_then(|t| t.get_mut(PAIR))
            .unwrap()[(1, 1)] = -2;
        assert!(matches!(
            validate_efficiencies(&s),
            Err(EfficiencyError::InvalidSgid {
                module0: 1,
                module1: 1,
                sgid: -2,
                ..
            })
        ));
    }

    #[test]
    fn vector_longer_than_max_sgid() {
        let mut s = two_module_scanner();
        effs_mut(&mut s)
            .module_pair_efficiencies_vectors
            .as_mut()
            .and_then(|t| t.get_mut(PAIR))
            .unwrap()
            .push(ModulePairEfficiencies::filled(1, 1, 1.0, 1));
        assert!(matches!(
            validate_efficiencies(&s),
            Err(EfficiencyError::NonContiguousSgids {
                max_sgid: 0,
                num_entries: 2,
                ..
            })
        ));
    }

    #[test]
    fn largest_representable_sgid() {
        let mut s = two_module_scanner();
        effs_mut(&mut s)
            .module_pair_sgidlut
            .as_mut()
            .and_then(|t| t.get_mut(PAIR))
            .unwrap()[(0, 1)] = i32::MAX;
        assert!(matches!(
            validate_efficiencies(&s),
            Err(EfficiencyError::NonContiguousSgids {
                max_sgid: i32::MAX,
                num_entries: 1,
                ..
            })
        ));
    }

    #[test]
    fn all_minus_one_with_empty_vector_is_valid() {
        let mut s = two_module_scanner();
        let effs = effs_mut(&mut s);
        effs.module_pair_sgidlut
            .as_mut()
            .unwrap()
            .insert(PAIR, DMatrix::from_element(2, 2, -1));
        effs.module_pair_efficiencies_vectors
            .as_mut()
            .unwrap()
            .insert(PAIR, Vec::new());
        assert!(validate_efficiencies(&s).is_ok());
    }

    #[test]
    fn mislabelled_table() {
        let mut s = labelled_scanner();
        effs_mut(&mut s)
            .module_pair_efficiencies_vectors
            .as_mut()
            .and_then(|t| t.get_mut(PAIR))
            .unwrap()[4]
            .sgid = 5;
        assert_eq!(
            validate_efficiencies(&s),
            Err(EfficiencyError::SgidMismatch {
                pair: PAIR,
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn table_shape() {
        let mut s = labelled_scanner();
        effs_mut(&mut s)
            .module_pair_efficiencies_vectors
            .as_mut()
            .and_then(|t| t.get_mut(PAIR))
            .unwrap()[2] = ModulePairEfficiencies::filled(4, 3, 1.0, 2);
        assert!(matches!(
            validate_efficiencies(&s),
            Err(EfficiencyError::ValuesShapeMismatch {
                sgid: 2,
                expected: (4, 4),
                found: (4, 3),
                ..
            })
        ));
    }
}
