//! Compact identifiers: module types and detection bins.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index into [`ScannerGeometry::replicated_modules`](crate::ScannerGeometry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeOfModule(pub u32);

impl TypeOfModule {
    /// The index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for TypeOfModule {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TypeOfModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered pair of module types.
///
/// Order matters: `(a, b)` and `(b, a)` address different per-pair tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeOfModulePair(pub TypeOfModule, pub TypeOfModule);

impl TypeOfModulePair {
    /// Creates a pair from raw indices.
    #[must_use]
    pub const fn new(first: u32, second: u32) -> Self {
        Self(TypeOfModule(first), TypeOfModule(second))
    }

    /// Module type of the first detection bin.
    #[must_use]
    pub const fn first(self) -> TypeOfModule {
        self.0
    }

    /// Module type of the second detection bin.
    #[must_use]
    pub const fn second(self) -> TypeOfModule {
        self.1
    }

    /// Whether both bins belong to the same module type.
    #[must_use]
    pub const fn is_same_type(self) -> bool {
        self.0.0 == self.1.0
    }

    /// Every ordered pair over `num_types` module types, row-major.
    pub fn all(num_types: usize) -> impl Iterator<Item = Self> {
        let n = num_types as u32;
        (0..n).flat_map(move |t0| (0..n).map(move |t1| Self::new(t0, t1)))
    }
}

impl From<(u32, u32)> for TypeOfModulePair {
    fn from((first, second): (u32, u32)) -> Self {
        Self::new(first, second)
    }
}

impl fmt::Display for TypeOfModulePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Flat detection-bin index, scoped to one module type.
///
/// Encodes `(module, element, energy)` as
/// `energy + num_energy * (element + num_elements_per_module * module)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionBin(pub u32);

impl DetectionBin {
    /// The bin as `usize`, for indexing per-bin tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DetectionBin {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DetectionBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A detection bin split into its module, element and energy indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpandedDetectionBin {
    /// Module instance within the module type.
    pub module_index: u32,
    /// Detecting element within the module.
    pub element_index: u32,
    /// Event energy bin.
    pub energy_index: u32,
}

impl ExpandedDetectionBin {
    /// Creates an expanded bin.
    #[must_use]
    pub const fn new(module_index: u32, element_index: u32, energy_index: u32) -> Self {
        Self {
            module_index,
            element_index,
            energy_index,
        }
    }
}

impl fmt::Display for ExpandedDetectionBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{module: {}, element: {}, energy: {}}}",
            self.module_index, self.element_index, self.energy_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_ordered() {
        let a = TypeOfModulePair::new(0, 1);
        let b = TypeOfModulePair::new(1, 0);
        assert_ne!(a, b);
        assert_eq!(a.first(), TypeOfModule(0));
        assert_eq!(b.first(), TypeOfModule(1));
        assert!(!a.is_same_type());
        assert!(TypeOfModulePair::new(1, 1).is_same_type());
    }

    #[test]
    fn all_pairs_row_major() {
        let pairs: Vec<_> = TypeOfModulePair::all(2).collect();
        assert_eq!(
            pairs,
            vec![
                TypeOfModulePair::new(0, 0),
                TypeOfModulePair::new(0, 1),
                TypeOfModulePair::new(1, 0),
                TypeOfModulePair::new(1, 1),
            ]
        );
        assert_eq!(TypeOfModulePair::all(0).count(), 0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(TypeOfModulePair::from((2, 3)).to_string(), "(2, 3)");
        assert_eq!(DetectionBin(15).to_string(), "15");
        let e = ExpandedDetectionBin::new(2, 1, 1);
        assert_eq!(e.to_string(), "{module: 2, element: 1, energy: 1}");
    }
}
