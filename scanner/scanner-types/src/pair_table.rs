//! Square tables keyed by ordered module-type pairs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::TypeOfModulePair;

/// A `num_types x num_types` table with optional entries, addressed by
/// [`TypeOfModulePair`].
///
/// Used for per-pair data whose shape differs from pair to pair (SGID
/// lookup tables, efficiency vectors, TOF edges). An absent entry means
/// "no data for this pair".
///
/// # Example
///
/// ```
/// use scanner_types::{PairTable, TypeOfModulePair};
///
/// let mut table: PairTable<u32> = PairTable::new(2);
/// table.insert(TypeOfModulePair::new(0, 1), 7);
///
/// assert_eq!(table.get(TypeOfModulePair::new(0, 1)), Some(&7));
/// assert_eq!(table.get(TypeOfModulePair::new(1, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairTable<T> {
    num_types: usize,
    entries: Vec<Option<T>>,
}

impl<T> PairTable<T> {
    /// An empty table for `num_types` module types.
    #[must_use]
    pub fn new(num_types: usize) -> Self {
        let mut entries = Vec::with_capacity(num_types * num_types);
        entries.resize_with(num_types * num_types, || None);
        Self { num_types, entries }
    }

    /// A table with every entry produced by `f`.
    pub fn from_fn(num_types: usize, mut f: impl FnMut(TypeOfModulePair) -> T) -> Self {
        let mut table = Self::new(num_types);
        for pair in TypeOfModulePair::all(num_types) {
            table.insert(pair, f(pair));
        }
        table
    }

    /// Number of module types on each axis.
    #[must_use]
    pub const fn num_types(&self) -> usize {
        self.num_types
    }

    fn slot(&self, pair: TypeOfModulePair) -> Option<usize> {
        let (t0, t1) = (pair.first().index(), pair.second().index());
        (t0 < self.num_types && t1 < self.num_types).then(|| t0 * self.num_types + t1)
    }

    /// Whether `pair` is inside the table bounds.
    #[must_use]
    pub fn contains_pair(&self, pair: TypeOfModulePair) -> bool {
        self.slot(pair).is_some()
    }

    /// Entry for `pair`, if present.
    #[must_use]
    pub fn get(&self, pair: TypeOfModulePair) -> Option<&T> {
        self.slot(pair).and_then(|s| self.entries[s].as_ref())
    }

    /// Mutable entry for `pair`, if present.
    pub fn get_mut(&mut self, pair: TypeOfModulePair) -> Option<&mut T> {
        self.slot(pair).and_then(|s| self.entries[s].as_mut())
    }

    /// Sets the entry for `pair`, returning the previous value.
    ///
    /// Pairs outside the table bounds are ignored and handed back.
    pub fn insert(&mut self, pair: TypeOfModulePair, value: T) -> Option<T> {
        match self.slot(pair) {
            Some(s) => self.entries[s].replace(value),
            None => Some(value),
        }
    }

    /// Every pair inside the table bounds, row-major.
    pub fn pairs(&self) -> impl Iterator<Item = TypeOfModulePair> {
        TypeOfModulePair::all(self.num_types)
    }

    /// Present entries with their pairs, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (TypeOfModulePair, &T)> {
        self.pairs()
            .zip(self.entries.iter())
            .filter_map(|(pair, entry)| entry.as_ref().map(|v| (pair, v)))
    }
}

impl<T> Default for PairTable<T> {
    fn default() -> Self {
        Self::new(0)
    }
}
