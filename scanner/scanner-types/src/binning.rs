//! Bin edges for event energy and time-of-flight.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Monotonic bin edges; `n` edges describe `n - 1` bins.
///
/// # Example
///
/// ```
/// use scanner_types::BinEdges;
///
/// let energy = BinEdges::linspace(430.0, 650.0, 3);
/// assert_eq!(energy.number_of_bins(), 3);
/// assert_eq!(energy.edges.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinEdges {
    /// Edge values, ascending.
    pub edges: Vec<f32>,
}

impl BinEdges {
    /// Wraps a list of edges.
    #[must_use]
    pub const fn new(edges: Vec<f32>) -> Self {
        Self { edges }
    }

    /// `num_bins` equal-width bins spanning `[lo, hi]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Bin counts are small
    pub fn linspace(lo: f32, hi: f32, num_bins: usize) -> Self {
        if num_bins == 0 {
            return Self::default();
        }
        let step = (hi - lo) / num_bins as f32;
        let mut edges: Vec<f32> = (0..num_bins).map(|i| lo + step * i as f32).collect();
        edges.push(hi);
        Self { edges }
    }

    /// Number of bins (zero when fewer than two edges are present).
    #[must_use]
    pub fn number_of_bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Centre of every bin.
    #[must_use]
    pub fn mid_points(&self) -> Vec<f32> {
        self.edges
            .windows(2)
            .map(|w| 0.5 * (w[0] + w[1]))
            .collect()
    }
}
