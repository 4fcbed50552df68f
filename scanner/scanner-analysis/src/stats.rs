//! Statistics over list-mode time blocks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rayon::prelude::*;
use tracing::debug;

use scanner_bins::resolve_box;
use scanner_efficiency::{EfficiencyModel, EvaluationConfig};
use scanner_types::{EventTimeBlock, Point3, ScannerInformation, Vector3};

use crate::error::Result;

/// Running sums over prompt events, split by coincidence side.
///
/// Side 0 is the first module type of each event's pair, side 1 the second.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventStatistics {
    /// Time blocks seen.
    pub num_blocks: usize,
    /// Prompt events seen.
    pub num_prompts: usize,
    /// Latest block stop time (ms).
    pub last_stop_time: Option<f32>,
    /// Sum of energy-bin mid points (keV) per side.
    pub energy_sums: [f64; 2],
    /// Sum of calibrated detection efficiencies.
    pub efficiency_sum: f64,
    /// Sum of detecting-box centres (mm) per side.
    pub centre_sums: [Vector3<f64>; 2],
}

impl Default for EventStatistics {
    fn default() -> Self {
        Self {
            num_blocks: 0,
            num_prompts: 0,
            last_stop_time: None,
            energy_sums: [0.0; 2],
            efficiency_sum: 0.0,
            centre_sums: [Vector3::zeros(); 2],
        }
    }
}

impl EventStatistics {
    /// Adds `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        self.num_blocks += other.num_blocks;
        self.num_prompts += other.num_prompts;
        self.last_stop_time = match (self.last_stop_time, other.last_stop_time) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        for side in 0..2 {
            self.energy_sums[side] += other.energy_sums[side];
            self.centre_sums[side] += other.centre_sums[side];
        }
        self.efficiency_sum += other.efficiency_sum;
    }

    /// `self` with `other` added.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn count(&self) -> Option<f64> {
        (self.num_prompts > 0).then(|| self.num_prompts as f64)
    }

    /// Mean efficiency per prompt.
    #[must_use]
    pub fn mean_efficiency(&self) -> Option<f64> {
        self.count().map(|n| self.efficiency_sum / n)
    }

    /// Mean detected energy (keV) on `side`.
    #[must_use]
    pub fn mean_energy(&self, side: usize) -> Option<f64> {
        let sum = self.energy_sums.get(side)?;
        self.count().map(|n| sum / n)
    }

    /// Mean detecting-box centre on `side`.
    #[must_use]
    pub fn mean_box_centre(&self, side: usize) -> Option<Point3<f64>> {
        let sum = self.centre_sums.get(side)?;
        self.count().map(|n| Point3::from(sum / n))
    }
}

/// Per-block evaluation state shared by the rayon workers.
struct BlockEvaluator<'a> {
    scanner: &'a ScannerInformation,
    model: EfficiencyModel<'a>,
    energy_mid_points: Vec<Vec<f32>>,
}

impl<'a> BlockEvaluator<'a> {
    fn new(scanner: &'a ScannerInformation) -> Result<Self> {
        let model = EfficiencyModel::with_config(scanner, EvaluationConfig::serial())?;
        let energy_mid_points = model
            .codec()
            .layouts()
            .iter()
            .map(|layout| -> Result<Vec<f32>> {
                Ok(scanner.energy_bin_edges(layout.type_of_module())?.mid_points())
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            scanner,
            model,
            energy_mid_points,
        })
    }

    fn block(&self, block: &EventTimeBlock) -> Result<EventStatistics> {
        let mut stats = EventStatistics {
            num_blocks: 1,
            last_stop_time: Some(block.time_interval.stop),
            ..EventStatistics::default()
        };
        for (pair, events) in block.prompt_events.iter() {
            let types = [pair.first(), pair.second()];
            for event in events {
                stats.num_prompts += 1;
                stats.efficiency_sum += f64::from(self.model.event_efficiency(pair, event)?);
                for (side, (&t, &bin)) in types.iter().zip(&event.detection_bins).enumerate() {
                    let expanded = self.model.codec().expand(t, bin)?;
                    // The codec checked the bin, so the energy index is in range.
                    let energy = self.energy_mid_points[t.index()][expanded.energy_index as usize];
                    let shape = resolve_box(&self.scanner.scanner_geometry, t, &expanded)?;
                    stats.energy_sums[side] += f64::from(energy);
                    stats.centre_sums[side] += shape.center().coords.cast::<f64>();
                }
            }
        }
        Ok(stats)
    }
}

/// Statistics over every prompt event of `blocks`.
///
/// Blocks are evaluated in parallel and their partial sums merged.
///
/// # Errors
///
/// Fails on the first event whose bins or efficiency cannot be resolved.
///
/// # Example
///
/// ```
/// use scanner_analysis::summarize_time_blocks;
/// use scanner_types::{ScannerGeometry, ScannerInformation};
///
/// let scanner = ScannerInformation::new("empty", ScannerGeometry::default(), Vec::new());
/// let stats = summarize_time_blocks(&scanner, &[]).unwrap();
/// assert_eq!(stats.num_prompts, 0);
/// assert_eq!(stats.mean_efficiency(), None);
/// ```
pub fn summarize_time_blocks(
    scanner: &ScannerInformation,
    blocks: &[EventTimeBlock],
) -> Result<EventStatistics> {
    let evaluator = BlockEvaluator::new(scanner)?;
    let stats = blocks
        .par_iter()
        .map(|block| evaluator.block(block))
        .try_reduce(EventStatistics::default, |a, b| Ok(a.merged(&b)))?;
    debug!(
        num_blocks = stats.num_blocks,
        num_prompts = stats.num_prompts,
        "summarized time blocks"
    );
    Ok(stats)
}
