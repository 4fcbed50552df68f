//! Coincidence events and time blocks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::DetectionBin;
use crate::pair_table::PairTable;

/// Two detection bins hit (nearly) simultaneously, plus a TOF bin.
///
/// Each bin is scoped to the module type given by the
/// [`TypeOfModulePair`](crate::TypeOfModulePair) the event list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoincidenceEvent {
    /// Bins of the first and second detection.
    pub detection_bins: [DetectionBin; 2],
    /// Time-of-flight bin index.
    pub tof_idx: u32,
}

impl CoincidenceEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(bin0: DetectionBin, bin1: DetectionBin, tof_idx: u32) -> Self {
        Self {
            detection_bins: [bin0, bin1],
            tof_idx,
        }
    }
}

/// Half-open time interval `[start, stop)`, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeInterval {
    /// Start time.
    pub start: f32,
    /// Stop time.
    pub stop: f32,
}

impl TimeInterval {
    /// Creates an interval.
    #[must_use]
    pub const fn new(start: f32, stop: f32) -> Self {
        Self { start, stop }
    }

    /// Interval length.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.stop - self.start
    }
}

/// Prompt coincidences recorded during one time interval.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventTimeBlock {
    /// The interval covered.
    pub time_interval: TimeInterval,
    /// Prompt events per module-type pair.
    pub prompt_events: PairTable<Vec<CoincidenceEvent>>,
}

impl EventTimeBlock {
    /// Total prompt count over every module-type pair.
    #[must_use]
    pub fn num_prompts(&self) -> usize {
        self.prompt_events.iter().map(|(_, events)| events.len()).sum()
    }
}
