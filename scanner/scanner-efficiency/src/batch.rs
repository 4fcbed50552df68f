//! Batch evaluation over event lists and time blocks.
//!
//! Events are independent, so large batches are split across the rayon
//! thread pool; the scanner description is shared read-only.

use rayon::prelude::*;
use tracing::debug;

use scanner_types::{CoincidenceEvent, EventTimeBlock, PairTable, TypeOfModulePair};

use crate::error::Result;
use crate::model::EfficiencyModel;

impl EfficiencyModel<'_> {
    /// Efficiency of every event of `pair`, in order.
    ///
    /// Runs in parallel when the configuration allows it and the batch is at
    /// least `min_parallel_events` long.
    ///
    /// # Errors
    ///
    /// Returns the first data-integrity fault hit. With parallel evaluation
    /// "first" is not necessarily the lowest event index.
    pub fn efficiencies(
        &self,
        pair: TypeOfModulePair,
        events: &[CoincidenceEvent],
    ) -> Result<Vec<f32>> {
        if self.config().use_parallel(events.len()) {
            events
                .par_iter()
                .map(|event| self.event_efficiency(pair, event))
                .collect()
        } else {
            events
                .iter()
                .map(|event| self.event_efficiency(pair, event))
                .collect()
        }
    }

    /// Sum of the efficiencies of every event of `pair`, accumulated in `f64`.
    ///
    /// # Errors
    ///
    /// See [`EfficiencyModel::efficiencies`].
    pub fn total_efficiency(
        &self,
        pair: TypeOfModulePair,
        events: &[CoincidenceEvent],
    ) -> Result<f64> {
        if self.config().use_parallel(events.len()) {
            events
                .par_iter()
                .map(|event| self.event_efficiency(pair, event).map(f64::from))
                .try_reduce(|| 0.0, |a, b| Ok(a + b))
        } else {
            events
                .iter()
                .try_fold(0.0, |acc, event| {
                    Ok(acc + f64::from(self.event_efficiency(pair, event)?))
                })
        }
    }

    /// Efficiencies of every prompt in a time block, keyed like the block.
    ///
    /// # Errors
    ///
    /// See [`EfficiencyModel::efficiencies`].
    pub fn block_efficiencies(&self, block: &EventTimeBlock) -> Result<PairTable<Vec<f32>>> {
        let mut out = PairTable::new(block.prompt_events.num_types());
        for (pair, events) in block.prompt_events.iter() {
            out.insert(pair, self.efficiencies(pair, events)?);
        }
        debug!(
            start = block.time_interval.start,
            stop = block.time_interval.stop,
            num_prompts = block.num_prompts(),
            "evaluated time block efficiencies"
        );
        Ok(out)
    }
}
