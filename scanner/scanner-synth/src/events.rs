//! Acceptance-rejection sampling of coincidence events.
//!
//! A candidate bin pair is drawn uniformly and kept when its detection
//! efficiency is positive. The loop is capped per event by
//! [`GeneratorConfig::max_attempts_per_event`], so a scanner where nothing is
//! in coincidence fails with [`SynthError::NoCoincidenceFound`] instead of
//! spinning.

use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::{info, warn};

use scanner_bins::BinLayout;
use scanner_efficiency::{EfficiencyModel, EvaluationConfig};
use scanner_types::{
    CoincidenceEvent, DetectionBin, EventTimeBlock, ExpandedDetectionBin, PairTable,
    ScannerInformation, TimeInterval, TypeOfModulePair,
};

use crate::config::GeneratorConfig;
use crate::error::{Result, SynthError};

/// Draws coincidence events for one scanner.
///
/// # Example
///
/// ```
/// use scanner_synth::{CylindricalBlocksConfig, EventGenerator, GeneratorConfig, scanner_information};
/// use scanner_types::TypeOfModulePair;
///
/// let scanner = scanner_information(&[
///     CylindricalBlocksConfig::large_ring().with_modules(4, 1),
/// ])
/// .unwrap();
/// let mut generator = EventGenerator::new(&scanner, GeneratorConfig::new().with_seed(3)).unwrap();
/// let events = generator.events(TypeOfModulePair::new(0, 0), 5).unwrap();
/// assert_eq!(events.len(), 5);
/// ```
pub struct EventGenerator<'a> {
    scanner: &'a ScannerInformation,
    model: EfficiencyModel<'a>,
    config: GeneratorConfig,
    rng: StdRng,
}

impl<'a> EventGenerator<'a> {
    /// Creates a generator, seeded from the configuration or from entropy.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or a scanner whose bins cannot be
    /// laid out.
    pub fn new(scanner: &'a ScannerInformation, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let eval = EvaluationConfig::serial().with_apply_calibration(config.apply_calibration);
        let model = EfficiencyModel::with_config(scanner, eval)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            scanner,
            model,
            config,
            rng,
        })
    }

    /// The generator settings.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The efficiency model used for acceptance.
    #[must_use]
    pub const fn model(&self) -> &EfficiencyModel<'a> {
        &self.model
    }

    /// One accepted event of `pair`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::NoCoincidenceFound`] when no candidate is accepted
    /// within the attempt budget, [`SynthError::InvalidConfig`] for a pair
    /// without bins, and any efficiency evaluation error.
    pub fn next_event(&mut self, pair: TypeOfModulePair) -> Result<CoincidenceEvent> {
        let layout0 = *self.model.codec().layout(pair.first())?;
        let layout1 = *self.model.codec().layout(pair.second())?;
        let num_tof_bins = self.scanner.number_of_tof_bins(pair);
        if layout0.num_detection_bins() == 0 || layout1.num_detection_bins() == 0 {
            return Err(SynthError::invalid_config(format!(
                "module-type pair {pair} has no detection bins"
            )));
        }
        if num_tof_bins == 0 {
            return Err(SynthError::invalid_config(format!(
                "module-type pair {pair} has no TOF bins"
            )));
        }

        let max_attempts = self.config.max_attempts_per_event;
        let half = max_attempts / 2;
        for attempt in 1..=max_attempts {
            if half > 0 && attempt == half + 1 {
                warn!(%pair, attempts = half, max_attempts, "rejection loop past half its budget");
            }
            let bin0 = self.sample_structured(&layout0)?;
            let bin1 = DetectionBin(self.rng.gen_range(0..layout1.num_detection_bins()) as u32);
            if self.model.efficiency(pair, bin0, bin1)? > 0.0 {
                let tof_idx = self.rng.gen_range(0..num_tof_bins) as u32;
                return Ok(CoincidenceEvent::new(bin0, bin1, tof_idx));
            }
        }
        Err(SynthError::NoCoincidenceFound {
            pair,
            attempts: max_attempts,
        })
    }

    /// Draws module, element and energy independently and encodes them.
    fn sample_structured(&mut self, layout: &BinLayout) -> Result<DetectionBin> {
        let expanded = ExpandedDetectionBin::new(
            self.rng.gen_range(0..layout.num_modules()) as u32,
            self.rng.gen_range(0..layout.num_elements_per_module()) as u32,
            self.rng.gen_range(0..layout.num_energy_bins()) as u32,
        );
        let bin = layout.checked_encode(expanded)?;
        debug_assert_eq!(layout.expand(bin), expanded);
        Ok(bin)
    }

    /// `count` accepted events of `pair`.
    ///
    /// # Errors
    ///
    /// See [`EventGenerator::next_event`].
    pub fn events(&mut self, pair: TypeOfModulePair, count: usize) -> Result<Vec<CoincidenceEvent>> {
        (0..count).map(|_| self.next_event(pair)).collect()
    }

    /// Consecutive time blocks of `block_duration` ms starting at 0, each with
    /// `events_per_pair` prompts for every module-type pair.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive duration or when sampling fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn time_blocks(
        &mut self,
        num_blocks: usize,
        block_duration: f32,
        events_per_pair: usize,
    ) -> Result<Vec<EventTimeBlock>> {
        if !(block_duration.is_finite() && block_duration > 0.0) {
            return Err(SynthError::invalid_config(format!(
                "block duration must be positive, got {block_duration}"
            )));
        }
        let num_types = self.scanner.number_of_module_types();
        let mut blocks = Vec::with_capacity(num_blocks);
        for i in 0..num_blocks {
            let start = i as f32 * block_duration;
            let mut prompt_events = PairTable::new(num_types);
            for pair in TypeOfModulePair::all(num_types) {
                prompt_events.insert(pair, self.events(pair, events_per_pair)?);
            }
            let block = EventTimeBlock {
                time_interval: TimeInterval::new(start, start + block_duration),
                prompt_events,
            };
            info!(
                block = i,
                start,
                num_prompts = block.num_prompts(),
                "generated time block"
            );
            blocks.push(block);
        }
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CylindricalBlocksConfig;
    use crate::scanner::{scanner_information, synthetic_efficiencies};
    use approx::assert_relative_eq;

    fn configs() -> Vec<CylindricalBlocksConfig> {
        vec![
            CylindricalBlocksConfig::large_ring()
                .with_modules(4, 1)
                .with_crystals_per_module([1, 2, 1]),
            CylindricalBlocksConfig::half_ring_insert()
                .with_modules(3, 1)
                .with_crystals_per_module([1, 1, 2]),
        ]
    }

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig::new().with_seed(seed)
    }

    #[test]
    fn accepted_events_are_detectable() {
        let s = scanner_information(&configs()).unwrap();
        let mut generator = EventGenerator::new(&s, seeded(11)).unwrap();
        for pair in TypeOfModulePair::all(2) {
            let num_tof = s.number_of_tof_bins(pair) as u32;
            for event in generator.events(pair, 20).unwrap() {
                assert!(generator.model().event_efficiency(pair, &event).unwrap() > 0.0);
                assert!(event.tof_idx < num_tof);
            }
        }
    }

    #[test]
    fn same_seed_same_events() {
        let s = scanner_information(&configs()).unwrap();
        let pair = TypeOfModulePair::new(1, 0);
        let a = EventGenerator::new(&s, seeded(5)).unwrap().events(pair, 30).unwrap();
        let b = EventGenerator::new(&s, seeded(5)).unwrap().events(pair, 30).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_calibration_exhausts_budget() {
        let configs = configs();
        let mut s = scanner_information(&configs).unwrap();
        s.detection_efficiencies = Some(synthetic_efficiencies(&s, &configs, 0.0).unwrap());

        let config = seeded(1).with_max_attempts_per_event(25);
        let mut generator = EventGenerator::new(&s, config.clone()).unwrap();
        let pair = TypeOfModulePair::new(0, 0);
        assert_eq!(
            generator.next_event(pair),
            Err(SynthError::NoCoincidenceFound { pair, attempts: 25 })
        );

        let mut uncalibrated =
            EventGenerator::new(&s, config.with_apply_calibration(false)).unwrap();
        assert!(uncalibrated.next_event(pair).is_ok());
    }

    #[test]
    fn time_blocks_cover_every_pair() {
        let s = scanner_information(&configs()).unwrap();
        let mut generator = EventGenerator::new(&s, seeded(2)).unwrap();
        let blocks = generator.time_blocks(3, 1.5, 4).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_relative_eq!(blocks[2].time_interval.start, 3.0);
        assert_relative_eq!(blocks[2].time_interval.stop, 4.5);
        for block in &blocks {
            assert_eq!(block.num_prompts(), 16);
            for pair in TypeOfModulePair::all(2) {
                assert_eq!(block.prompt_events.get(pair).map(Vec::len), Some(4));
            }
        }
        assert!(generator.time_blocks(1, 0.0, 1).is_err());
    }

    #[test]
    fn unknown_pair_is_an_error() {
        let s = scanner_information(&configs()).unwrap();
        let mut generator = EventGenerator::new(&s, seeded(0)).unwrap();
        assert!(matches!(
            generator.next_event(TypeOfModulePair::new(0, 2)),
            Err(SynthError::Scanner(_))
        ));
    }
}
