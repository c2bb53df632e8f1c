//! Dataset assembly
//!
//! This module contains the DatasetAssembler that repeatedly samples a scenario,
//! synthesizes one episode for it and merges every emitted event into a single
//! time-ordered table.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::error::{PipelineError, PipelineResult};
use crate::events::{DoorEvent, EpisodeSynthesizer};
use crate::perf_span;
use crate::simulation::{GenerationStatistics, ScenarioSampler, TimeManager};
use crate::types::SimulationConfig;

/// Runs the sampler and synthesizer for a whole configured dataset
///
/// The random source is constructed once from the configured seed and owned
/// here, so two assemblers built from the same configuration produce the same
/// events.
#[derive(Debug)]
pub struct DatasetAssembler {
    /// Validated configuration
    config: SimulationConfig,
    /// Weighted scenario draw
    sampler: ScenarioSampler,
    /// Per-episode event builder
    synthesizer: EpisodeSynthesizer,
    /// Seeded random source shared by sampler and synthesizer
    rng: StdRng,
    /// Counts for the last generated dataset
    statistics: GenerationStatistics,
}

impl DatasetAssembler {
    /// Create an assembler for the given configuration
    ///
    /// Fails when the configuration does not validate.
    #[instrument(skip(config), fields(num_episodes = config.simulation.num_episodes))]
    pub fn new(config: SimulationConfig) -> PipelineResult<Self> {
        config.validate()?;

        let sampler = ScenarioSampler::new(&config.scenario_weights)?;
        let synthesizer = EpisodeSynthesizer::new(TimeManager::new(config.simulation.start_date));
        let seed = config.effective_seed();

        info!(
            "Initializing dataset assembler: {} episodes over {} scenarios, seed {}",
            config.simulation.num_episodes,
            sampler.scenario_names().len(),
            seed
        );

        Ok(Self {
            config,
            sampler,
            synthesizer,
            rng: StdRng::seed_from_u64(seed),
            statistics: GenerationStatistics::new(seed),
        })
    }

    /// Generate every episode and return all events sorted by timestamp
    ///
    /// Events with equal timestamps keep their emission order.
    #[instrument(skip(self))]
    pub fn generate(&mut self) -> PipelineResult<Vec<DoorEvent>> {
        let _span = perf_span!("dataset_generation").entered();
        let started = Instant::now();
        let total = self.config.simulation.num_episodes;
        self.statistics = GenerationStatistics::new(self.config.effective_seed());

        let mut events = Vec::new();
        for episode_id in 0..total {
            let scenario = self.sampler.sample(&mut self.rng).to_string();
            let params = self.config.scenario(&scenario).ok_or_else(|| {
                PipelineError::scenario_error(format!("no parameters for scenario '{}'", scenario))
            })?;

            let episode = self.synthesizer.synthesize(episode_id, &scenario, params, &mut self.rng)?;
            self.statistics.record_episode(&scenario, episode.events.len(), episode.is_closed());
            events.extend(episode.events);

            if (episode_id + 1) % 1000 == 0 {
                debug!("Generated {}/{} episodes", episode_id + 1, total);
            }
        }

        events.sort_by_key(|event| event.timestamp);
        self.statistics.set_generation_duration(started.elapsed());

        info!(
            "Generated {} events across {} episodes: {}",
            events.len(),
            total,
            self.statistics.scenario_counts_line()
        );

        Ok(events)
    }

    /// Get the configuration in use
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get statistics for the last generated dataset
    pub fn statistics(&self) -> &GenerationStatistics {
        &self.statistics
    }
}
