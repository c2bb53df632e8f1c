//! Weighted scenario selection

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

/// Draws scenario names with probability proportional to their weight
#[derive(Debug, Clone)]
pub struct ScenarioSampler {
    names: Vec<String>,
    index: WeightedIndex<f64>,
}

impl ScenarioSampler {
    /// Build a sampler from a name -> weight mapping
    ///
    /// Zero-weight entries are kept but never drawn. Fails when the mapping is
    /// empty, a weight is negative or not finite, or every weight is zero.
    pub fn new(weights: &BTreeMap<String, f64>) -> PipelineResult<Self> {
        let names: Vec<String> = weights.keys().cloned().collect();
        let index = WeightedIndex::new(weights.values().copied()).map_err(|e| match e {
            WeightedError::NoItem => PipelineError::scenario_error("no scenarios to sample from"),
            WeightedError::InvalidWeight => {
                PipelineError::scenario_error("scenario weights must be finite and non-negative")
            }
            WeightedError::AllWeightsZero => {
                PipelineError::scenario_error("all scenario weights are zero")
            }
            WeightedError::TooMany => PipelineError::scenario_error("too many scenarios"),
        })?;

        debug!("Scenario sampler ready with {} scenarios", names.len());
        Ok(Self { names, index })
    }

    /// Draw one scenario name
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.names[self.index.sample(rng)]
    }

    /// All scenario names, including zero-weight ones
    pub fn scenario_names(&self) -> &[String] {
        &self.names
    }
}
