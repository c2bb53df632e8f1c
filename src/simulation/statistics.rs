//! Statistics collection and reporting for dataset generation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Counts collected while assembling a synthetic dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStatistics {
    /// Number of episodes synthesized
    pub total_episodes: usize,
    /// Number of events emitted across all episodes
    pub total_events: usize,
    /// Episodes that emitted no door-close event
    pub unclosed_episodes: usize,
    /// Episodes per scenario name
    pub scenario_counts: BTreeMap<String, usize>,
    /// Seed the run was generated with
    pub seed: u64,
    /// Wall-clock time spent generating
    pub generation_duration: Duration,
}

impl GenerationStatistics {
    /// Create empty statistics for a run with the given seed
    pub fn new(seed: u64) -> Self {
        Self { seed, ..Default::default() }
    }

    /// Record one synthesized episode
    pub fn record_episode(&mut self, scenario: &str, event_count: usize, closed: bool) {
        self.total_episodes += 1;
        self.total_events += event_count;
        if !closed {
            self.unclosed_episodes += 1;
        }
        *self.scenario_counts.entry(scenario.to_string()).or_insert(0) += 1;
    }

    /// Set the generation duration
    pub fn set_generation_duration(&mut self, duration: Duration) {
        self.generation_duration = duration;
    }

    /// Episodes drawn for one scenario
    pub fn scenario_count(&self, scenario: &str) -> usize {
        self.scenario_counts.get(scenario).copied().unwrap_or(0)
    }

    /// Share of episodes drawn for one scenario, in percent
    pub fn scenario_percentage(&self, scenario: &str) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            (self.scenario_count(scenario) as f64 / self.total_episodes as f64) * 100.0
        }
    }

    /// Average number of events per episode
    pub fn average_events_per_episode(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_events as f64 / self.total_episodes as f64
        }
    }

    /// One-line `{name: count, ...}` rendering of the scenario counts
    pub fn scenario_counts_line(&self) -> String {
        let parts: Vec<String> =
            self.scenario_counts.iter().map(|(name, count)| format!("{}: {}", name, count)).collect();
        format!("{{{}}}", parts.join(", "))
    }

    /// Generate a multi-line report of the run
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("Door Episode Simulation Complete\n");
        report.push_str("================================\n");
        report.push_str(&format!("   Seed: {}\n", self.seed));
        report.push_str(&format!("   Episodes: {}\n", self.total_episodes));
        report.push_str(&format!(
            "   Events: {} ({:.1} per episode)\n",
            self.total_events,
            self.average_events_per_episode()
        ));
        report.push_str(&format!("   Episodes without a close event: {}\n", self.unclosed_episodes));
        report.push_str(&format!(
            "   Duration: {:.2} seconds\n\n",
            self.generation_duration.as_secs_f64()
        ));

        report.push_str("Scenario Breakdown:\n");
        for (name, count) in &self.scenario_counts {
            report.push_str(&format!(
                "   {}: {} ({:.1}%)\n",
                name,
                count,
                self.scenario_percentage(name)
            ));
        }

        report
    }
}

impl fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}
