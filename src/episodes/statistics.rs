//! Extraction summary

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::episodes::EpisodeFeatures;

/// Counts describing one reconstruction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStatistics {
    /// Rows read from the event table
    pub input_events: usize,
    /// Episodes reconstructed (one per door-open event)
    pub total_episodes: usize,
    /// Episodes with a matched close
    pub matched_episodes: usize,
    /// Episodes without a matched close
    pub outlier_episodes: usize,
    /// Episodes whose span contained a tailgating flag
    pub tailgating_episodes: usize,
}

impl ExtractionStatistics {
    /// Summarize reconstructed episodes
    pub fn from_episodes(input_events: usize, episodes: &[EpisodeFeatures]) -> Self {
        let outlier_episodes = episodes.iter().filter(|e| e.is_outlier).count();
        Self {
            input_events,
            total_episodes: episodes.len(),
            matched_episodes: episodes.len() - outlier_episodes,
            outlier_episodes,
            tailgating_episodes: episodes.iter().filter(|e| e.tailgating_detected).count(),
        }
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            (count as f64 / self.total_episodes as f64) * 100.0
        }
    }

    /// Share of episodes flagged as outliers, in percent
    pub fn outlier_percentage(&self) -> f64 {
        self.percentage(self.outlier_episodes)
    }

    /// Share of episodes with tailgating, in percent
    pub fn tailgating_percentage(&self) -> f64 {
        self.percentage(self.tailgating_episodes)
    }

    /// Generate a multi-line report of the run
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("Episode Extraction Complete\n");
        report.push_str("===========================\n");
        report.push_str(&format!("   Input events: {}\n", self.input_events));
        report.push_str(&format!("   Episodes: {}\n", self.total_episodes));
        report.push_str(&format!("   Matched: {}\n", self.matched_episodes));
        report.push_str(&format!(
            "   Outliers: {} ({:.1}%)\n",
            self.outlier_episodes,
            self.outlier_percentage()
        ));
        report.push_str(&format!(
            "   Tailgating: {} ({:.1}%)\n",
            self.tailgating_episodes,
            self.tailgating_percentage()
        ));

        report
    }
}

impl fmt::Display for ExtractionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}
