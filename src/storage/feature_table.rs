//! Feature table persistence

use std::path::Path;
use tracing::{info, instrument};

use crate::episodes::EpisodeFeatures;
use crate::error::PipelineResult;
use crate::storage::ensure_parent_dir;
use crate::types::format_timestamp;

/// Feature table header, in written order
pub const FEATURE_COLUMNS: [&str; 11] = [
    "Start Time",
    "End Time",
    "Duration",
    "Number of Entries",
    "Hour of Day",
    "Weekend",
    "Tailgating Detected",
    "Human Feedback",
    "Generation Logic",
    "Human Explanation",
    "Outlier Flag",
];

fn flag(value: bool) -> String {
    let text = if value { "1" } else { "0" };
    text.to_string()
}

fn feature_record(episode: &EpisodeFeatures) -> [String; 11] {
    [
        format_timestamp(&episode.start_time),
        episode.end_time.as_ref().map(format_timestamp).unwrap_or_default(),
        episode.duration_secs.map(|secs| secs.to_string()).unwrap_or_default(),
        episode.entry_count.to_string(),
        episode.hour_of_day.to_string(),
        flag(episode.is_weekend),
        flag(episode.tailgating_detected),
        episode.human_feedback.clone(),
        episode.generation_logic.clone(),
        episode.human_explanation.clone(),
        flag(episode.is_outlier),
    ]
}

/// Write the episode feature table, creating parent directories as needed
///
/// Unmatched episodes leave End Time and Duration empty. An empty slice still
/// produces the header line.
#[instrument(skip(path, episodes), fields(path = %path.as_ref().display(), episode_count = episodes.len()))]
pub fn write_episodes<P: AsRef<Path>>(path: P, episodes: &[EpisodeFeatures]) -> PipelineResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(FEATURE_COLUMNS)?;
    for episode in episodes {
        writer.write_record(feature_record(episode))?;
    }
    writer.flush()?;

    info!("Wrote {} episodes to {}", episodes.len(), path.display());
    Ok(())
}
