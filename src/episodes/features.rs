//! Episode feature records

use chrono::{NaiveDateTime, Timelike};

use crate::types::is_weekend;

/// One reconstructed episode, derived from a door-open event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeFeatures {
    /// Timestamp of the door-open event
    pub start_time: NaiveDateTime,
    /// Timestamp of the matched door-close event
    pub end_time: Option<NaiveDateTime>,
    /// Whole seconds between open and matched close
    pub duration_secs: Option<i64>,
    /// Distinct subjects seen in the span
    pub entry_count: usize,
    /// Hour of the open event, 0-23
    pub hour_of_day: u32,
    /// The open event fell on a Saturday or Sunday
    pub is_weekend: bool,
    /// Any event in the span flagged tailgating
    pub tailgating_detected: bool,
    /// Mode of the span's feedback labels
    pub human_feedback: String,
    /// Mode of the span's provenance tags
    pub generation_logic: String,
    /// Mode of the span's explanation texts
    pub human_explanation: String,
    /// No close event matched inside the window
    pub is_outlier: bool,
}

impl EpisodeFeatures {
    /// Start a record for an open at `start_time`, closed at `end_time` if matched
    ///
    /// Time-derived fields are filled in; span aggregates start empty.
    pub fn new(start_time: NaiveDateTime, end_time: Option<NaiveDateTime>) -> Self {
        Self {
            start_time,
            end_time,
            duration_secs: end_time.map(|end| (end - start_time).num_seconds()),
            entry_count: 0,
            hour_of_day: start_time.hour(),
            is_weekend: is_weekend(start_time.date()),
            tailgating_detected: false,
            human_feedback: String::new(),
            generation_logic: String::new(),
            human_explanation: String::new(),
            is_outlier: end_time.is_none(),
        }
    }

    /// Whether a close event was matched
    pub fn is_matched(&self) -> bool {
        self.end_time.is_some()
    }
}
