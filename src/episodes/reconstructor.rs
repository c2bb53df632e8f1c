//! Episode reconstruction
//!
//! Pairs every door-open event with the first still-unused door-close event that
//! follows it inside the match window, then folds the events of each resulting
//! span into an [`EpisodeFeatures`] record.
//!
//! # Matching
//!
//! Opens and closes are both taken in table row order. A single cursor walks the
//! closes and never rewinds: accepting a close moves the cursor past it, and an
//! open that finds nothing in the remaining closes leaves the cursor where it
//! was. Durations are measured as `close - open`, so a close that precedes its
//! open yields a negative duration and is skipped.
//!
//! # Spans
//!
//! A matched episode spans every event whose timestamp lies in
//! `[open, close]`, wherever it sits in the table. An unmatched open spans
//! everything from the open onwards, so it absorbs the rest of the stream.

use chrono::{Duration, NaiveDateTime};
use std::fmt;
use tracing::{debug, info, instrument, warn};

use crate::episodes::aggregate::{any_flag, distinct_count, mode_or_unknown};
use crate::episodes::EpisodeFeatures;
use crate::events::DoorEvent;

/// Shortest excluded open-to-close duration
pub const DEFAULT_MIN_DURATION_SECS: i64 = 1;

/// Longest excluded open-to-close duration
pub const DEFAULT_MAX_DURATION_SECS: i64 = 180;

/// Open interval of accepted open-to-close durations
///
/// Both bounds are excluded: with the default window a close exactly 1 s or
/// exactly 180 s after the open does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWindow {
    min_exclusive: Duration,
    max_exclusive: Duration,
}

impl Default for MatchWindow {
    fn default() -> Self {
        Self::from_secs(DEFAULT_MIN_DURATION_SECS, DEFAULT_MAX_DURATION_SECS)
    }
}

impl MatchWindow {
    /// Window accepting durations strictly between the two bounds
    pub fn new(min_exclusive: Duration, max_exclusive: Duration) -> Self {
        Self { min_exclusive, max_exclusive }
    }

    /// Window with bounds in whole seconds
    pub fn from_secs(min_exclusive: i64, max_exclusive: i64) -> Self {
        Self::new(Duration::seconds(min_exclusive), Duration::seconds(max_exclusive))
    }

    /// Whether a duration falls strictly inside the window
    pub fn contains(&self, duration: Duration) -> bool {
        duration > self.min_exclusive && duration < self.max_exclusive
    }
}

impl fmt::Display for MatchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}s, {}s)",
            self.min_exclusive.num_seconds(),
            self.max_exclusive.num_seconds()
        )
    }
}

/// Result of matching one door-open event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeMatch {
    /// Row index of the door-open event
    pub open_row: usize,
    /// Row index of the consumed door-close event
    pub close_row: Option<usize>,
}

/// Row indices ordered by timestamp, for span lookups
#[derive(Debug)]
struct TimelineIndex<'a> {
    events: &'a [DoorEvent],
    /// Stable sort of row indices by timestamp
    order: Vec<usize>,
}

impl<'a> TimelineIndex<'a> {
    fn new(events: &'a [DoorEvent]) -> Self {
        let mut order: Vec<usize> = (0..events.len()).collect();
        order.sort_by_key(|&row| events[row].timestamp);
        Self { events, order }
    }

    /// Rows with `start <= timestamp <= end` (no upper bound when `end` is
    /// `None`), in table row order
    fn span(&self, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Vec<usize> {
        let lower = self.order.partition_point(|&row| self.events[row].timestamp < start);
        let upper = match end {
            Some(end) => self.order.partition_point(|&row| self.events[row].timestamp <= end),
            None => self.order.len(),
        };

        let mut rows = self.order[lower..upper.max(lower)].to_vec();
        rows.sort_unstable();
        rows
    }
}

/// Rebuilds episodes from a raw event table
///
/// Reconstruction is a pure function of its input: the same table always
/// yields the same records.
#[derive(Debug, Clone, Default)]
pub struct EpisodeReconstructor {
    window: MatchWindow,
}

impl EpisodeReconstructor {
    /// Create a reconstructor with the default (1 s, 180 s) window
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different match window
    pub fn with_window(mut self, window: MatchWindow) -> Self {
        self.window = window;
        self
    }

    /// Get the match window
    pub fn window(&self) -> MatchWindow {
        self.window
    }

    /// Pair door-open rows with door-close rows
    ///
    /// Returns one entry per door-open row, in row order.
    pub fn match_opens(&self, events: &[DoorEvent]) -> Vec<EpisodeMatch> {
        let opens = events.iter().enumerate().filter(|(_, e)| e.door_opened).map(|(row, _)| row);
        let closes: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.door_closed)
            .map(|(row, _)| row)
            .collect();

        let mut cursor = 0;
        opens
            .map(|open_row| {
                let opened_at = events[open_row].timestamp;
                let found = closes[cursor..]
                    .iter()
                    .position(|&close_row| self.window.contains(events[close_row].timestamp - opened_at));

                let close_row = found.map(|offset| {
                    let close_row = closes[cursor + offset];
                    cursor += offset + 1;
                    close_row
                });

                match close_row {
                    Some(close_row) => debug!("Open at row {} matched close at row {}", open_row, close_row),
                    None => debug!("Open at row {} has no close inside {}", open_row, self.window),
                }

                EpisodeMatch { open_row, close_row }
            })
            .collect()
    }

    /// Reconstruct one feature record per door-open event, in row order
    ///
    /// An empty table yields no records.
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub fn reconstruct(&self, events: &[DoorEvent]) -> Vec<EpisodeFeatures> {
        let matches = self.match_opens(events);
        let timeline = TimelineIndex::new(events);

        let episodes: Vec<EpisodeFeatures> =
            matches.iter().map(|m| self.summarize(events, &timeline, m)).collect();

        let outliers = episodes.iter().filter(|e| e.is_outlier).count();
        info!(
            "Reconstructed {} episodes from {} events ({} matched)",
            episodes.len(),
            events.len(),
            episodes.len() - outliers
        );
        if outliers > 0 {
            warn!("{} door-open events had no close inside {}", outliers, self.window);
        }

        episodes
    }

    fn summarize(
        &self,
        events: &[DoorEvent],
        timeline: &TimelineIndex<'_>,
        episode: &EpisodeMatch,
    ) -> EpisodeFeatures {
        let start = events[episode.open_row].timestamp;
        let end = episode.close_row.map(|row| events[row].timestamp);
        let span: Vec<&DoorEvent> = timeline.span(start, end).into_iter().map(|row| &events[row]).collect();

        let mut features = EpisodeFeatures::new(start, end);
        // Blank subjects are missing values, not a subject of their own
        features.entry_count = distinct_count(
            span.iter().filter(|e| !e.user_id.is_empty()).map(|e| e.user_id.as_str()),
        );
        features.tailgating_detected = any_flag(span.iter().map(|e| e.tailgating_detected));
        features.human_feedback = mode_or_unknown(span.iter().map(|e| e.human_feedback.as_deref()));
        features.generation_logic = mode_or_unknown(span.iter().map(|e| e.generation_logic.as_deref()));
        features.human_explanation = mode_or_unknown(span.iter().map(|e| e.human_logic.as_deref()));
        features
    }
}
