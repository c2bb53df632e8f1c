//! Event table persistence
//!
//! Reads and writes the delimited door-access log shared by both pipelines.
//! The reader is header-based, so column order is free and extra columns are
//! ignored; a missing required column is fatal.

use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::error::{PipelineError, PipelineResult};
use crate::events::DoorEvent;
use crate::storage::ensure_parent_dir;
use crate::types::{format_timestamp, parse_timestamp, UserId};

/// Timestamp column header
pub const TIME_STAMP_COLUMN: &str = "Time Stamp";
/// Subject column header
pub const USER_ID_COLUMN: &str = "User ID";
/// Door-open flag column header
pub const DOOR_OPENED_COLUMN: &str = "Door Opened";
/// Door-close flag column header
pub const DOOR_CLOSED_COLUMN: &str = "Door Closed";
/// Tailgating flag column header
pub const TAILGATING_COLUMN: &str = "Tailgating Detected";
/// Feedback label column header
pub const HUMAN_FEEDBACK_COLUMN: &str = "Human Feedback";
/// Provenance tag column header
pub const GENERATION_LOGIC_COLUMN: &str = "Generation Logic";
/// Explanation column header
pub const HUMAN_LOGIC_COLUMN: &str = "Human Logic explaining the feedback for the episode";

/// Event table header, in written order
pub const EVENT_COLUMNS: [&str; 8] = [
    TIME_STAMP_COLUMN,
    USER_ID_COLUMN,
    DOOR_OPENED_COLUMN,
    DOOR_CLOSED_COLUMN,
    TAILGATING_COLUMN,
    HUMAN_FEEDBACK_COLUMN,
    GENERATION_LOGIC_COLUMN,
    HUMAN_LOGIC_COLUMN,
];

/// Raw text of one event row
#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(rename = "Time Stamp")]
    timestamp: String,
    #[serde(rename = "User ID")]
    user_id: String,
    #[serde(rename = "Door Opened")]
    door_opened: String,
    #[serde(rename = "Door Closed")]
    door_closed: String,
    #[serde(rename = "Tailgating Detected")]
    tailgating_detected: String,
    #[serde(rename = "Human Feedback", default)]
    human_feedback: Option<String>,
    #[serde(rename = "Generation Logic", default)]
    generation_logic: Option<String>,
    #[serde(rename = "Human Logic explaining the feedback for the episode", default)]
    human_logic: Option<String>,
}

impl EventRow {
    fn into_event(self, row: usize) -> PipelineResult<DoorEvent> {
        let timestamp = parse_timestamp(&self.timestamp)
            .ok_or_else(|| PipelineError::MalformedTimestamp { row, value: self.timestamp.clone() })?;

        Ok(DoorEvent {
            timestamp,
            user_id: UserId::new(self.user_id),
            door_opened: parse_flag(&self.door_opened, row, DOOR_OPENED_COLUMN)?,
            door_closed: parse_flag(&self.door_closed, row, DOOR_CLOSED_COLUMN)?,
            tailgating_detected: parse_flag(&self.tailgating_detected, row, TAILGATING_COLUMN)?,
            human_feedback: present(self.human_feedback),
            generation_logic: present(self.generation_logic),
            human_logic: present(self.human_logic),
        })
    }
}

/// Interpret a flag cell; an empty cell is false
pub fn parse_flag(raw: &str, row: usize, column: &'static str) -> PipelineResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "0.0" | "false" | "no" => Ok(false),
        "1" | "1.0" | "true" | "yes" => Ok(true),
        _ => Err(PipelineError::MalformedField { row, column, value: raw.to_string() }),
    }
}

/// Text is kept verbatim; only an empty cell is absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Read an event table, keeping row order
///
/// Fails with [`PipelineError::InputNotFound`] before parsing when the file
/// does not exist. Row numbers in errors are 1-based and exclude the header.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_events<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<DoorEvent>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_reader(File::open(path)?);
    let mut events = Vec::new();
    for (index, record) in reader.deserialize::<EventRow>().enumerate() {
        events.push(record?.into_event(index + 1)?);
    }

    info!("Read {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Write an event table, creating parent directories as needed
#[instrument(skip(path, events), fields(path = %path.as_ref().display(), event_count = events.len()))]
pub fn write_events<P: AsRef<Path>>(path: P, events: &[DoorEvent]) -> PipelineResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(EVENT_COLUMNS)?;

    for event in events {
        writer.write_record([
            format_timestamp(&event.timestamp).as_str(),
            event.user_id.as_str(),
            flag(event.door_opened),
            flag(event.door_closed),
            flag(event.tailgating_detected),
            event.human_feedback.as_deref().unwrap_or(""),
            event.generation_logic.as_deref().unwrap_or(""),
            event.human_logic.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    debug!("Wrote {} events to {}", events.len(), path.display());
    Ok(())
}
