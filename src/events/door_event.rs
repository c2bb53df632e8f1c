//! Door-access event records
//!
//! This module contains the event structure shared by the generator and the
//! episode reconstructor.

use chrono::NaiveDateTime;

use crate::types::config::ScenarioConfig;
use crate::types::{EventKind, UserId};

/// One row of a door-access event log
///
/// Events are immutable once produced. Nothing here assumes the open and close
/// flags are mutually exclusive; only the generator guarantees that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorEvent {
    /// When the event occurred (second resolution, no zone)
    pub timestamp: NaiveDateTime,
    /// Subject the event is attributed to
    pub user_id: UserId,
    /// Door-open sensor fired
    pub door_opened: bool,
    /// Door-close sensor fired
    pub door_closed: bool,
    /// Tailgating detector fired
    pub tailgating_detected: bool,
    /// Human feedback label
    pub human_feedback: Option<String>,
    /// Provenance tag naming the generating scenario
    pub generation_logic: Option<String>,
    /// Human explanation of the feedback
    pub human_logic: Option<String>,
}

impl DoorEvent {
    /// Create an unlabeled event of the given kind
    pub fn new(timestamp: NaiveDateTime, user_id: UserId, kind: EventKind) -> Self {
        let (door_opened, door_closed) = kind.flags();
        Self {
            timestamp,
            user_id,
            door_opened,
            door_closed,
            tailgating_detected: false,
            human_feedback: None,
            generation_logic: None,
            human_logic: None,
        }
    }

    /// Create an event stamped with a scenario's labels
    pub fn for_scenario(
        timestamp: NaiveDateTime,
        user_id: UserId,
        kind: EventKind,
        scenario: &str,
        params: &ScenarioConfig,
    ) -> Self {
        Self {
            tailgating_detected: params.tailgating_detected,
            human_feedback: params.human_feedback.clone(),
            generation_logic: Some(scenario.to_string()),
            human_logic: params.human_logic.clone(),
            ..Self::new(timestamp, user_id, kind)
        }
    }

    /// Set the tailgating flag
    pub fn with_tailgating(mut self, detected: bool) -> Self {
        self.tailgating_detected = detected;
        self
    }

    /// Set the human feedback label
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.human_feedback = Some(feedback.into());
        self
    }

    /// Set the generation logic tag
    pub fn with_generation_logic(mut self, logic: impl Into<String>) -> Self {
        self.generation_logic = Some(logic.into());
        self
    }

    /// Set the human explanation
    pub fn with_human_logic(mut self, logic: impl Into<String>) -> Self {
        self.human_logic = Some(logic.into());
        self
    }
}
