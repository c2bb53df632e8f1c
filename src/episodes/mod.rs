//! Episode reconstruction and feature extraction
//!
//! # Overview
//!
//! - **EpisodeReconstructor**: matches door-open events to door-close events and summarizes each span
//! - **MatchWindow**: open interval of accepted open-to-close durations, (1 s, 180 s) by default
//! - **EpisodeFeatures**: one output record per door-open event
//! - **ExtractionStatistics**: counts for a reconstruction run
//!
//! # Usage Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use door_episodes::episodes::*;
//! use door_episodes::events::DoorEvent;
//! use door_episodes::types::{EventKind, UserId};
//!
//! let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let events = vec![
//!     DoorEvent::new(t0, UserId::new("user_1"), EventKind::DoorOpened),
//!     DoorEvent::new(t0 + chrono::Duration::seconds(60), UserId::new("user_1"), EventKind::DoorClosed),
//! ];
//!
//! let episodes = EpisodeReconstructor::new().reconstruct(&events);
//! assert_eq!(episodes[0].duration_secs, Some(60));
//! assert!(!episodes[0].is_outlier);
//! assert_eq!(episodes[0].human_feedback, UNKNOWN_LABEL);
//! ```

pub mod aggregate;
pub mod features;
pub mod reconstructor;
pub mod statistics;

// Re-export all public types for convenience
pub use aggregate::*;
pub use features::*;
pub use reconstructor::*;
pub use statistics::*;
