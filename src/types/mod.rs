//! Core types and configuration for the door episode toolkit
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used by both the generation and the extraction pipelines.
//!
//! # Overview
//!
//! - **Identifiers**: subject identifiers attached to events
//! - **Enums**: event kinds and configuration document formats
//! - **Timestamps**: the shared `YYYY-MM-DD HH:MM:SS` layout
//! - **Configuration**: command line surface, scenario configuration and validation
//!
//! # Usage Example
//!
//! ```rust
//! use door_episodes::types::*;
//!
//! let user = UserId::from_pool_index(7);
//! assert_eq!(user.to_string(), "user_7");
//!
//! let config = SimulationConfig::default();
//! assert!(config.validate().is_ok());
//! assert!(config.scenario(DOOR_LEFT_OPEN_SCENARIO).is_some());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod timestamp;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
pub use timestamp::*;
