//! Door Episodes
//!
//! Synthesizes labeled door-access event logs and reconstructs door-open to
//! door-close episodes from such logs, reducing each one to a feature record.
//!
//! # Overview
//!
//! Two independent pipelines share only the event table format:
//!
//! - **Generation**: scenario sampling, per-episode event synthesis and dataset
//!   assembly driven by a seeded random source, persisted as a flat event table
//! - **Extraction**: reading an event table, matching door-open to door-close
//!   events under a time window, aggregating each span and persisting the
//!   resulting feature table
//!
//! ## Quick Start
//!
//! ```rust
//! use door_episodes::*;
//!
//! let mut config = SimulationConfig::default();
//! config.simulation.num_episodes = 50;
//!
//! let mut assembler = DatasetAssembler::new(config)?;
//! let events = assembler.generate()?;
//!
//! let episodes = EpisodeReconstructor::new().reconstruct(&events);
//! let stats = ExtractionStatistics::from_episodes(events.len(), &episodes);
//! assert_eq!(stats.total_episodes, 50);
//! # Ok::<(), PipelineError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums, timestamps and configuration
//! - [`events`]: the event record and per-episode synthesis
//! - [`simulation`]: dataset assembly, sampling, start times, logging
//! - [`episodes`]: episode reconstruction and feature records
//! - [`storage`]: event and feature table files
//! - [`error`]: crate-wide error type
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ Simulation  │───►│   Events    │───►│   Storage   │
//! │             │    │             │    │             │
//! │ Sampler     │    │ DoorEvent   │    │ Event table │
//! │ Assembler   │    │ Synthesizer │    │ Feature tbl │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                              │
//!                                              ▼
//!                                       ┌─────────────┐
//!                                       │  Episodes   │
//!                                       │             │
//!                                       │ Reconstruct │
//!                                       │ Aggregate   │
//!                                       └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod episodes;
pub mod error;
pub mod events;
pub mod simulation;
pub mod storage;
pub mod types;

// Core types and configuration
pub use types::{
    ConfigError, ConfigValidationError, EventKind, ScenarioConfig, SimulationConfig, UserId,
};

// Errors
pub use error::{PipelineError, PipelineResult};

// Events and synthesis
pub use events::{DoorEvent, EpisodeSynthesizer, SynthesizedEpisode};

// Generation pipeline
pub use simulation::{
    DatasetAssembler, GenerationStatistics, LoggingConfig, ScenarioSampler, TimeManager,
};

// Extraction pipeline
pub use episodes::{EpisodeFeatures, EpisodeReconstructor, ExtractionStatistics, MatchWindow};

// Persistence
pub use storage::{read_events, write_episodes, write_events};
