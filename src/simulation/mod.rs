//! Synthetic dataset generation
//!
//! This module contains everything the generation pipeline needs beyond the
//! per-episode synthesizer, plus the logging setup shared by both pipelines.
//!
//! # Overview
//!
//! - **DatasetAssembler**: owns the seeded random source and runs sampler and synthesizer for a whole dataset
//! - **ScenarioSampler**: weighted choice of scenario names
//! - **TimeManager**: business-hours and weekday biased episode start times
//! - **GenerationStatistics**: per-scenario counts and a summary report
//! - **LoggingConfig**: tracing subscriber setup
//!
//! # Usage Example
//!
//! ```rust
//! use door_episodes::simulation::*;
//! use door_episodes::types::*;
//!
//! let mut config = SimulationConfig::default();
//! config.simulation.num_episodes = 25;
//!
//! let mut assembler = DatasetAssembler::new(config).unwrap();
//! let events = assembler.generate().unwrap();
//!
//! assert_eq!(assembler.statistics().total_episodes, 25);
//! assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
//! ```

pub mod assembler;
pub mod logging;
pub mod scenario_sampler;
pub mod statistics;
pub mod time_manager;

// Re-export all public types for convenience
pub use assembler::*;
pub use logging::*;
pub use scenario_sampler::*;
pub use statistics::*;
pub use time_manager::*;
