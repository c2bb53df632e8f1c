//! Door-access events and episode synthesis
//!
//! # Overview
//!
//! - **DoorEvent**: one row of a door-access log (timestamp, subject, sensor flags, labels)
//! - **EpisodeSynthesizer**: creates the open / intermediate / close events of one episode
//!
//! # Usage Example
//!
//! ```rust
//! use door_episodes::events::*;
//! use door_episodes::simulation::TimeManager;
//! use door_episodes::types::*;
//! use rand::SeedableRng;
//!
//! let config = SimulationConfig::default();
//! let synthesizer = EpisodeSynthesizer::new(TimeManager::new(config.simulation.start_date));
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let params = config.scenario("normal_entry").unwrap();
//! let episode = synthesizer.synthesize(0, "normal_entry", params, &mut rng).unwrap();
//! assert!(episode.events[0].door_opened);
//! assert!(episode.is_closed());
//! ```

pub mod door_event;
pub mod generator;

// Re-export all public types for convenience
pub use door_event::*;
pub use generator::*;
