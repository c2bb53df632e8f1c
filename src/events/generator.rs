//! Episode synthesis
//!
//! This module turns one sampled scenario into the timestamped events of a
//! single synthetic door-access episode.

use chrono::Duration;
use rand::Rng;
use tracing::{debug, instrument};

use crate::error::{PipelineError, PipelineResult};
use crate::events::DoorEvent;
use crate::simulation::TimeManager;
use crate::types::config::{ScenarioConfig, DOOR_LEFT_OPEN_SCENARIO};
use crate::types::{EventKind, UserId};

/// Number of distinct synthetic subjects
pub const DEFAULT_USER_POOL_SIZE: u32 = 200;

/// Fewest intermediate events per episode
pub const MIN_INTERMEDIATE_EVENTS: usize = 1;

/// Most intermediate events per episode
pub const MAX_INTERMEDIATE_EVENTS: usize = 3;

/// Events produced for one synthetic episode
#[derive(Debug, Clone)]
pub struct SynthesizedEpisode {
    /// Sequential episode number within the run
    pub episode_id: usize,
    /// Scenario the episode was drawn from
    pub scenario: String,
    /// Drawn duration in seconds
    pub duration_secs: i64,
    /// Open, intermediates and optional close, in time order
    pub events: Vec<DoorEvent>,
}

impl SynthesizedEpisode {
    /// Whether a door-close event was emitted
    pub fn is_closed(&self) -> bool {
        self.events.last().map_or(false, |event| event.door_closed)
    }
}

/// Builds the event sequence of one episode from scenario parameters
#[derive(Debug, Clone)]
pub struct EpisodeSynthesizer {
    /// Start-time sampler
    time_manager: TimeManager,
    /// Subjects are drawn from `user_1..=user_{pool}`
    user_pool_size: u32,
}

impl EpisodeSynthesizer {
    /// Create a synthesizer drawing start times from the given sampler
    pub fn new(time_manager: TimeManager) -> Self {
        Self { time_manager, user_pool_size: DEFAULT_USER_POOL_SIZE }
    }

    /// Set the subject pool size (at least one)
    pub fn with_user_pool_size(mut self, size: u32) -> Self {
        self.user_pool_size = size.max(1);
        self
    }

    /// Get the start-time sampler
    pub fn time_manager(&self) -> &TimeManager {
        &self.time_manager
    }

    /// Generate the events of one episode
    ///
    /// Emits a door-open event, 1-3 intermediate events strictly inside the
    /// episode and, unless the scenario is `door_left_open`, a door-close event
    /// exactly `duration` seconds after the open.
    #[instrument(skip(self, params, rng), fields(episode_id = episode_id, scenario = scenario))]
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        episode_id: usize,
        scenario: &str,
        params: &ScenarioConfig,
        rng: &mut R,
    ) -> PipelineResult<SynthesizedEpisode> {
        let range = params.duration_range;
        if range.min < 2 || range.min > range.max {
            return Err(PipelineError::generation_error(format!(
                "scenario '{}' has unusable duration range [{}, {}]",
                scenario, range.min, range.max
            )));
        }

        let start = self.time_manager.draw_episode_start(rng);
        let duration_secs = i64::from(rng.gen_range(range.min..=range.max));
        let end = start + Duration::seconds(duration_secs);
        let user_id = UserId::from_pool_index(rng.gen_range(1..=self.user_pool_size));

        let mut events = Vec::with_capacity(MAX_INTERMEDIATE_EVENTS + 2);
        events.push(DoorEvent::for_scenario(
            start,
            user_id.clone(),
            EventKind::DoorOpened,
            scenario,
            params,
        ));

        let intermediate_count = rng.gen_range(MIN_INTERMEDIATE_EVENTS..=MAX_INTERMEDIATE_EVENTS);
        let mut offsets: Vec<i64> =
            (0..intermediate_count).map(|_| rng.gen_range(1..duration_secs)).collect();
        offsets.sort_unstable();
        events.extend(offsets.into_iter().map(|offset| {
            DoorEvent::for_scenario(
                start + Duration::seconds(offset),
                user_id.clone(),
                EventKind::Intermediate,
                scenario,
                params,
            )
        }));

        if scenario != DOOR_LEFT_OPEN_SCENARIO {
            events.push(DoorEvent::for_scenario(end, user_id, EventKind::DoorClosed, scenario, params));
        }

        debug!(
            "Synthesized episode {} ({}) starting {} with {} events over {}s",
            episode_id,
            scenario,
            start,
            events.len(),
            duration_secs
        );

        Ok(SynthesizedEpisode { episode_id, scenario: scenario.to_string(), duration_secs, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::DurationRange;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn synthesizer() -> EpisodeSynthesizer {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        EpisodeSynthesizer::new(TimeManager::new(start))
    }

    fn params(min: u32, max: u32) -> ScenarioConfig {
        ScenarioConfig {
            duration_range: DurationRange::new(min, max),
            tailgating_detected: false,
            human_feedback: Some("Normal".to_string()),
            human_logic: Some("Routine".to_string()),
        }
    }

    #[test]
    fn test_closed_episode_shape() {
        let synth = synthesizer();
        let mut rng = StdRng::seed_from_u64(42);

        for id in 0..200 {
            let episode = synth.synthesize(id, "normal_entry", &params(5, 60), &mut rng).unwrap();
            let events = &episode.events;

            assert!(episode.is_closed());
            assert!((3..=5).contains(&events.len()));
            assert_eq!(events.iter().filter(|e| e.door_opened).count(), 1);
            assert_eq!(events.iter().filter(|e| e.door_closed).count(), 1);
            assert!(events[0].door_opened);

            let open = events[0].timestamp;
            let close = events[events.len() - 1].timestamp;
            assert_eq!((close - open).num_seconds(), episode.duration_secs);
            assert!((5..=60).contains(&episode.duration_secs));
        }
    }

    #[test]
    fn test_intermediates_strictly_inside_and_sorted() {
        let synth = synthesizer();
        let mut rng = StdRng::seed_from_u64(7);

        for id in 0..200 {
            let episode = synth.synthesize(id, "normal_entry", &params(2, 20), &mut rng).unwrap();
            let open = episode.events[0].timestamp;
            let close = episode.events[episode.events.len() - 1].timestamp;
            let inner = &episode.events[1..episode.events.len() - 1];

            assert!((1..=3).contains(&inner.len()));
            for window in inner.windows(2) {
                assert!(window[0].timestamp <= window[1].timestamp);
            }
            for event in inner {
                assert!(!event.door_opened && !event.door_closed);
                assert!(event.timestamp > open && event.timestamp < close);
            }
        }
    }

    #[test]
    fn test_door_left_open_has_no_close() {
        let synth = synthesizer();
        let mut rng = StdRng::seed_from_u64(9);

        let episode = synth.synthesize(0, DOOR_LEFT_OPEN_SCENARIO, &params(200, 400), &mut rng).unwrap();
        assert!(!episode.is_closed());
        assert!(episode.events.iter().all(|e| !e.door_closed));
        assert!(episode.events[0].door_opened);
    }

    #[test]
    fn test_labels_and_subject_are_shared() {
        let synth = synthesizer().with_user_pool_size(5);
        let mut rng = StdRng::seed_from_u64(11);

        let mut scenario = params(5, 10);
        scenario.tailgating_detected = true;
        let episode = synth.synthesize(3, "tailgating", &scenario, &mut rng).unwrap();

        let user = &episode.events[0].user_id;
        let slot = user.pool_index().unwrap();
        assert!((1..=5).contains(&slot));
        for event in &episode.events {
            assert_eq!(&event.user_id, user);
            assert!(event.tailgating_detected);
            assert_eq!(event.generation_logic.as_deref(), Some("tailgating"));
            assert_eq!(event.human_feedback.as_deref(), Some("Normal"));
        }
    }

    #[test]
    fn test_rejects_unusable_duration_range() {
        let synth = synthesizer();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(synth.synthesize(0, "bad", &params(1, 1), &mut rng).is_err());
        assert!(synth.synthesize(0, "bad", &params(10, 5), &mut rng).is_err());
    }
}
