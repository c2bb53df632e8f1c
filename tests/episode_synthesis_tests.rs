//! Tests for single-episode synthesis
//!
//! These tests drive the synthesizer with every built-in scenario and check the
//! shape of the emitted events and the start-time biases.

use chrono::{Datelike, Duration, NaiveDate, Timelike, Weekday};
use door_episodes::events::{EpisodeSynthesizer, DEFAULT_USER_POOL_SIZE};
use door_episodes::simulation::{TimeManager, DEFAULT_HORIZON_DAYS};
use door_episodes::types::config::{SimulationConfig, DOOR_LEFT_OPEN_SCENARIO};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn default_synthesizer(config: &SimulationConfig) -> EpisodeSynthesizer {
    EpisodeSynthesizer::new(TimeManager::new(config.simulation.start_date))
}

/// Every closed episode has one open and one close exactly `duration` apart
#[test]
fn test_closed_scenarios_emit_matching_pair() {
    let config = SimulationConfig::default();
    let synthesizer = default_synthesizer(&config);
    let mut rng = StdRng::seed_from_u64(42);

    for (name, params) in &config.scenario_configs {
        if name == DOOR_LEFT_OPEN_SCENARIO {
            continue;
        }
        for id in 0..100 {
            let episode = synthesizer.synthesize(id, name, params, &mut rng).unwrap();
            let opens: Vec<_> = episode.events.iter().filter(|e| e.door_opened).collect();
            let closes: Vec<_> = episode.events.iter().filter(|e| e.door_closed).collect();

            assert_eq!(opens.len(), 1, "{}", name);
            assert_eq!(closes.len(), 1, "{}", name);
            assert_eq!((closes[0].timestamp - opens[0].timestamp).num_seconds(), episode.duration_secs);

            let range = params.duration_range;
            assert!(episode.duration_secs >= i64::from(range.min));
            assert!(episode.duration_secs <= i64::from(range.max));
        }
    }
}

/// The door-left-open scenario never emits a close
#[test]
fn test_door_left_open_never_closes() {
    let config = SimulationConfig::default();
    let synthesizer = default_synthesizer(&config);
    let params = config.scenario(DOOR_LEFT_OPEN_SCENARIO).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    for id in 0..50 {
        let episode = synthesizer.synthesize(id, DOOR_LEFT_OPEN_SCENARIO, params, &mut rng).unwrap();
        assert!(!episode.is_closed());
        assert_eq!(episode.events.iter().filter(|e| e.door_opened).count(), 1);
        assert!((2..=4).contains(&episode.events.len()));
    }
}

/// Start times stay inside the horizon and lean towards weekday business hours
#[test]
fn test_start_time_biases() {
    let config = SimulationConfig::default();
    let synthesizer = default_synthesizer(&config);
    let params = config.scenario("normal_entry").unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let samples = 4000;
    let mut business_hours = 0;
    let mut weekdays = 0;

    for id in 0..samples {
        let episode = synthesizer.synthesize(id, "normal_entry", params, &mut rng).unwrap();
        let start = episode.events[0].timestamp;

        assert_eq!(start.second(), 0);
        assert!(start.date() >= first_day);
        // Weekend roll-forward can push at most two days past the horizon
        assert!(start.date() <= first_day + Duration::days(DEFAULT_HORIZON_DAYS + 2));

        if (9..=17).contains(&start.hour()) {
            business_hours += 1;
        }
        if !matches!(start.weekday(), Weekday::Sat | Weekday::Sun) {
            weekdays += 1;
        }
    }

    // 0.8 + 0.2 * 9/24 expected inside 09-17
    let business_share = business_hours as f64 / samples as f64;
    assert!(business_share > 0.80 && business_share < 0.94, "business share {}", business_share);

    // 0.8 + 0.2 * 5/7 expected on weekdays
    let weekday_share = weekdays as f64 / samples as f64;
    assert!(weekday_share > 0.90, "weekday share {}", weekday_share);
}

/// Subjects come from the fixed pool and are shared within an episode
#[test]
fn test_subjects_come_from_pool() {
    let config = SimulationConfig::default();
    let synthesizer = default_synthesizer(&config);
    let params = config.scenario("tailgating").unwrap();
    let mut rng = StdRng::seed_from_u64(8);

    for id in 0..200 {
        let episode = synthesizer.synthesize(id, "tailgating", params, &mut rng).unwrap();
        let subject = &episode.events[0].user_id;
        let slot = subject.pool_index().unwrap();
        assert!((1..=DEFAULT_USER_POOL_SIZE).contains(&slot));
        assert!(episode.events.iter().all(|e| &e.user_id == subject));
        assert!(episode.events.iter().all(|e| e.tailgating_detected));
    }
}
