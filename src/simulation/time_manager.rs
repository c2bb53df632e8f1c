//! Episode start-time sampling
//!
//! This module draws episode start timestamps biased toward weekdays and
//! business hours.

use crate::types::is_weekend;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;
use tracing::{debug, info};

/// First business hour (inclusive)
pub const BUSINESS_START_HOUR: u32 = 9;

/// Last business hour (inclusive)
pub const BUSINESS_END_HOUR: u32 = 17;

/// Number of days past the start date an episode may fall on
pub const DEFAULT_HORIZON_DAYS: i64 = 60;

/// Probability of drawing the hour from business hours
pub const DEFAULT_BUSINESS_HOURS_BIAS: f64 = 0.8;

/// Probability of rolling a weekend day forward to the next weekday
pub const DEFAULT_WEEKDAY_BIAS: f64 = 0.8;

/// Start-time sampler anchored at the simulation start date
#[derive(Debug, Clone)]
pub struct TimeManager {
    /// First calendar day episodes may fall on
    start_date: NaiveDate,
    /// Largest day offset drawn (inclusive)
    horizon_days: i64,
    /// Probability of a business-hours draw
    business_hours_bias: f64,
    /// Probability of skipping weekend days
    weekday_bias: f64,
}

impl TimeManager {
    /// Create a sampler anchored at the given start date
    ///
    /// Only the calendar day of `start` matters; its time of day is ignored.
    pub fn new(start: NaiveDateTime) -> Self {
        info!("Initializing time manager anchored at {}", start.date());
        Self {
            start_date: start.date(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            business_hours_bias: DEFAULT_BUSINESS_HOURS_BIAS,
            weekday_bias: DEFAULT_WEEKDAY_BIAS,
        }
    }

    /// Set the largest day offset
    pub fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = days.max(0);
        self
    }

    /// Set both bias probabilities (clamped to 0.0-1.0)
    pub fn with_biases(mut self, business_hours: f64, weekday: f64) -> Self {
        self.business_hours_bias = business_hours.clamp(0.0, 1.0);
        self.weekday_bias = weekday.clamp(0.0, 1.0);
        self
    }

    /// First calendar day episodes may fall on
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Draw an episode start timestamp (seconds are always zero)
    pub fn draw_episode_start<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDateTime {
        let date = self.draw_day(rng);
        let hour = self.draw_hour(rng);
        let minute = rng.gen_range(0..=59);

        let start = date.and_hms_opt(hour, minute, 0).unwrap_or_else(|| date.and_time(Default::default()));
        debug!("Drew episode start {}", start);
        start
    }

    /// Draw a calendar day, usually rolled forward off weekends
    fn draw_day<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let offset = rng.gen_range(0..=self.horizon_days);
        let mut date = self.start_date + Duration::days(offset);

        if rng.gen_bool(self.weekday_bias) {
            while is_weekend(date) {
                date += Duration::days(1);
            }
        }

        date
    }

    /// Draw an hour of day, usually within business hours
    fn draw_hour<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if rng.gen_bool(self.business_hours_bias) {
            rng.gen_range(BUSINESS_START_HOUR..=BUSINESS_END_HOUR)
        } else {
            rng.gen_range(0..=23)
        }
    }

    /// Check if the given time falls in the business-hours draw range
    pub fn is_business_hours(&self, timestamp: NaiveDateTime) -> bool {
        (BUSINESS_START_HOUR..=BUSINESS_END_HOUR).contains(&timestamp.hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn anchor() -> NaiveDateTime {
        // Monday
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(6, 30, 0).unwrap()
    }

    #[test]
    fn test_start_date_ignores_time_of_day() {
        let tm = TimeManager::new(anchor());
        assert_eq!(tm.start_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_draws_stay_in_horizon() {
        let tm = TimeManager::new(anchor());
        let mut rng = StdRng::seed_from_u64(1);
        let start = tm.start_date();

        for _ in 0..500 {
            let ts = tm.draw_episode_start(&mut rng);
            let offset = (ts.date() - start).num_days();
            // Weekend roll-forward can add at most two days
            assert!((0..=DEFAULT_HORIZON_DAYS + 2).contains(&offset));
            assert_eq!(ts.second(), 0);
            assert!(ts.hour() <= 23);
        }
    }

    #[test]
    fn test_full_bias_forces_weekday_business_hours() {
        let tm = TimeManager::new(anchor()).with_biases(1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..500 {
            let ts = tm.draw_episode_start(&mut rng);
            assert!(!is_weekend(ts.date()), "{} fell on a weekend", ts);
            assert!(tm.is_business_hours(ts), "{} outside business hours", ts);
        }
    }

    #[test]
    fn test_zero_horizon_rolls_weekend_start_to_monday() {
        // 2024-01-06 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let tm = TimeManager::new(saturday).with_horizon_days(0).with_biases(1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);

        let ts = tm.draw_episode_start(&mut rng);
        assert_eq!(ts.date().weekday(), chrono::Weekday::Mon);
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn test_business_hours_detection() {
        let tm = TimeManager::new(anchor());
        let day = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

        assert!(tm.is_business_hours(day.and_hms_opt(9, 0, 0).unwrap()));
        assert!(tm.is_business_hours(day.and_hms_opt(17, 59, 0).unwrap()));
        assert!(!tm.is_business_hours(day.and_hms_opt(8, 59, 0).unwrap()));
        assert!(!tm.is_business_hours(day.and_hms_opt(18, 0, 0).unwrap()));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let tm = TimeManager::new(anchor());
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(tm.draw_episode_start(&mut a), tm.draw_episode_start(&mut b));
        }
    }
}
