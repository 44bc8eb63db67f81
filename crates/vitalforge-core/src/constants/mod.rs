// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physiological thresholds, analysis windows, units, and cache tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Constants module
//!
//! Application constants grouped by domain. The physiological thresholds are
//! heuristic calibrations, not clinically validated values; changing one
//! changes the corresponding detector's firing contract.

/// Analysis window lengths shared by all detectors
pub mod windows {
    /// Days of history fetched for one analysis pass
    pub const LOOKBACK_DAYS: u32 = 30;
    /// Points used for linear trend detection
    pub const TREND_WINDOW: usize = 14;
    /// Points scanned for consecutive-day streaks
    pub const STREAK_WINDOW: usize = 7;
    /// Days in a comparison week
    pub const WEEK: usize = 7;
    /// Consecutive days a streak detector needs before firing
    pub const STREAK_TRIGGER_DAYS: usize = 3;
}

/// Sleep detector thresholds
pub mod sleep {
    /// Below this nightly duration counts as short sleep (7h)
    pub const LOW_DURATION_SECONDS: f64 = 25_200.0;
    /// Trend slope below this loses more than 2 min/day over two weeks
    pub const DECLINING_SLOPE_SECONDS_PER_DAY: f64 = -120.0;
    /// Sleep score below this counts as poor
    pub const LOW_SCORE: f64 = 70.0;
}

/// Recovery detector thresholds (HRV, RHR, body battery)
pub mod recovery {
    /// Minimum samples before HRV/RHR baselines are trusted
    pub const MIN_BASELINE_SAMPLES: usize = 7;
    /// Samples needed for a week-over-week comparison
    pub const MIN_WEEKLY_COMPARISON_SAMPLES: usize = 14;
    /// Days scanned for the HRV below-baseline streak
    pub const HRV_BASELINE_SCAN_WINDOW: usize = 10;
    /// Week-over-week HRV percentage drop that escalates to an alert
    pub const HRV_WEEKLY_DROP_PCT: f64 = -15.0;
    /// Latest RHR above this multiple of the 30-day average is elevated
    pub const RHR_ELEVATED_RATIO: f64 = 1.10;
    /// RHR trend slope above this is trending upward (bpm/day)
    pub const RHR_RISING_SLOPE: f64 = 0.2;
    /// Body battery highest-value below this counts as unrecovered
    pub const BODY_BATTERY_RECOVERED: f64 = 80.0;
}

/// Stress detector thresholds
pub mod stress {
    /// Average daily stress above this counts as high
    pub const HIGH_LEVEL: f64 = 50.0;
    /// Stress trend slope above this is trending upward (points/day)
    pub const RISING_SLOPE: f64 = 0.5;
}

/// Body composition detector thresholds
pub mod body_composition {
    /// Days without a weight sample before it counts as stale
    pub const STALE_WEIGHT_DAYS: i64 = 7;
    /// Week-over-week weight gain above this is rapid (2 lbs in grams)
    pub const RAPID_GAIN_GRAMS_PER_WEEK: f64 = 907.0;
    /// Three-week weight change below this is a plateau (0.5 lbs in grams)
    pub const PLATEAU_CHANGE_GRAMS: f64 = 227.0;
    /// Weight samples needed for plateau detection
    pub const PLATEAU_MIN_SAMPLES: usize = 21;
}

/// Activity detector thresholds
pub mod activity {
    /// Daily step target
    pub const STEP_TARGET: f64 = 7000.0;
    /// Week-over-week training load ratio above this is a spike
    pub const LOAD_SPIKE_RATIO: f64 = 1.3;
    /// VO2 max trend slope below this is declining
    pub const VO2MAX_DECLINE_SLOPE: f64 = -0.03;
}

/// Cross-metric correlation thresholds
pub mod correlation {
    /// Three-day sleep average below this counts as poor sleep (6h)
    pub const SHORT_SLEEP_SECONDS: f64 = 21_600.0;
    /// Latest RHR above this multiple of baseline is mildly elevated
    pub const RHR_ELEVATED_RATIO: f64 = 1.05;
    /// Three-day HRV average below this multiple of baseline is suppressed
    pub const HRV_SUPPRESSED_RATIO: f64 = 0.85;
    /// Weekly training load above this multiple of the 30-day average is high
    pub const LOAD_ELEVATED_RATIO: f64 = 1.2;
    /// Seven-day HRV trend slope below this is declining
    pub const HRV_DECLINE_SLOPE: f64 = -0.5;
}

/// Recommendation cache tuning
pub mod cache {
    /// Seconds a cached recommendation set stays fresh (6 hours)
    pub const RECOMMENDATION_TTL_SECS: i64 = 6 * 3600;
    /// Maximum recommendations returned to the caller
    pub const MAX_RECOMMENDATIONS: usize = 5;
}

/// Unit conversion constants
pub mod units {
    /// Seconds in an hour
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    /// Seconds in a minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Grams in a kilogram
    pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
    /// Grams in a pound
    pub const GRAMS_PER_POUND: f64 = 453.6;
    /// Pounds in a kilogram
    pub const POUNDS_PER_KILOGRAM: f64 = 2.20462;
}
