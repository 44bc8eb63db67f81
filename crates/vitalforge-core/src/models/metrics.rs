// ABOUTME: Metric identity and time-series types for daily physiological signals
// ABOUTME: MetricKind owns the static metric-name to (table, column) storage mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A physiological signal tracked as one value per calendar day.
///
/// Each kind maps to exactly one `(table, column)` pair in the metric store;
/// that mapping is owned here so the store, the sync engine, and the API
/// layer all agree on where a metric lives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Nightly sleep duration in seconds
    SleepDuration,
    /// Garmin sleep score (0-100)
    SleepScore,
    /// Resting heart rate in bpm
    RestingHr,
    /// Last-night average heart-rate variability in ms
    Hrv,
    /// Highest body battery reached during the day (0-100)
    BodyBattery,
    /// Lowest body battery reached during the day (0-100)
    BodyBatteryLow,
    /// Average daily stress level (0-100)
    Stress,
    /// Estimated VO2 max
    Vo2Max,
    /// Body weight in grams
    Weight,
    /// Body fat percentage
    BodyFat,
    /// Acute training load
    TrainingLoad,
    /// Daily step count
    Steps,
    /// Active kilocalories burned
    ActiveCalories,
}

impl MetricKind {
    /// The metrics fed into an analysis pass, in a fixed order.
    pub const ANALYSIS_METRICS: [Self; 10] = [
        Self::SleepDuration,
        Self::SleepScore,
        Self::RestingHr,
        Self::Hrv,
        Self::BodyBattery,
        Self::Stress,
        Self::Vo2Max,
        Self::Weight,
        Self::TrainingLoad,
        Self::Steps,
    ];

    /// Every metric the store can serve, used by the metrics API route.
    pub const ALL: [Self; 13] = [
        Self::SleepDuration,
        Self::SleepScore,
        Self::RestingHr,
        Self::Hrv,
        Self::BodyBattery,
        Self::BodyBatteryLow,
        Self::Stress,
        Self::Vo2Max,
        Self::Weight,
        Self::BodyFat,
        Self::TrainingLoad,
        Self::Steps,
        Self::ActiveCalories,
    ];

    /// Stable wire name for this metric
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SleepDuration => "sleep_duration",
            Self::SleepScore => "sleep_score",
            Self::RestingHr => "resting_hr",
            Self::Hrv => "hrv",
            Self::BodyBattery => "body_battery",
            Self::BodyBatteryLow => "body_battery_low",
            Self::Stress => "stress",
            Self::Vo2Max => "vo2max",
            Self::Weight => "weight",
            Self::BodyFat => "body_fat",
            Self::TrainingLoad => "training_load",
            Self::Steps => "steps",
            Self::ActiveCalories => "active_calories",
        }
    }

    /// Resolve a wire name back to a metric kind
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Table this metric is persisted in
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::SleepDuration | Self::SleepScore => "sleep",
            Self::RestingHr => "resting_hr",
            Self::Hrv => "hrv",
            Self::BodyBattery | Self::BodyBatteryLow => "body_battery",
            Self::Stress => "stress",
            Self::Vo2Max => "vo2max",
            Self::Weight | Self::BodyFat => "weight_history",
            Self::TrainingLoad => "training_load",
            Self::Steps => "steps",
            Self::ActiveCalories => "active_calories",
        }
    }

    /// Column holding this metric's daily value
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::SleepDuration => "duration_seconds",
            Self::SleepScore => "sleep_score",
            Self::RestingHr | Self::Steps | Self::ActiveCalories => "value",
            Self::Hrv => "last_night_avg",
            Self::BodyBattery => "highest",
            Self::BodyBatteryLow => "lowest",
            Self::Stress => "avg_level",
            Self::Vo2Max => "vo2max_value",
            Self::Weight => "weight_grams",
            Self::BodyFat => "body_fat",
            Self::TrainingLoad => "acute_load",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One daily sample of a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// Calendar day the sample belongs to
    pub date: NaiveDate,
    /// Sample value, unit depends on the metric kind
    pub value: f64,
}

impl MetricPoint {
    /// Create a new sample
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ordered daily samples for one metric, ascending by date, nulls excluded
pub type MetricSeries = Vec<MetricPoint>;

/// All metric series for one analysis pass, sharing a lookback window and a
/// single "today" reference date. Immutable once built.
///
/// The backing `BTreeMap` keeps key order deterministic, which makes the
/// serialized form stable enough to content-hash for cache invalidation.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSet {
    today: NaiveDate,
    series: BTreeMap<MetricKind, MetricSeries>,
}

impl MetricSet {
    /// Create an empty set anchored at the given reference date
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today,
            series: BTreeMap::new(),
        }
    }

    /// Reference date all lookback windows are measured from
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Attach a series for a metric, replacing any previous one
    pub fn insert(&mut self, kind: MetricKind, series: MetricSeries) {
        self.series.insert(kind, series);
    }

    /// Series for a metric; empty slice when the metric was never fetched
    #[must_use]
    pub fn get(&self, kind: MetricKind) -> &[MetricPoint] {
        self.series.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// True when no metric has any samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }
}
