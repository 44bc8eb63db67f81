// ABOUTME: Per-metric parsers turning dynamic Garmin payloads into typed optional records
// ABOUTME: Unknown or missing keys map to no data; a parser never fails into the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Typed views over Garmin Connect's dynamic JSON payloads.
//!
//! Garmin has shipped several shapes for the same data over the years. Each
//! parser prefers the current shape and falls back to the legacy one, and the
//! two are never merged: when the current shape is present but yields
//! nothing, the legacy fields are not consulted for training load.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// One night of sleep
#[derive(Debug, Clone, PartialEq)]
pub struct SleepRecord {
    /// Total sleep time in seconds
    pub duration_seconds: i64,
    /// Deep sleep seconds
    pub deep_seconds: Option<i64>,
    /// Light sleep seconds
    pub light_seconds: Option<i64>,
    /// REM sleep seconds
    pub rem_seconds: Option<i64>,
    /// Awake seconds
    pub awake_seconds: Option<i64>,
    /// Overall sleep score (0-100)
    pub sleep_score: Option<i64>,
    /// Average overnight SpO2
    pub avg_spo2: Option<f64>,
    /// Average overnight respiration rate
    pub avg_respiration: Option<f64>,
}

/// Daily summary values worth persisting
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummaryRecord {
    /// Resting heart rate in bpm
    pub resting_heart_rate: Option<i64>,
    /// Total step count
    pub total_steps: Option<i64>,
    /// Active kilocalories burned
    pub active_kilocalories: Option<i64>,
}

/// One night of HRV
#[derive(Debug, Clone, PartialEq)]
pub struct HrvRecord {
    /// Last-night average HRV in ms
    pub last_night_avg: f64,
    /// Highest 5-minute average of the night
    pub last_night_5min_high: Option<f64>,
    /// Rolling weekly average
    pub weekly_avg: Option<f64>,
    /// Vendor status label (BALANCED, UNBALANCED, ...)
    pub status: Option<String>,
}

/// One day of body battery
#[derive(Debug, Clone, PartialEq)]
pub struct BodyBatteryRecord {
    /// Total charge gained
    pub charged: Option<i64>,
    /// Total charge drained
    pub drained: Option<i64>,
    /// Highest level reached
    pub highest: i64,
    /// Lowest level reached
    pub lowest: Option<i64>,
}

/// One day of stress
#[derive(Debug, Clone, PartialEq)]
pub struct StressRecord {
    /// Average stress level (0-100)
    pub avg_level: i64,
    /// Maximum stress level
    pub max_level: Option<i64>,
    /// Seconds at rest
    pub rest_duration: Option<i64>,
    /// Seconds at low stress
    pub low_duration: Option<i64>,
    /// Seconds at medium stress
    pub medium_duration: Option<i64>,
    /// Seconds at high stress
    pub high_duration: Option<i64>,
}

/// VO2 max extracted from training status
#[derive(Debug, Clone, PartialEq)]
pub struct Vo2MaxRecord {
    /// Estimated VO2 max
    pub value: f64,
    /// Vendor fitness age estimate
    pub fitness_age: Option<i64>,
}

/// Training load extracted from training status
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingLoadRecord {
    /// Acute (recent) load
    pub acute_load: f64,
    /// Chronic (long-run) load, legacy shape only
    pub chronic_load: Option<f64>,
    /// Acute/chronic ratio, legacy shape only
    pub load_ratio: Option<f64>,
}

/// Both signals carried by one training status payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingStatusRecord {
    /// VO2 max when present
    pub vo2max: Option<Vo2MaxRecord>,
    /// Training load when present
    pub training_load: Option<TrainingLoadRecord>,
}

/// One day of weight history
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    /// Calendar day of the measurement
    pub date: NaiveDate,
    /// Weight in grams
    pub weight_grams: f64,
    /// Body mass index
    pub bmi: Option<f64>,
    /// Body fat percentage
    pub body_fat: Option<f64>,
}

fn f64_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

fn i64_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(Value::as_i64)
}

/// First non-zero numeric field, then any numeric fallback field
fn preferred_i64(value: &Value, key: &str, legacy_key: &str) -> Option<i64> {
    i64_field(value, key)
        .filter(|v| *v != 0)
        .or_else(|| i64_field(value, legacy_key))
}

/// Sleep payloads wrap the nightly record under `dailySleepDTO`; a payload
/// without a positive `sleepTimeSeconds` is an empty night and yields no
/// record.
#[must_use]
pub fn parse_sleep(payload: &Value) -> Option<SleepRecord> {
    if !payload.is_object() {
        return None;
    }
    let dto = payload.get("dailySleepDTO").unwrap_or(payload);
    if !dto.is_object() {
        return None;
    }

    let duration_seconds = i64_field(dto, "sleepTimeSeconds").filter(|v| *v != 0)?;

    Some(SleepRecord {
        duration_seconds,
        deep_seconds: i64_field(dto, "deepSleepSeconds"),
        light_seconds: i64_field(dto, "lightSleepSeconds"),
        rem_seconds: i64_field(dto, "remSleepSeconds"),
        awake_seconds: i64_field(dto, "awakeSleepSeconds"),
        sleep_score: extract_sleep_score(dto, payload),
        avg_spo2: f64_field(dto, "averageSpO2Value"),
        avg_respiration: f64_field(dto, "averageRespirationValue"),
    })
}

/// Sleep score moved from a top-level legacy field into
/// `sleepScores.overall.value`; the new location wins.
fn extract_sleep_score(dto: &Value, payload: &Value) -> Option<i64> {
    let scores = dto.get("sleepScores").or_else(|| payload.get("sleepScores"));
    if let Some(overall) = scores
        .filter(|s| s.is_object())
        .and_then(|s| s.get("overall"))
        .filter(|o| o.is_object())
    {
        if let Some(value) = i64_field(overall, "value") {
            return Some(value);
        }
    }
    i64_field(dto, "overallSleepScoreValue")
        .filter(|v| *v != 0)
        .or_else(|| i64_field(payload, "overallSleepScoreValue"))
}

/// Daily summary: resting HR, steps, active calories
#[must_use]
pub fn parse_daily_summary(payload: &Value) -> Option<DailySummaryRecord> {
    if !payload.is_object() {
        return None;
    }

    Some(DailySummaryRecord {
        // A resting HR of zero means the watch never measured one
        resting_heart_rate: i64_field(payload, "restingHeartRate").filter(|v| *v != 0),
        total_steps: i64_field(payload, "totalSteps"),
        active_kilocalories: i64_field(payload, "activeKilocalories"),
    })
}

/// HRV payloads wrap the nightly summary under `hrvSummary`
#[must_use]
pub fn parse_hrv(payload: &Value) -> Option<HrvRecord> {
    if !payload.is_object() {
        return None;
    }
    let summary = payload.get("hrvSummary").unwrap_or(payload);
    if !summary.is_object() {
        return None;
    }

    let last_night_avg = f64_field(summary, "lastNightAvg").filter(|v| *v != 0.0)?;

    Some(HrvRecord {
        last_night_avg,
        last_night_5min_high: f64_field(summary, "lastNight5MinHigh"),
        weekly_avg: f64_field(summary, "weeklyAvg"),
        status: summary
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_owned),
    })
}

/// Body battery: highest/lowest computed from the intraday values array when
/// present, legacy top-level keys as fallback. The report arrives as a
/// single-element list.
#[must_use]
pub fn parse_body_battery(payload: &Value) -> Option<BodyBatteryRecord> {
    let entry = match payload {
        Value::Array(items) => items.first()?,
        other => other,
    };
    if !entry.is_object() {
        return None;
    }

    let levels: Vec<f64> = entry
        .get("bodyBatteryValuesArray")
        .and_then(Value::as_array)
        .map(|array| {
            array
                .iter()
                .filter_map(|item| item.as_array())
                .filter(|item| item.len() >= 2)
                .filter_map(|item| item[1].as_f64())
                .collect()
        })
        .unwrap_or_default();

    let mut highest = levels.iter().copied().reduce(f64::max).map(|v| v as i64);
    let mut lowest = levels.iter().copied().reduce(f64::min).map(|v| v as i64);

    if highest.is_none() {
        highest = i64_field(entry, "bodyBatteryHighestValue");
    }
    if lowest.is_none() {
        lowest = i64_field(entry, "bodyBatteryLowestValue");
    }

    Some(BodyBatteryRecord {
        charged: preferred_i64(entry, "charged", "bodyBatteryChargedValue"),
        drained: preferred_i64(entry, "drained", "bodyBatteryDrainedValue"),
        highest: highest?,
        lowest,
    })
}

/// Stress: `avgStressLevel` preferred, `overallStressLevel` legacy fallback
#[must_use]
pub fn parse_stress(payload: &Value) -> Option<StressRecord> {
    if !payload.is_object() {
        return None;
    }

    let avg_level = preferred_i64(payload, "avgStressLevel", "overallStressLevel")?;

    Some(StressRecord {
        avg_level,
        max_level: i64_field(payload, "maxStressLevel"),
        rest_duration: i64_field(payload, "restStressDuration"),
        low_duration: i64_field(payload, "lowStressDuration"),
        medium_duration: i64_field(payload, "mediumStressDuration"),
        high_duration: i64_field(payload, "highStressDuration"),
    })
}

/// Training status carries both VO2 max and training load.
///
/// Load precedence: the per-device monthly aggregate
/// (`metricsTrainingLoadBalanceDTOMap`, first device, aerobic low + aerobic
/// high + anaerobic) is preferred; the legacy acute/chronic/ratio fields are
/// consulted only when that structure is absent entirely.
#[must_use]
pub fn parse_training_status(payload: &Value) -> Option<TrainingStatusRecord> {
    if !payload.is_object() {
        return None;
    }

    let mut record = TrainingStatusRecord::default();

    if let Some(generic) = payload
        .get("mostRecentVO2Max")
        .filter(|v| v.is_object())
        .and_then(|v| v.get("generic"))
        .filter(|v| v.is_object())
    {
        if let Some(value) = f64_field(generic, "vo2MaxValue").filter(|v| *v != 0.0) {
            record.vo2max = Some(Vo2MaxRecord {
                value,
                fitness_age: i64_field(generic, "fitnessAge"),
            });
        }
    }

    let load_balance = payload
        .get("mostRecentTrainingLoadBalance")
        .filter(|v| v.is_object());

    if let Some(balance) = load_balance {
        let device_map = balance
            .get("metricsTrainingLoadBalanceDTOMap")
            .and_then(Value::as_object);
        if let Some(device) = device_map.and_then(|map| map.values().find(|v| v.is_object())) {
            let aero_low = f64_field(device, "monthlyLoadAerobicLow").unwrap_or(0.0);
            let aero_high = f64_field(device, "monthlyLoadAerobicHigh").unwrap_or(0.0);
            let anaerobic = f64_field(device, "monthlyLoadAnaerobic").unwrap_or(0.0);
            let total = ((aero_low + aero_high + anaerobic) * 10.0).round() / 10.0;
            if total > 0.0 {
                record.training_load = Some(TrainingLoadRecord {
                    acute_load: total,
                    chronic_load: None,
                    load_ratio: None,
                });
            }
        }
    } else {
        // Legacy shape, only when the new structure is missing altogether
        let agg = payload.get("aggregatedTrainingLoad").filter(|v| v.is_object());
        let acute = f64_field(payload, "acuteLoad")
            .filter(|v| *v != 0.0)
            .or_else(|| agg.and_then(|a| f64_field(a, "acuteLoad")));
        if let Some(acute_load) = acute {
            record.training_load = Some(TrainingLoadRecord {
                acute_load,
                chronic_load: f64_field(payload, "chronicLoad")
                    .filter(|v| *v != 0.0)
                    .or_else(|| agg.and_then(|a| f64_field(a, "chronicLoad"))),
                load_ratio: f64_field(payload, "loadRatio")
                    .filter(|v| *v != 0.0)
                    .or_else(|| agg.and_then(|a| f64_field(a, "loadRatio"))),
            });
        }
    }

    Some(record)
}

/// Weight range: `dailyWeightSummaries` entries with the measurement nested
/// under `latestWeight`. Epoch-millisecond dates are tolerated.
#[must_use]
pub fn parse_weight_range(payload: &Value) -> Vec<WeightEntry> {
    let summaries = match payload {
        Value::Object(map) => map
            .get("dailyWeightSummaries")
            .and_then(Value::as_array)
            .map(Vec::as_slice),
        Value::Array(items) => Some(items.as_slice()),
        _ => None,
    };
    let Some(entries) = summaries else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| {
            let latest = entry.get("latestWeight").unwrap_or(entry);
            if !latest.is_object() {
                return None;
            }
            let weight_grams = f64_field(latest, "weight").filter(|v| *v != 0.0)?;
            let date = entry
                .get("summaryDate")
                .or_else(|| entry.get("calendarDate"))
                .or_else(|| entry.get("date"))
                .and_then(parse_entry_date)?;

            Some(WeightEntry {
                date,
                weight_grams,
                bmi: f64_field(latest, "bmi"),
                body_fat: f64_field(latest, "bodyFat"),
            })
        })
        .collect()
}

/// Dates arrive either as `YYYY-MM-DD` strings or epoch milliseconds
fn parse_entry_date(value: &Value) -> Option<NaiveDate> {
    if let Some(text) = value.as_str() {
        return NaiveDate::parse_from_str(text, "%Y-%m-%d").ok();
    }
    let millis = value.as_i64()?;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}
