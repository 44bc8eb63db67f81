// ABOUTME: Parser tests over captured Garmin payload shapes, current and legacy
// ABOUTME: Verifies format precedence rules and the missing-key to no-data mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use chrono::NaiveDate;
use serde_json::json;
use vitalforge_providers::parsers::{
    parse_body_battery, parse_daily_summary, parse_hrv, parse_sleep, parse_stress,
    parse_training_status, parse_weight_range,
};

#[test]
fn sleep_prefers_new_score_shape() {
    let payload = json!({
        "dailySleepDTO": {
            "sleepTimeSeconds": 27000,
            "deepSleepSeconds": 5400,
            "sleepScores": { "overall": { "value": 82 } },
            "overallSleepScoreValue": 60
        }
    });

    let record = parse_sleep(&payload).unwrap();
    assert_eq!(record.duration_seconds, 27000);
    assert_eq!(record.deep_seconds, Some(5400));
    assert_eq!(record.sleep_score, Some(82));
}

#[test]
fn sleep_falls_back_to_legacy_score() {
    let payload = json!({
        "dailySleepDTO": {
            "sleepTimeSeconds": 25200,
            "overallSleepScoreValue": 71
        }
    });

    let record = parse_sleep(&payload).unwrap();
    assert_eq!(record.sleep_score, Some(71));
}

#[test]
fn sleep_without_duration_is_no_data() {
    assert!(parse_sleep(&json!({ "dailySleepDTO": { "sleepTimeSeconds": 0 } })).is_none());
    assert!(parse_sleep(&json!({ "dailySleepDTO": {} })).is_none());
    assert!(parse_sleep(&json!(null)).is_none());
}

#[test]
fn daily_summary_drops_zero_resting_hr_but_keeps_zero_steps() {
    let payload = json!({
        "restingHeartRate": 0,
        "totalSteps": 0,
        "activeKilocalories": 320
    });

    let record = parse_daily_summary(&payload).unwrap();
    assert_eq!(record.resting_heart_rate, None);
    assert_eq!(record.total_steps, Some(0));
    assert_eq!(record.active_kilocalories, Some(320));
}

#[test]
fn hrv_unwraps_summary_envelope() {
    let payload = json!({
        "hrvSummary": {
            "lastNightAvg": 48.0,
            "lastNight5MinHigh": 72.0,
            "weeklyAvg": 51.0,
            "status": "BALANCED"
        }
    });

    let record = parse_hrv(&payload).unwrap();
    assert!((record.last_night_avg - 48.0).abs() < f64::EPSILON);
    assert_eq!(record.status.as_deref(), Some("BALANCED"));
}

#[test]
fn body_battery_computes_extremes_from_values_array() {
    let payload = json!([{
        "charged": 70,
        "drained": 55,
        "bodyBatteryValuesArray": [
            [1700000000000i64, 42],
            [1700000300000i64, null],
            [1700000600000i64, 88],
            [1700000900000i64, 17]
        ],
        "bodyBatteryHighestValue": 99,
        "bodyBatteryLowestValue": 1
    }]);

    let record = parse_body_battery(&payload).unwrap();
    // The values array wins over the legacy top-level keys
    assert_eq!(record.highest, 88);
    assert_eq!(record.lowest, Some(17));
    assert_eq!(record.charged, Some(70));
}

#[test]
fn body_battery_uses_legacy_keys_when_array_is_empty() {
    let payload = json!([{
        "bodyBatteryValuesArray": [],
        "bodyBatteryHighestValue": 91,
        "bodyBatteryLowestValue": 12,
        "bodyBatteryChargedValue": 64
    }]);

    let record = parse_body_battery(&payload).unwrap();
    assert_eq!(record.highest, 91);
    assert_eq!(record.lowest, Some(12));
    assert_eq!(record.charged, Some(64));
}

#[test]
fn body_battery_without_highest_is_no_data() {
    assert!(parse_body_battery(&json!([{ "charged": 10 }])).is_none());
    assert!(parse_body_battery(&json!([])).is_none());
}

#[test]
fn stress_prefers_avg_over_overall_level() {
    let preferred = json!({ "avgStressLevel": 37, "overallStressLevel": 80 });
    assert_eq!(parse_stress(&preferred).unwrap().avg_level, 37);

    let legacy_only = json!({ "overallStressLevel": 44, "maxStressLevel": 92 });
    let record = parse_stress(&legacy_only).unwrap();
    assert_eq!(record.avg_level, 44);
    assert_eq!(record.max_level, Some(92));

    assert!(parse_stress(&json!({ "maxStressLevel": 92 })).is_none());
}

#[test]
fn training_status_extracts_vo2max() {
    let payload = json!({
        "mostRecentVO2Max": { "generic": { "vo2MaxValue": 49.0, "fitnessAge": 31 } }
    });

    let record = parse_training_status(&payload).unwrap();
    let vo2 = record.vo2max.unwrap();
    assert!((vo2.value - 49.0).abs() < f64::EPSILON);
    assert_eq!(vo2.fitness_age, Some(31));
    assert!(record.training_load.is_none());
}

#[test]
fn training_load_prefers_per_device_monthly_aggregate() {
    let payload = json!({
        "mostRecentTrainingLoadBalance": {
            "metricsTrainingLoadBalanceDTOMap": {
                "3411": {
                    "monthlyLoadAerobicLow": 120.4,
                    "monthlyLoadAerobicHigh": 80.3,
                    "monthlyLoadAnaerobic": 20.0
                }
            }
        },
        "acuteLoad": 999.0
    });

    let record = parse_training_status(&payload).unwrap();
    let load = record.training_load.unwrap();
    assert!((load.acute_load - 220.7).abs() < 1e-9);
    assert_eq!(load.chronic_load, None);
    assert_eq!(load.load_ratio, None);
}

#[test]
fn training_load_falls_back_to_legacy_only_when_map_absent() {
    let legacy = json!({
        "acuteLoad": 310.0,
        "chronicLoad": 250.0,
        "loadRatio": 1.24
    });
    let record = parse_training_status(&legacy).unwrap();
    let load = record.training_load.unwrap();
    assert!((load.acute_load - 310.0).abs() < f64::EPSILON);
    assert_eq!(load.chronic_load, Some(250.0));
    assert_eq!(load.load_ratio, Some(1.24));

    let aggregated = json!({
        "aggregatedTrainingLoad": { "acuteLoad": 118.0, "chronicLoad": 97.0 }
    });
    let record = parse_training_status(&aggregated).unwrap();
    assert!((record.training_load.unwrap().acute_load - 118.0).abs() < f64::EPSILON);

    // New shape present but empty: no load and no legacy fallback
    let zeroed = json!({
        "mostRecentTrainingLoadBalance": {
            "metricsTrainingLoadBalanceDTOMap": {
                "3411": { "monthlyLoadAerobicLow": 0.0 }
            }
        },
        "acuteLoad": 310.0
    });
    assert!(parse_training_status(&zeroed).unwrap().training_load.is_none());
}

#[test]
fn weight_range_reads_summaries_and_epoch_dates() {
    let payload = json!({
        "dailyWeightSummaries": [
            {
                "summaryDate": "2025-07-28",
                "latestWeight": { "weight": 81200.0, "bmi": 24.8, "bodyFat": 18.2 }
            },
            {
                // 2025-07-29T06:00:00Z as epoch milliseconds
                "summaryDate": 1753768800000i64,
                "latestWeight": { "weight": 81000.0 }
            },
            { "summaryDate": "2025-07-30" },
            "garbage"
        ]
    });

    let entries = parse_weight_range(&payload);
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].date,
        NaiveDate::from_ymd_opt(2025, 7, 28).unwrap()
    );
    assert!((entries[0].weight_grams - 81200.0).abs() < f64::EPSILON);
    assert_eq!(entries[0].body_fat, Some(18.2));
    assert_eq!(
        entries[1].date,
        NaiveDate::from_ymd_opt(2025, 7, 29).unwrap()
    );
}

#[test]
fn weight_range_tolerates_bare_lists_and_junk() {
    let bare = json!([
        { "calendarDate": "2025-07-27", "latestWeight": { "weight": 80500.0 } }
    ]);
    assert_eq!(parse_weight_range(&bare).len(), 1);

    assert!(parse_weight_range(&json!(null)).is_empty());
    assert!(parse_weight_range(&json!({ "unexpected": true })).is_empty());
}
