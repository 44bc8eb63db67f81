// ABOUTME: Rules engine tests over constructed metric sets, no database or network
// ABOUTME: Covers streak detectors, trends, comparisons, correlations, and ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

mod common;

use common::{daily_series_ending, metric_set};
use chrono::{Days, Utc};
use vitalforge::intelligence::RulesEngine;
use vitalforge::models::{MetricKind, MetricSet, RuleCategory, Severity};

fn find<'a>(
    findings: &'a [vitalforge::models::Finding],
    rule: &str,
) -> Option<&'a vitalforge::models::Finding> {
    findings.iter().find(|f| f.rule == rule)
}

#[test]
fn empty_metric_set_yields_no_findings() {
    let metrics = MetricSet::new(Utc::now().date_naive());
    assert!(RulesEngine::evaluate(&metrics).is_empty());
}

#[test]
fn short_sleep_streak_fires_with_exact_count() {
    // Five nights at 6.5h, all under the 7h threshold
    let metrics = metric_set(&[(MetricKind::SleepDuration, &[6.5 * 3600.0; 5])]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "sleep_low_duration").expect("detector should fire");
    assert_eq!(finding.category, RuleCategory::Sleep);
    assert_eq!(finding.severity, Severity::Warning);
    assert_eq!(finding.data["consecutive_days"], 5);
    assert!((finding.data["recent_avg_hrs"].as_f64().unwrap() - 6.5).abs() < 1e-9);

    // Only the streak detector fires: five equal points have zero trend
    assert_eq!(
        findings.iter().filter(|f| f.category == RuleCategory::Sleep).count(),
        1
    );
}

#[test]
fn short_sleep_streak_broken_by_one_good_night() {
    let mut values = vec![6.0 * 3600.0; 4];
    values.push(8.0 * 3600.0);
    values.extend([6.0 * 3600.0, 6.0 * 3600.0]);
    let metrics = metric_set(&[(MetricKind::SleepDuration, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    // Only two trailing short nights, below the three-day trigger
    assert!(find(&findings, "sleep_low_duration").is_none());
}

#[test]
fn declining_sleep_trend_fires() {
    // Losing 5 minutes per night for two weeks
    let values: Vec<f64> = (0..14)
        .map(|i| 8.0 * 3600.0 - f64::from(i) * 300.0)
        .collect();
    let metrics = metric_set(&[(MetricKind::SleepDuration, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "sleep_declining").expect("detector should fire");
    assert!((finding.data["trend_min_per_day"].as_f64().unwrap() - (-5.0)).abs() < 1e-9);
}

#[test]
fn low_sleep_score_streak_fires() {
    let metrics = metric_set(&[(MetricKind::SleepScore, &[65.0, 60.0, 68.0, 62.0])]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "sleep_low_score").expect("detector should fire");
    assert_eq!(finding.data["consecutive_days"], 4);
}

#[test]
fn hrv_below_baseline_counts_trailing_days() {
    // Thirteen days at 50 then seven at 30: baseline 43, last seven all below
    let mut values = vec![50.0; 13];
    values.extend([30.0; 7]);
    let metrics = metric_set(&[(MetricKind::Hrv, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "hrv_below_baseline").expect("detector should fire");
    assert_eq!(finding.data["consecutive_days"], 7);
    assert_eq!(finding.data["baseline"], 43);
}

#[test]
fn hrv_weekly_drop_escalates_to_alert() {
    // Previous week at 50, this week at 35: a 30% drop
    let mut values = vec![50.0; 7];
    values.extend([35.0; 7]);
    let metrics = metric_set(&[(MetricKind::Hrv, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "hrv_weekly_drop").expect("detector should fire");
    assert_eq!(finding.severity, Severity::Alert);
    assert_eq!(finding.data["this_week"], 35);
    assert_eq!(finding.data["last_week"], 50);
    assert!((finding.data["pct_change"].as_f64().unwrap() - (-30.0)).abs() < 1e-9);
}

#[test]
fn elevated_rhr_fires_against_baseline() {
    // Baseline near 50, latest spikes to 60 (>10% above)
    let mut values = vec![50.0; 13];
    values.push(60.0);
    let metrics = metric_set(&[(MetricKind::RestingHr, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "rhr_elevated").expect("detector should fire");
    assert_eq!(finding.data["current"], 60);
    assert!(finding.message.contains("60 bpm"));
}

#[test]
fn rhr_within_band_stays_quiet() {
    let mut values = vec![50.0; 13];
    values.push(54.0); // 8% above, under the 10% gate
    let metrics = metric_set(&[(MetricKind::RestingHr, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    assert!(find(&findings, "rhr_elevated").is_none());
}

#[test]
fn body_battery_streak_fires() {
    let metrics = metric_set(&[(MetricKind::BodyBattery, &[70.0, 65.0, 75.0])]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "body_battery_low").expect("detector should fire");
    assert_eq!(finding.data["consecutive_days"], 3);
    assert_eq!(finding.data["recent_high"], 75);
}

#[test]
fn stress_streak_and_trend_fire_together() {
    // Rising stress: trailing days above 50 and a steep upward trend
    let values: Vec<f64> = (0..14).map(|i| 40.0 + f64::from(i) * 2.0).collect();
    let metrics = metric_set(&[(MetricKind::Stress, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    assert!(find(&findings, "stress_high").is_some());
    let trend = find(&findings, "stress_trending_up").expect("trend should fire");
    assert!((trend.data["trend_per_day"].as_f64().unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn stale_weight_reports_days_since() {
    let last_day = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(9))
        .unwrap();
    let today = Utc::now().date_naive();
    let mut metrics = MetricSet::new(today);
    metrics.insert(
        MetricKind::Weight,
        daily_series_ending(&[80_000.0; 3], last_day),
    );
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "weight_no_data").expect("detector should fire");
    assert_eq!(finding.severity, Severity::Info);
    assert_eq!(finding.data["days_since"], 9);
}

#[test]
fn rapid_weight_gain_fires_week_over_week() {
    // Previous week at 80kg, this week at 81.2kg: +1200g/week
    let mut values = vec![80_000.0; 7];
    values.extend([81_200.0; 7]);
    let metrics = metric_set(&[(MetricKind::Weight, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "weight_rapid_gain").expect("detector should fire");
    assert_eq!(finding.data["weekly_change_g"], 1200);
}

#[test]
fn weight_plateau_requires_active_training() {
    let weight = vec![80_000.0; 21];

    let with_training = metric_set(&[
        (MetricKind::Weight, &weight),
        (MetricKind::TrainingLoad, &[120.0; 7]),
    ]);
    let findings = RulesEngine::evaluate(&with_training);
    assert!(find(&findings, "weight_plateau").is_some());

    let without_training = metric_set(&[(MetricKind::Weight, &weight)]);
    let findings = RulesEngine::evaluate(&without_training);
    assert!(find(&findings, "weight_plateau").is_none());
}

#[test]
fn low_steps_formats_with_thousands_separator() {
    let metrics = metric_set(&[(MetricKind::Steps, &[6500.0; 7])]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "steps_low").expect("detector should fire");
    assert_eq!(finding.severity, Severity::Info);
    assert!(finding.message.contains("6,500"));
    assert_eq!(finding.data["weekly_avg"], 6500);
}

#[test]
fn training_load_spike_reports_ratio() {
    let mut values = vec![100.0; 7];
    values.extend([150.0; 7]);
    let metrics = metric_set(&[(MetricKind::TrainingLoad, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "training_load_spike").expect("detector should fire");
    assert_eq!(finding.data["this_week"], 150);
    assert_eq!(finding.data["last_week"], 100);
    assert!((finding.data["ratio"].as_f64().unwrap() - 1.5).abs() < 1e-9);
}

#[test]
fn vo2max_decline_uses_three_decimals() {
    let values: Vec<f64> = (0..14).map(|i| 50.0 - f64::from(i) * 0.05).collect();
    let metrics = metric_set(&[(MetricKind::Vo2Max, &values)]);
    let findings = RulesEngine::evaluate(&metrics);

    let finding = find(&findings, "vo2max_declining").expect("detector should fire");
    assert!((finding.data["trend_per_day"].as_f64().unwrap() - (-0.05)).abs() < 1e-9);
}

#[test]
fn recovery_deficit_needs_all_three_signals() {
    let short_sleep = vec![5.5 * 3600.0; 5];
    let mut rhr = vec![50.0; 13];
    rhr.push(54.0); // >5% above baseline
    let mut hrv = vec![50.0; 17];
    hrv.extend([35.0; 3]); // 3-day avg well under 85% of baseline

    let metrics = metric_set(&[
        (MetricKind::SleepDuration, &short_sleep),
        (MetricKind::RestingHr, &rhr),
        (MetricKind::Hrv, &hrv),
    ]);
    let findings = RulesEngine::evaluate(&metrics);
    let finding = find(&findings, "recovery_deficit").expect("detector should fire");
    assert_eq!(finding.severity, Severity::Alert);

    // Take away the sleep deficit and the correlation goes quiet
    let metrics = metric_set(&[
        (MetricKind::SleepDuration, &[8.0 * 3600.0; 5]),
        (MetricKind::RestingHr, &rhr),
        (MetricKind::Hrv, &hrv),
    ]);
    let findings = RulesEngine::evaluate(&metrics);
    assert!(find(&findings, "recovery_deficit").is_none());
}

#[test]
fn overtraining_risk_combines_load_hrv_and_rhr() {
    // Load well above the 30-day average in the last week
    let mut load = vec![80.0; 23];
    load.extend([150.0; 7]);
    // HRV falling more than 0.5/day over the last week
    let hrv: Vec<f64> = (0..14).map(|i| 60.0 - f64::from(i) * 1.0).collect();
    let mut rhr = vec![50.0; 13];
    rhr.push(54.0);

    let metrics = metric_set(&[
        (MetricKind::TrainingLoad, &load),
        (MetricKind::Hrv, &hrv),
        (MetricKind::RestingHr, &rhr),
    ]);
    let findings = RulesEngine::evaluate(&metrics);
    let finding = find(&findings, "overtraining_risk").expect("detector should fire");
    assert_eq!(finding.category, RuleCategory::Correlation);
    assert_eq!(finding.severity, Severity::Alert);
}

#[test]
fn findings_preserve_category_order() {
    // Trip one detector in each of sleep, stress, and activity
    let metrics = metric_set(&[
        (MetricKind::SleepDuration, &[6.0 * 3600.0; 5]),
        (MetricKind::Stress, &[60.0; 5]),
        (MetricKind::Steps, &[4000.0; 7]),
    ]);
    let findings = RulesEngine::evaluate(&metrics);

    let categories: Vec<RuleCategory> = findings.iter().map(|f| f.category).collect();
    assert_eq!(
        categories,
        vec![RuleCategory::Sleep, RuleCategory::Stress, RuleCategory::Activity]
    );
}

#[test]
fn too_short_series_skip_silently() {
    // Everything present but under the detectors' minimum lengths
    let metrics = metric_set(&[
        (MetricKind::Hrv, &[30.0; 3]),
        (MetricKind::RestingHr, &[70.0; 3]),
        (MetricKind::Vo2Max, &[45.0; 5]),
        (MetricKind::TrainingLoad, &[100.0; 5]),
        (MetricKind::Steps, &[1000.0; 3]),
    ]);
    let findings = RulesEngine::evaluate(&metrics);
    assert!(findings.is_empty());
}
