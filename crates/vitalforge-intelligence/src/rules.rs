// ABOUTME: Rules engine evaluating heuristic health detectors over daily metric series
// ABOUTME: Fixed catalog across sleep, recovery, stress, body composition, activity, correlation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Deterministic pattern detection over a [`MetricSet`].
//!
//! Detectors are evaluated in a fixed category order (sleep, recovery,
//! stress, body composition, activity, correlation) and findings keep that
//! insertion order; downstream consumers truncate to the first five, so the
//! order is part of the contract. A detector whose inputs are missing or too
//! short skips silently.

use serde_json::json;
use tracing::debug;
use vitalforge_core::constants::{
    activity, body_composition, correlation, recovery, sleep, stress, units, windows,
};
use vitalforge_core::models::{Finding, MetricKind, MetricSet, RuleCategory, Severity};

use crate::stats::{average, consecutive_above, consecutive_below, recent_values, trend_slope};

/// Round to one decimal place
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to two decimal places
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to three decimal places
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Round to a whole number for display
fn round0(v: f64) -> i64 {
    v.round() as i64
}

/// Format a whole number with thousands separators, e.g. `6500` -> `6,500`
fn format_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Stateless detector catalog over one immutable metric set
pub struct RulesEngine;

impl RulesEngine {
    /// Evaluate every detector and return the findings in category order
    #[must_use]
    pub fn evaluate(metrics: &MetricSet) -> Vec<Finding> {
        let mut findings = Vec::new();

        Self::sleep_rules(metrics, &mut findings);
        Self::recovery_rules(metrics, &mut findings);
        Self::stress_rules(metrics, &mut findings);
        Self::body_composition_rules(metrics, &mut findings);
        Self::activity_rules(metrics, &mut findings);
        Self::correlation_rules(metrics, &mut findings);

        debug!(count = findings.len(), "rules evaluation complete");
        findings
    }

    fn sleep_rules(metrics: &MetricSet, findings: &mut Vec<Finding>) {
        let duration = metrics.get(MetricKind::SleepDuration);
        if !duration.is_empty() {
            let consec =
                consecutive_below(duration, sleep::LOW_DURATION_SECONDS, windows::STREAK_WINDOW);
            if consec >= windows::STREAK_TRIGGER_DAYS {
                let recent_avg_hrs = average(&recent_values(duration, windows::WEEK))
                    .map(|v| round1(v / units::SECONDS_PER_HOUR));
                findings.push(
                    Finding::new(
                        RuleCategory::Sleep,
                        Severity::Warning,
                        "sleep_low_duration",
                        format!("Sleep under 7 hours for {consec} consecutive nights"),
                    )
                    .with_data(json!({
                        "consecutive_days": consec,
                        "recent_avg_hrs": recent_avg_hrs,
                    })),
                );
            }

            if let Some(slope) = trend_slope(duration, windows::TREND_WINDOW) {
                if slope < sleep::DECLINING_SLOPE_SECONDS_PER_DAY {
                    findings.push(
                        Finding::new(
                            RuleCategory::Sleep,
                            Severity::Warning,
                            "sleep_declining",
                            "Sleep duration trending downward over the past 2 weeks",
                        )
                        .with_data(json!({
                            "trend_min_per_day": round1(slope / units::SECONDS_PER_MINUTE),
                        })),
                    );
                }
            }
        }

        let score = metrics.get(MetricKind::SleepScore);
        if !score.is_empty() {
            let consec = consecutive_below(score, sleep::LOW_SCORE, windows::STREAK_WINDOW);
            if consec >= windows::STREAK_TRIGGER_DAYS {
                let recent_avg = average(&recent_values(score, windows::WEEK)).map(round0);
                findings.push(
                    Finding::new(
                        RuleCategory::Sleep,
                        Severity::Warning,
                        "sleep_low_score",
                        format!("Sleep score below 70 for {consec} consecutive days"),
                    )
                    .with_data(json!({
                        "consecutive_days": consec,
                        "recent_avg": recent_avg,
                    })),
                );
            }
        }
    }

    fn recovery_rules(metrics: &MetricSet, findings: &mut Vec<Finding>) {
        let hrv = metrics.get(MetricKind::Hrv);
        if hrv.len() >= recovery::MIN_BASELINE_SAMPLES {
            let values: Vec<f64> = hrv.iter().map(|p| p.value).collect();
            let avg_30 = average(&values);
            let avg_7 = average(&recent_values(hrv, windows::WEEK));
            let prev_7 = (hrv.len() >= recovery::MIN_WEEKLY_COMPARISON_SAMPLES)
                .then(|| average(&values[values.len() - 14..values.len() - 7]))
                .flatten();

            if let Some(baseline) = avg_30.filter(|v| *v > 0.0) {
                let consec =
                    consecutive_below(hrv, baseline, recovery::HRV_BASELINE_SCAN_WINDOW);
                if consec >= windows::STREAK_TRIGGER_DAYS {
                    findings.push(
                        Finding::new(
                            RuleCategory::Recovery,
                            Severity::Warning,
                            "hrv_below_baseline",
                            format!("HRV below your baseline for {consec} consecutive days"),
                        )
                        .with_data(json!({
                            "consecutive_days": consec,
                            "baseline": round0(baseline),
                            "current_avg": avg_7.map(round0),
                        })),
                    );
                }
            }

            if let (Some(last_week), Some(this_week)) = (prev_7.filter(|v| *v > 0.0), avg_7) {
                let pct_change = ((this_week - last_week) / last_week) * 100.0;
                if pct_change < recovery::HRV_WEEKLY_DROP_PCT {
                    findings.push(
                        Finding::new(
                            RuleCategory::Recovery,
                            Severity::Alert,
                            "hrv_weekly_drop",
                            format!(
                                "HRV dropped {}% week-over-week",
                                round0(pct_change).abs()
                            ),
                        )
                        .with_data(json!({
                            "this_week": round0(this_week),
                            "last_week": round0(last_week),
                            "pct_change": round1(pct_change),
                        })),
                    );
                }
            }
        }

        let rhr = metrics.get(MetricKind::RestingHr);
        if rhr.len() >= recovery::MIN_BASELINE_SAMPLES {
            let values: Vec<f64> = rhr.iter().map(|p| p.value).collect();
            let avg_30 = average(&values);
            if let (Some(baseline), Some(latest)) =
                (avg_30.filter(|v| *v > 0.0), rhr.last().map(|p| p.value))
            {
                if latest > baseline * recovery::RHR_ELEVATED_RATIO {
                    let pct_above = round0(((latest - baseline) / baseline) * 100.0);
                    findings.push(
                        Finding::new(
                            RuleCategory::Recovery,
                            Severity::Warning,
                            "rhr_elevated",
                            format!(
                                "Resting HR at {:.0} bpm — {pct_above}% above your average ({} bpm)",
                                latest,
                                round0(baseline)
                            ),
                        )
                        .with_data(json!({
                            "current": round0(latest),
                            "baseline": round0(baseline),
                        })),
                    );
                }
            }

            if let Some(slope) = trend_slope(rhr, windows::TREND_WINDOW) {
                if slope > recovery::RHR_RISING_SLOPE {
                    findings.push(
                        Finding::new(
                            RuleCategory::Recovery,
                            Severity::Warning,
                            "rhr_trending_up",
                            "Resting heart rate trending upward over the past 2 weeks",
                        )
                        .with_data(json!({ "trend_bpm_per_day": round2(slope) })),
                    );
                }
            }
        }

        let battery = metrics.get(MetricKind::BodyBattery);
        if !battery.is_empty() {
            let consec = consecutive_below(
                battery,
                recovery::BODY_BATTERY_RECOVERED,
                windows::STREAK_WINDOW,
            );
            if consec >= windows::STREAK_TRIGGER_DAYS {
                let recent_high = recent_values(battery, 3)
                    .into_iter()
                    .fold(f64::NEG_INFINITY, f64::max);
                findings.push(
                    Finding::new(
                        RuleCategory::Recovery,
                        Severity::Warning,
                        "body_battery_low",
                        format!(
                            "Body Battery hasn't recovered above 80 for {consec} consecutive days"
                        ),
                    )
                    .with_data(json!({
                        "consecutive_days": consec,
                        "recent_high": round0(recent_high),
                    })),
                );
            }
        }
    }

    fn stress_rules(metrics: &MetricSet, findings: &mut Vec<Finding>) {
        let stress_series = metrics.get(MetricKind::Stress);
        if stress_series.is_empty() {
            return;
        }

        let consec = consecutive_above(stress_series, stress::HIGH_LEVEL, windows::STREAK_WINDOW);
        if consec >= windows::STREAK_TRIGGER_DAYS {
            let recent_avg = average(&recent_values(stress_series, windows::WEEK)).map(round0);
            findings.push(
                Finding::new(
                    RuleCategory::Stress,
                    Severity::Warning,
                    "stress_high",
                    format!("Average daily stress above 50 for {consec} consecutive days"),
                )
                .with_data(json!({
                    "consecutive_days": consec,
                    "recent_avg": recent_avg,
                })),
            );
        }

        if let Some(slope) = trend_slope(stress_series, windows::TREND_WINDOW) {
            if slope > stress::RISING_SLOPE {
                findings.push(
                    Finding::new(
                        RuleCategory::Stress,
                        Severity::Warning,
                        "stress_trending_up",
                        "Stress levels trending upward over the past 2 weeks",
                    )
                    .with_data(json!({ "trend_per_day": round2(slope) })),
                );
            }
        }
    }

    fn body_composition_rules(metrics: &MetricSet, findings: &mut Vec<Finding>) {
        let weight = metrics.get(MetricKind::Weight);
        if weight.is_empty() {
            return;
        }

        if let Some(last) = weight.last() {
            let days_since = (metrics.today() - last.date).num_days();
            if days_since >= body_composition::STALE_WEIGHT_DAYS {
                findings.push(
                    Finding::new(
                        RuleCategory::BodyComposition,
                        Severity::Info,
                        "weight_no_data",
                        format!("No weight data logged in {days_since} days"),
                    )
                    .with_data(json!({ "days_since": days_since })),
                );
            }
        }

        if weight.len() >= 2 * windows::WEEK {
            let values: Vec<f64> = weight.iter().map(|p| p.value).collect();
            let recent_avg = average(&recent_values(weight, windows::WEEK));
            let prev_avg = average(&values[values.len() - 14..values.len() - 7]);

            if let (Some(recent), Some(prev)) = (recent_avg, prev_avg) {
                let weekly_change = recent - prev;
                if weekly_change > body_composition::RAPID_GAIN_GRAMS_PER_WEEK {
                    let lbs_per_week = round1(weekly_change / units::GRAMS_PER_POUND);
                    findings.push(
                        Finding::new(
                            RuleCategory::BodyComposition,
                            Severity::Warning,
                            "weight_rapid_gain",
                            format!("Weight increasing at {lbs_per_week} lbs/week"),
                        )
                        .with_data(json!({
                            "weekly_change_g": round0(weekly_change),
                            "weekly_change_lbs": lbs_per_week,
                        })),
                    );
                }
            }

            if weight.len() >= body_composition::PLATEAU_MIN_SAMPLES {
                let avg_3wk_ago = average(&values[values.len() - 21..values.len() - 14]);
                if let (Some(recent), Some(baseline)) = (recent_avg, avg_3wk_ago) {
                    let change_3wk = (recent - baseline).abs();
                    let load = metrics.get(MetricKind::TrainingLoad);
                    let has_training = load.len() >= windows::WEEK
                        && average(&recent_values(load, windows::WEEK))
                            .is_some_and(|avg| avg > 0.0);
                    if change_3wk < body_composition::PLATEAU_CHANGE_GRAMS && has_training {
                        findings.push(
                            Finding::new(
                                RuleCategory::BodyComposition,
                                Severity::Info,
                                "weight_plateau",
                                "Weight has plateaued over the past 3 weeks despite active training",
                            )
                            .with_data(json!({ "change_g": round0(change_3wk) })),
                        );
                    }
                }
            }
        }
    }

    fn activity_rules(metrics: &MetricSet, findings: &mut Vec<Finding>) {
        let steps = metrics.get(MetricKind::Steps);
        if steps.len() >= windows::WEEK {
            if let Some(avg_steps) =
                average(&recent_values(steps, windows::WEEK)).filter(|v| *v > 0.0)
            {
                if avg_steps < activity::STEP_TARGET {
                    findings.push(
                        Finding::new(
                            RuleCategory::Activity,
                            Severity::Info,
                            "steps_low",
                            format!(
                                "Daily step average this week is {} — below 7,000 target",
                                format_thousands(round0(avg_steps))
                            ),
                        )
                        .with_data(json!({ "weekly_avg": round0(avg_steps) })),
                    );
                }
            }
        }

        let load = metrics.get(MetricKind::TrainingLoad);
        if load.len() >= 2 * windows::WEEK {
            let values: Vec<f64> = load.iter().map(|p| p.value).collect();
            let avg_recent = average(&recent_values(load, windows::WEEK));
            let avg_prev = average(&values[values.len() - 14..values.len() - 7]);
            if let (Some(recent), Some(prev)) = (avg_recent, avg_prev.filter(|v| *v > 0.0)) {
                let ratio = recent / prev;
                if ratio > activity::LOAD_SPIKE_RATIO {
                    findings.push(
                        Finding::new(
                            RuleCategory::Activity,
                            Severity::Warning,
                            "training_load_spike",
                            format!(
                                "Training load {}% above last week — overtraining risk",
                                round0((ratio - 1.0) * 100.0)
                            ),
                        )
                        .with_data(json!({
                            "this_week": round0(recent),
                            "last_week": round0(prev),
                            "ratio": round2(ratio),
                        })),
                    );
                }
            }
        }

        let vo2 = metrics.get(MetricKind::Vo2Max);
        if vo2.len() >= windows::TREND_WINDOW {
            if let Some(slope) = trend_slope(vo2, windows::TREND_WINDOW) {
                if slope < activity::VO2MAX_DECLINE_SLOPE {
                    findings.push(
                        Finding::new(
                            RuleCategory::Activity,
                            Severity::Warning,
                            "vo2max_declining",
                            "VO2 Max is declining",
                        )
                        .with_data(json!({ "trend_per_day": round3(slope) })),
                    );
                }
            }
        }
    }

    fn correlation_rules(metrics: &MetricSet, findings: &mut Vec<Finding>) {
        let sleep_dur = metrics.get(MetricKind::SleepDuration);
        let rhr = metrics.get(MetricKind::RestingHr);
        let hrv = metrics.get(MetricKind::Hrv);
        let load = metrics.get(MetricKind::TrainingLoad);

        if !sleep_dur.is_empty() && !rhr.is_empty() && !hrv.is_empty() {
            let poor_sleep = sleep_dur.len() >= 3
                && average(&recent_values(sleep_dur, 3))
                    .is_some_and(|avg| avg > 0.0 && avg < correlation::SHORT_SLEEP_SECONDS);

            let rhr_values: Vec<f64> = rhr.iter().map(|p| p.value).collect();
            let elevated_rhr = match (average(&rhr_values), rhr.last()) {
                (Some(baseline), Some(latest)) if baseline > 0.0 => {
                    latest.value > baseline * correlation::RHR_ELEVATED_RATIO
                }
                _ => false,
            };

            let hrv_values: Vec<f64> = hrv.iter().map(|p| p.value).collect();
            let low_hrv = match (average(&hrv_values), average(&recent_values(hrv, 3))) {
                (Some(baseline), Some(recent)) if baseline > 0.0 && recent > 0.0 => {
                    recent < baseline * correlation::HRV_SUPPRESSED_RATIO
                }
                _ => false,
            };

            if poor_sleep && elevated_rhr && low_hrv {
                findings.push(Finding::new(
                    RuleCategory::Correlation,
                    Severity::Alert,
                    "recovery_deficit",
                    "Multiple recovery markers indicate a recovery deficit: poor sleep, \
                     elevated resting HR, and low HRV",
                ));
            }
        }

        if !load.is_empty() && !hrv.is_empty() && !rhr.is_empty() {
            let load_values: Vec<f64> = load.iter().map(|p| p.value).collect();
            let high_load = load.len() >= windows::WEEK
                && match (
                    average(&recent_values(load, windows::WEEK)),
                    average(&load_values),
                ) {
                    (Some(recent), Some(baseline)) if recent > 0.0 && baseline > 0.0 => {
                        recent > baseline * correlation::LOAD_ELEVATED_RATIO
                    }
                    _ => false,
                };

            let declining_hrv = trend_slope(hrv, windows::WEEK)
                .is_some_and(|slope| slope < correlation::HRV_DECLINE_SLOPE);

            let rhr_values: Vec<f64> = rhr.iter().map(|p| p.value).collect();
            let elevated_rhr = match (average(&rhr_values), rhr.last()) {
                (Some(baseline), Some(latest)) if baseline > 0.0 => {
                    latest.value > baseline * correlation::RHR_ELEVATED_RATIO
                }
                _ => false,
            };

            if high_load && declining_hrv && elevated_rhr {
                findings.push(Finding::new(
                    RuleCategory::Correlation,
                    Severity::Alert,
                    "overtraining_risk",
                    "High training load combined with declining HRV and elevated resting HR \
                     suggests overtraining risk",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_thousands;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(6500), "6,500");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }
}
