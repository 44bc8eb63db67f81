// ABOUTME: Fixed-format textual summary of 7-day and 30-day metric averages
// ABOUTME: Feeds the narrative layer so model output stays numerically grounded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Text rendering of a metric set for the narrative prompt.
//!
//! One line per metric with the 7-day and 30-day averages. Sleep is converted
//! to hours and weight to kilograms; everything else stays in its native
//! unit. Metrics with no data render as `N/A` rather than being dropped, so
//! the model sees the same line structure every time.

use vitalforge_core::constants::units;
use vitalforge_core::models::{MetricKind, MetricSet};

use crate::stats::average;

/// Average of the last `n` values scaled by `1/scale`, or `N/A`
fn fmt_avg(values: &[f64], n: usize, scale: f64) -> String {
    let start = values.len().saturating_sub(n);
    average(&values[start..]).map_or_else(|| "N/A".to_owned(), |v| format!("{:.1}", v / scale))
}

fn values(metrics: &MetricSet, kind: MetricKind) -> Vec<f64> {
    metrics.get(kind).iter().map(|p| p.value).collect()
}

/// Render the fixed-format summary of 7-day and 30-day averages
#[must_use]
pub fn build_metric_summary(metrics: &MetricSet) -> String {
    let mut lines = Vec::with_capacity(10);

    let sleep = values(metrics, MetricKind::SleepDuration);
    lines.push(format!(
        "Sleep duration: 7d avg {}h, 30d avg {}h",
        fmt_avg(&sleep, 7, units::SECONDS_PER_HOUR),
        fmt_avg(&sleep, 30, units::SECONDS_PER_HOUR),
    ));

    let score = values(metrics, MetricKind::SleepScore);
    lines.push(format!(
        "Sleep score: 7d avg {}, 30d avg {}",
        fmt_avg(&score, 7, 1.0),
        fmt_avg(&score, 30, 1.0),
    ));

    let rhr = values(metrics, MetricKind::RestingHr);
    lines.push(format!(
        "Resting HR: 7d avg {} bpm, 30d avg {} bpm",
        fmt_avg(&rhr, 7, 1.0),
        fmt_avg(&rhr, 30, 1.0),
    ));

    let hrv = values(metrics, MetricKind::Hrv);
    lines.push(format!(
        "HRV: 7d avg {} ms, 30d avg {} ms",
        fmt_avg(&hrv, 7, 1.0),
        fmt_avg(&hrv, 30, 1.0),
    ));

    let battery = values(metrics, MetricKind::BodyBattery);
    lines.push(format!(
        "Body Battery highest: 7d avg {}, 30d avg {}",
        fmt_avg(&battery, 7, 1.0),
        fmt_avg(&battery, 30, 1.0),
    ));

    let stress = values(metrics, MetricKind::Stress);
    lines.push(format!(
        "Stress: 7d avg {}, 30d avg {}",
        fmt_avg(&stress, 7, 1.0),
        fmt_avg(&stress, 30, 1.0),
    ));

    let vo2 = values(metrics, MetricKind::Vo2Max);
    lines.push(format!(
        "VO2 Max: {}",
        vo2.last()
            .map_or_else(|| "N/A".to_owned(), |v| format!("{v:.1}")),
    ));

    let weight = values(metrics, MetricKind::Weight);
    lines.push(format!(
        "Weight: latest {} kg, 30d avg {} kg",
        weight.last().map_or_else(
            || "N/A".to_owned(),
            |v| format!("{:.1}", v / units::GRAMS_PER_KILOGRAM)
        ),
        fmt_avg(&weight, 30, units::GRAMS_PER_KILOGRAM),
    ));

    let steps = values(metrics, MetricKind::Steps);
    lines.push(format!(
        "Steps: 7d avg {}, 30d avg {}",
        fmt_avg(&steps, 7, 1.0),
        fmt_avg(&steps, 30, 1.0),
    ));

    let load = values(metrics, MetricKind::TrainingLoad);
    lines.push(format!(
        "Training load: 7d avg {}, 30d avg {}",
        fmt_avg(&load, 7, 1.0),
        fmt_avg(&load, 30, 1.0),
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vitalforge_core::models::MetricPoint;

    #[test]
    fn summary_has_fixed_line_structure_with_unit_conversions() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut metrics = MetricSet::new(today);
        metrics.insert(
            MetricKind::SleepDuration,
            vec![MetricPoint::new(today, 27_000.0)],
        );
        metrics.insert(
            MetricKind::Weight,
            vec![MetricPoint::new(today, 81_200.0)],
        );

        let summary = build_metric_summary(&metrics);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 10);
        // Sleep reported in hours, weight in kilograms, absent metrics as N/A
        assert_eq!(lines[0], "Sleep duration: 7d avg 7.5h, 30d avg 7.5h");
        assert_eq!(lines[7], "Weight: latest 81.2 kg, 30d avg 81.2 kg");
        assert_eq!(lines[2], "Resting HR: 7d avg N/A bpm, 30d avg N/A bpm");
    }
}
