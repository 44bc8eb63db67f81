// ABOUTME: Statistical primitives over ordered daily metric series
// ABOUTME: Averages, OLS trend slopes, consecutive-run counters, moving averages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Statistical building blocks for the rules engine.
//!
//! All functions operate on series already ordered ascending by date with
//! nulls removed. Short or empty input yields `None` (or an empty count),
//! never a panic or a division by zero. Points are treated as evenly spaced
//! by position; calendar gaps are not reweighted.

use vitalforge_core::models::MetricPoint;

/// Arithmetic mean, `None` for an empty slice
#[must_use]
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Values of the last `n` points, oldest first
#[must_use]
pub fn recent_values(series: &[MetricPoint], n: usize) -> Vec<f64> {
    let start = series.len().saturating_sub(n);
    series[start..].iter().map(|p| p.value).collect()
}

/// Ordinary-least-squares slope of value against index over the last
/// `window` points. Positive = increasing over time.
///
/// Requires at least 3 points. The denominator is the sum of squared index
/// deviations from the mean index, which is non-zero for n >= 3.
#[must_use]
pub fn trend_slope(series: &[MetricPoint], window: usize) -> Option<f64> {
    let start = series.len().saturating_sub(window);
    let pts = &series[start..];
    if pts.len() < 3 {
        return None;
    }

    let n = pts.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = pts.iter().map(|p| p.value).sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, point) in pts.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (point.value - y_mean);
        den += dx * dx;
    }

    (den != 0.0).then(|| num / den)
}

/// Count trailing points with `value < threshold`, scanning backward from
/// the most recent point within the last `window` points and stopping at the
/// first point that does not satisfy the predicate.
#[must_use]
pub fn consecutive_below(series: &[MetricPoint], threshold: f64, window: usize) -> usize {
    let start = series.len().saturating_sub(window);
    series[start..]
        .iter()
        .rev()
        .take_while(|p| p.value < threshold)
        .count()
}

/// Mirror of [`consecutive_below`] with `value > threshold`
#[must_use]
pub fn consecutive_above(series: &[MetricPoint], threshold: f64, window: usize) -> usize {
    let start = series.len().saturating_sub(window);
    series[start..]
        .iter()
        .rev()
        .take_while(|p| p.value > threshold)
        .count()
}

/// Trailing moving average with the window clamped at the series start,
/// one output value per input value.
#[must_use]
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Vec<MetricPoint> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| MetricPoint::new(start + chrono::Days::new(i as u64), v))
            .collect()
    }

    #[test]
    fn average_of_empty_is_none() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn average_of_values() {
        assert_eq!(average(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn trend_slope_recovers_exact_slope_of_linear_series() {
        // v[i] = 10 + 2.5 * i, slope must come back as 2.5 regardless of intercept
        let pts = series(&[10.0, 12.5, 15.0, 17.5, 20.0, 22.5]);
        let slope = trend_slope(&pts, 14).unwrap();
        assert!((slope - 2.5).abs() < 1e-9);

        let shifted = series(&[100.0, 102.5, 105.0, 107.5, 110.0, 112.5]);
        let slope = trend_slope(&shifted, 14).unwrap();
        assert!((slope - 2.5).abs() < 1e-9);
    }

    #[test]
    fn trend_slope_requires_three_points() {
        assert_eq!(trend_slope(&series(&[1.0, 2.0]), 14), None);
        assert_eq!(trend_slope(&[], 14), None);
    }

    #[test]
    fn trend_slope_uses_only_the_window() {
        // Flat tail after a steep start; window of 3 sees only the flat part
        let pts = series(&[0.0, 100.0, 50.0, 50.0, 50.0]);
        let slope = trend_slope(&pts, 3).unwrap();
        assert!(slope.abs() < 1e-9);
    }

    #[test]
    fn consecutive_below_counts_trailing_run() {
        // Last 3 below threshold, the point before them at the threshold
        let pts = series(&[80.0, 70.0, 60.0, 60.0, 60.0]);
        assert_eq!(consecutive_below(&pts, 70.0, 7), 3);
        assert_eq!(consecutive_below(&pts, 70.0, 2), 2);
    }

    #[test]
    fn consecutive_below_is_zero_when_latest_is_at_threshold() {
        let pts = series(&[60.0, 60.0, 70.0]);
        assert_eq!(consecutive_below(&pts, 70.0, 7), 0);
    }

    #[test]
    fn consecutive_below_full_window() {
        let pts = series(&[1.0; 10]);
        assert_eq!(consecutive_below(&pts, 2.0, 7), 7);
    }

    #[test]
    fn consecutive_above_counts_trailing_run() {
        let pts = series(&[40.0, 55.0, 60.0]);
        assert_eq!(consecutive_above(&pts, 50.0, 7), 2);
    }

    #[test]
    fn moving_average_clamps_at_series_start() {
        let avg = moving_average(&[2.0, 4.0, 6.0], 7);
        assert_eq!(avg, vec![2.0, 3.0, 4.0]);
    }
}
