// ABOUTME: Metric time-series endpoint with a 7-day moving average per point
// ABOUTME: Unknown metric names are rejected with the list of valid names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vitalforge_core::models::MetricKind;
use vitalforge_core::{AppError, AppResult};
use vitalforge_intelligence::stats::moving_average;

use super::AppState;

/// Default lookback for the series endpoint
const DEFAULT_DAYS: u32 = 30;

/// Window of the trailing moving average
const MOVING_AVG_WINDOW: usize = 7;

/// Query parameters for the series endpoint
#[derive(Debug, Deserialize)]
pub struct MetricQuery {
    /// Lookback window in days (1..=365)
    pub days: Option<u32>,
}

/// One day in the response, value plus its smoothed companion
#[derive(Debug, Serialize)]
pub struct MetricDataPoint {
    /// Calendar day
    pub date: chrono::NaiveDate,
    /// Raw daily value
    pub value: f64,
    /// Trailing 7-day moving average, rounded for display
    pub moving_avg_7d: f64,
}

/// Series response
#[derive(Debug, Serialize)]
pub struct MetricSeriesResponse {
    /// Metric wire name
    pub metric: String,
    /// Lookback actually used
    pub days: u32,
    /// Number of points
    pub count: usize,
    /// Daily points ascending by date
    pub data: Vec<MetricDataPoint>,
}

/// `GET /api/metrics/{metric}?days=`
pub async fn metric_series(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    Query(query): Query<MetricQuery>,
) -> AppResult<Json<MetricSeriesResponse>> {
    let Some(kind) = MetricKind::from_name(&metric) else {
        let valid = MetricKind::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::invalid_input(format!(
            "Unknown metric '{metric}'. Valid: {valid}"
        )));
    };

    let days = query.days.unwrap_or(DEFAULT_DAYS).clamp(1, 365);
    let series = state.database.read_metric_series(kind, days).await?;

    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let smoothed = moving_average(&values, MOVING_AVG_WINDOW);

    let data = series
        .iter()
        .zip(smoothed)
        .map(|(point, avg)| MetricDataPoint {
            date: point.date,
            value: point.value,
            moving_avg_7d: (avg * 100.0).round() / 100.0,
        })
        .collect::<Vec<_>>();

    Ok(Json(MetricSeriesResponse {
        metric,
        days,
        count: data.len(),
        data,
    }))
}
