// ABOUTME: Metric store accessor contract consumed by the analysis pipeline
// ABOUTME: Concrete SQLite implementation lives in the main crate; tests inject fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use async_trait::async_trait;
use chrono::NaiveDate;
use vitalforge_core::models::{MetricKind, MetricSeries, MetricSet};
use vitalforge_core::AppResult;

/// Read access to persisted daily metric series.
///
/// Implementations return points ascending by date with null values already
/// excluded, at most one point per calendar day, restricted to the lookback
/// window ending today.
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Read one metric's series over the lookback window
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage read fails.
    async fn read(&self, kind: MetricKind, lookback_days: u32) -> AppResult<MetricSeries>;
}

/// Build the immutable metric set for one analysis pass by reading every
/// analysis metric over the same window.
///
/// # Errors
///
/// Returns an error if any metric read fails.
pub async fn fetch_metric_set(
    store: &dyn MetricStore,
    today: NaiveDate,
    lookback_days: u32,
) -> AppResult<MetricSet> {
    let mut set = MetricSet::new(today);
    for kind in MetricKind::ANALYSIS_METRICS {
        set.insert(kind, store.read(kind, lookback_days).await?);
    }
    Ok(set)
}
