// ABOUTME: Metric series reads implementing the MetricStore accessor contract
// ABOUTME: Null values are filtered and rows come back ascending by date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use sqlx::Row;
use vitalforge_core::models::{MetricKind, MetricPoint, MetricSeries};
use vitalforge_core::{AppError, AppResult};
use vitalforge_intelligence::MetricStore;

use super::Database;

impl Database {
    /// Read one metric's daily series over the lookback window ending today.
    ///
    /// Table and column names come from the static [`MetricKind`] mapping,
    /// never from caller input.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub async fn read_metric_series(
        &self,
        kind: MetricKind,
        lookback_days: u32,
    ) -> AppResult<MetricSeries> {
        let cutoff = Utc::now()
            .date_naive()
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);

        let sql = format!(
            "SELECT date, CAST({column} AS REAL) AS value FROM {table} \
             WHERE date >= $1 AND {column} IS NOT NULL ORDER BY date ASC",
            table = kind.table(),
            column = kind.column(),
        );

        let rows = sqlx::query(&sql)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read {kind} series: {e}")))?;

        let mut series = MetricSeries::with_capacity(rows.len());
        for row in rows {
            let date: NaiveDate = row
                .try_get("date")
                .map_err(|e| AppError::database(format!("Bad date in {kind} row: {e}")))?;
            let value: f64 = row
                .try_get("value")
                .map_err(|e| AppError::database(format!("Bad value in {kind} row: {e}")))?;
            series.push(MetricPoint::new(date, value));
        }
        Ok(series)
    }
}

#[async_trait]
impl MetricStore for Database {
    async fn read(&self, kind: MetricKind, lookback_days: u32) -> AppResult<MetricSeries> {
        self.read_metric_series(kind, lookback_days).await
    }
}
