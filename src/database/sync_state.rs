// ABOUTME: Sync bookkeeping: which dates each metric table already holds
// ABOUTME: Plus the singleton row recording the last sync outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use std::collections::HashSet;
use vitalforge_core::{AppError, AppResult};

use super::Database;

/// Metric tables the incremental sync tracks for completeness
pub const METRIC_TABLES: [&str; 9] = [
    "sleep",
    "resting_hr",
    "hrv",
    "body_battery",
    "stress",
    "vo2max",
    "training_load",
    "steps",
    "active_calories",
];

/// Outcome of the most recent sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    /// When the sync started
    pub last_sync_time: Option<DateTime<Utc>>,
    /// `success` or `completed with N errors`
    pub last_sync_result: Option<String>,
    /// How many days the sync covered
    pub last_sync_days: Option<i64>,
}

impl Database {
    /// Dates already stored in a metric table.
    ///
    /// `table` must be one of [`METRIC_TABLES`]; this is an internal contract,
    /// not caller input.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn synced_dates(&self, table: &str) -> AppResult<HashSet<NaiveDate>> {
        let sql = format!("SELECT date FROM {table}");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list {table} dates: {e}")))?;

        let mut dates = HashSet::with_capacity(rows.len());
        for row in rows {
            let date: NaiveDate = row
                .try_get("date")
                .map_err(|e| AppError::database(format!("Bad date in {table}: {e}")))?;
            dates.insert(date);
        }
        Ok(dates)
    }

    /// Record the outcome of a sync pass in the singleton status row
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn record_sync_status(
        &self,
        started_at: DateTime<Utc>,
        result: &str,
        days: u32,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO sync_status (id, last_sync_time, last_sync_result, last_sync_days)
            VALUES (1, $1, $2, $3)
            ",
        )
        .bind(started_at)
        .bind(result)
        .bind(i64::from(days))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record sync status: {e}")))?;
        Ok(())
    }

    /// Last sync outcome, `None` before the first sync ever runs
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn sync_status(&self) -> AppResult<Option<SyncStatus>> {
        let row = sqlx::query(
            "SELECT last_sync_time, last_sync_result, last_sync_days FROM sync_status WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read sync status: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(SyncStatus {
            last_sync_time: row
                .try_get("last_sync_time")
                .map_err(|e| AppError::database(format!("Bad sync status row: {e}")))?,
            last_sync_result: row
                .try_get("last_sync_result")
                .map_err(|e| AppError::database(format!("Bad sync status row: {e}")))?,
            last_sync_days: row
                .try_get("last_sync_days")
                .map_err(|e| AppError::database(format!("Bad sync status row: {e}")))?,
        }))
    }
}
