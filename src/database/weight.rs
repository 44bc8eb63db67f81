// ABOUTME: Manual weight log persistence for the weight entry endpoint
// ABOUTME: Append-only log, separate from the synced weight_history table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use vitalforge_core::{AppError, AppResult};

use super::Database;

/// One manually logged weight measurement
#[derive(Debug, Clone)]
pub struct WeightLogEntry {
    /// Weight in pounds
    pub weight_lbs: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Weight in grams, the canonical unit
    pub weight_grams: i64,
    /// When the measurement was taken
    pub timestamp: DateTime<Utc>,
    /// Whether the upload to Garmin succeeded
    pub synced_to_garmin: bool,
}

impl Database {
    /// Append a manual weight measurement to the log
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn insert_weight_log(&self, entry: &WeightLogEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO weight_log (weight_lbs, weight_kg, weight_grams, timestamp, synced_to_garmin)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(entry.weight_lbs)
        .bind(entry.weight_kg)
        .bind(entry.weight_grams)
        .bind(entry.timestamp)
        .bind(i64::from(entry.synced_to_garmin))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert weight log: {e}")))?;
        Ok(())
    }

    /// Most recent manual weight entries, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_weight_logs(&self, limit: u32) -> AppResult<Vec<WeightLogRow>> {
        let rows = sqlx::query(
            r"
            SELECT id, weight_lbs, weight_kg, timestamp, synced_to_garmin
            FROM weight_log ORDER BY timestamp DESC LIMIT $1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list weight log: {e}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(WeightLogRow {
                    id: row
                        .try_get("id")
                        .map_err(|e| AppError::database(format!("Bad weight log row: {e}")))?,
                    weight_lbs: row
                        .try_get("weight_lbs")
                        .map_err(|e| AppError::database(format!("Bad weight log row: {e}")))?,
                    weight_kg: row
                        .try_get("weight_kg")
                        .map_err(|e| AppError::database(format!("Bad weight log row: {e}")))?,
                    timestamp: row
                        .try_get("timestamp")
                        .map_err(|e| AppError::database(format!("Bad weight log row: {e}")))?,
                    synced_to_garmin: row
                        .try_get::<i64, _>("synced_to_garmin")
                        .map_err(|e| AppError::database(format!("Bad weight log row: {e}")))?
                        != 0,
                })
            })
            .collect()
    }

    /// Delete one manual weight entry, `false` when the id is unknown
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_weight_log(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM weight_log WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete weight log: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

/// A persisted manual weight entry as served by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogRow {
    /// Row id
    pub id: i64,
    /// Weight in pounds
    pub weight_lbs: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// When the measurement was taken
    pub timestamp: DateTime<Utc>,
    /// Whether the Garmin upload succeeded
    pub synced_to_garmin: bool,
}
