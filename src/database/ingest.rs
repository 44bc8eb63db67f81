// ABOUTME: Upserts of parsed wearable records into the per-metric tables
// ABOUTME: INSERT OR REPLACE keyed by date so re-syncing a day is idempotent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use chrono::NaiveDate;
use vitalforge_core::{AppError, AppResult};
use vitalforge_providers::parsers::{
    BodyBatteryRecord, HrvRecord, SleepRecord, StressRecord, TrainingLoadRecord, Vo2MaxRecord,
    WeightEntry,
};

use super::Database;

impl Database {
    /// Upsert a night of sleep
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_sleep(&self, date: NaiveDate, record: &SleepRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO sleep (
                date, duration_seconds, deep_seconds, light_seconds, rem_seconds,
                awake_seconds, sleep_score, avg_spo2, avg_respiration
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(date)
        .bind(record.duration_seconds)
        .bind(record.deep_seconds)
        .bind(record.light_seconds)
        .bind(record.rem_seconds)
        .bind(record.awake_seconds)
        .bind(record.sleep_score)
        .bind(record.avg_spo2)
        .bind(record.avg_respiration)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert sleep: {e}")))?;
        Ok(())
    }

    /// Upsert a resting heart rate
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_resting_hr(&self, date: NaiveDate, value: i64) -> AppResult<()> {
        self.upsert_single_value("resting_hr", date, value).await
    }

    /// Upsert a daily step count
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_steps(&self, date: NaiveDate, value: i64) -> AppResult<()> {
        self.upsert_single_value("steps", date, value).await
    }

    /// Upsert daily active calories
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_active_calories(&self, date: NaiveDate, value: i64) -> AppResult<()> {
        self.upsert_single_value("active_calories", date, value).await
    }

    async fn upsert_single_value(&self, table: &str, date: NaiveDate, value: i64) -> AppResult<()> {
        let sql = format!("INSERT OR REPLACE INTO {table} (date, value) VALUES ($1, $2)");
        sqlx::query(&sql)
            .bind(date)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to upsert {table}: {e}")))?;
        Ok(())
    }

    /// Upsert a night of HRV
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_hrv(&self, date: NaiveDate, record: &HrvRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO hrv (
                date, last_night_avg, last_night_5min_high, weekly_avg, status
            ) VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(date)
        .bind(record.last_night_avg)
        .bind(record.last_night_5min_high)
        .bind(record.weekly_avg)
        .bind(record.status.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert hrv: {e}")))?;
        Ok(())
    }

    /// Upsert a day of body battery
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_body_battery(
        &self,
        date: NaiveDate,
        record: &BodyBatteryRecord,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO body_battery (
                date, charged, drained, highest, lowest
            ) VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(date)
        .bind(record.charged)
        .bind(record.drained)
        .bind(record.highest)
        .bind(record.lowest)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert body_battery: {e}")))?;
        Ok(())
    }

    /// Upsert a day of stress
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_stress(&self, date: NaiveDate, record: &StressRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO stress (
                date, avg_level, max_level, rest_duration,
                low_duration, medium_duration, high_duration
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(date)
        .bind(record.avg_level)
        .bind(record.max_level)
        .bind(record.rest_duration)
        .bind(record.low_duration)
        .bind(record.medium_duration)
        .bind(record.high_duration)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert stress: {e}")))?;
        Ok(())
    }

    /// Upsert a VO2 max estimate
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_vo2max(&self, date: NaiveDate, record: &Vo2MaxRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO vo2max (date, vo2max_value, fitness_age)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(date)
        .bind(record.value)
        .bind(record.fitness_age)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert vo2max: {e}")))?;
        Ok(())
    }

    /// Upsert a day of training load
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_training_load(
        &self,
        date: NaiveDate,
        record: &TrainingLoadRecord,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO training_load (date, acute_load, chronic_load, load_ratio)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(date)
        .bind(record.acute_load)
        .bind(record.chronic_load)
        .bind(record.load_ratio)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert training_load: {e}")))?;
        Ok(())
    }

    /// Upsert a day of weight history
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_weight_history(&self, entry: &WeightEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO weight_history (date, weight_grams, bmi, body_fat)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(entry.date)
        .bind(entry.weight_grams)
        .bind(entry.bmi)
        .bind(entry.body_fat)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert weight_history: {e}")))?;
        Ok(())
    }
}
