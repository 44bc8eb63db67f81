// ABOUTME: Garmin ingestion engine: per-day metric pulls, upserts, and scheduling
// ABOUTME: Serialized by an advisory lock; per-unit failures are logged and skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! The ingestion side of the platform.
//!
//! A sync pass walks the requested window newest-first, pulls every wellness
//! payload for each day, parses it into typed records, and upserts what
//! parsed. Dates already present in all metric tables are skipped, except
//! today, which is always refreshed. A single advisory lock serializes
//! passes; the recommendation pipeline has no such restriction and may read
//! a partially-updated store, by contract.

use chrono::{Days, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use vitalforge_core::{AppError, AppResult};
use vitalforge_providers::parsers;
use vitalforge_providers::WearableClient;

use crate::database::{Database, METRIC_TABLES};

/// Garmin-to-store ingestion engine
pub struct SyncEngine {
    database: Arc<Database>,
    client: Arc<dyn WearableClient>,
    lock: Mutex<()>,
}

impl SyncEngine {
    /// Create an engine over a store and a wearable client
    #[must_use]
    pub fn new(database: Arc<Database>, client: Arc<dyn WearableClient>) -> Self {
        Self {
            database,
            client,
            lock: Mutex::new(()),
        }
    }

    /// Whether a sync pass currently holds the advisory lock
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock.try_lock().is_err()
    }

    /// Run a full sync for the given number of days back from today.
    ///
    /// Returns a human-readable result summary, also recorded in the
    /// sync-status row.
    ///
    /// # Errors
    ///
    /// Returns an error when another pass holds the lock, when
    /// authentication fails outright, or when status bookkeeping fails.
    /// Per-date failures are counted and logged, never propagated.
    pub async fn run_sync(&self, days: u32) -> AppResult<String> {
        let Ok(_guard) = self.lock.try_lock() else {
            return Err(AppError::locked("A sync is already in progress"));
        };

        info!(days, "starting sync");
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut errors = 0u32;

        self.client.authenticate().await?;

        let today = started_at.date_naive();
        let dates: Vec<NaiveDate> = (0..days)
            .filter_map(|i| today.checked_sub_days(Days::new(u64::from(i))))
            .collect();

        // Incremental: skip dates every table already has, except today
        let mut existing: HashMap<&str, HashSet<NaiveDate>> = HashMap::new();
        for table in METRIC_TABLES {
            existing.insert(table, self.database.synced_dates(table).await?);
        }

        for date in dates {
            if date != today {
                let all_present = METRIC_TABLES
                    .iter()
                    .all(|table| existing.get(table).is_some_and(|set| set.contains(&date)));
                if all_present {
                    continue;
                }
            }

            if let Err(e) = self.sync_date(date).await {
                error!(%date, "error syncing date: {e}");
                errors += 1;
            }
        }

        // Weight history arrives as a range, not per-day
        if let Some(start) = today.checked_sub_days(Days::new(u64::from(days))) {
            if let Err(e) = self.sync_weight_history(start, today).await {
                error!("error syncing weight history: {e}");
                errors += 1;
            }
        }

        let result = if errors == 0 {
            "success".to_owned()
        } else {
            format!("completed with {errors} errors")
        };

        info!(
            elapsed_secs = format!("{:.1}", clock.elapsed().as_secs_f64()),
            result, "sync completed"
        );
        self.database
            .record_sync_status(started_at, &result, days)
            .await?;

        Ok(result)
    }

    /// Pull all metrics for a single date and store whatever parsed.
    ///
    /// Pull failures already collapsed to `None` inside the client; parse
    /// misses mean "no data for this day". Only storage failures error.
    async fn sync_date(&self, date: NaiveDate) -> AppResult<()> {
        if let Some(payload) = self.client.sleep(date).await {
            if let Some(record) = parsers::parse_sleep(&payload) {
                self.database.upsert_sleep(date, &record).await?;
            }
        }

        if let Some(payload) = self.client.daily_summary(date).await {
            if let Some(record) = parsers::parse_daily_summary(&payload) {
                if let Some(rhr) = record.resting_heart_rate {
                    self.database.upsert_resting_hr(date, rhr).await?;
                }
                if let Some(steps) = record.total_steps {
                    self.database.upsert_steps(date, steps).await?;
                }
                if let Some(calories) = record.active_kilocalories {
                    self.database.upsert_active_calories(date, calories).await?;
                }
            }
        }

        if let Some(payload) = self.client.hrv(date).await {
            if let Some(record) = parsers::parse_hrv(&payload) {
                self.database.upsert_hrv(date, &record).await?;
            }
        }

        if let Some(payload) = self.client.body_battery(date).await {
            if let Some(record) = parsers::parse_body_battery(&payload) {
                self.database.upsert_body_battery(date, &record).await?;
            }
        }

        if let Some(payload) = self.client.stress(date).await {
            if let Some(record) = parsers::parse_stress(&payload) {
                self.database.upsert_stress(date, &record).await?;
            }
        }

        if let Some(payload) = self.client.training_status(date).await {
            if let Some(record) = parsers::parse_training_status(&payload) {
                if let Some(vo2max) = record.vo2max {
                    self.database.upsert_vo2max(date, &vo2max).await?;
                }
                if let Some(load) = record.training_load {
                    self.database.upsert_training_load(date, &load).await?;
                }
            }
        }

        Ok(())
    }

    /// Pull weight history for a date range and upsert each day
    async fn sync_weight_history(&self, start: NaiveDate, end: NaiveDate) -> AppResult<()> {
        let Some(payload) = self.client.weight_range(start, end).await else {
            return Ok(());
        };

        for entry in parsers::parse_weight_range(&payload) {
            self.database.upsert_weight_history(&entry).await?;
        }
        Ok(())
    }

    /// Background loop: one backfill pass, then a short refresh every
    /// `interval_hours`. Runs until the task is dropped.
    pub async fn run_scheduled(&self, interval_hours: u64, backfill_days: u32, refresh_days: u32) {
        info!(backfill_days, "running initial backfill");
        if let Err(e) = self.run_sync(backfill_days).await {
            error!("initial backfill failed: {e}");
        }

        let interval = std::time::Duration::from_secs(interval_hours * 3600);
        loop {
            tokio::time::sleep(interval).await;
            info!("running scheduled sync");
            match self.run_sync(refresh_days).await {
                Ok(result) => info!(result, "scheduled sync finished"),
                Err(e) => warn!("scheduled sync failed: {e}"),
            }
        }
    }
}
