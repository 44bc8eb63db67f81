// ABOUTME: Wearable data provider implementations for the VitalForge platform
// ABOUTME: Defines the WearableClient contract and the Garmin Connect implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! # VitalForge Providers
//!
//! The wearable vendor boundary. A [`WearableClient`] pulls raw per-day
//! payloads; the [`parsers`] module turns those dynamic payloads into small
//! strongly-typed records, mapping unknown or missing keys to "no data"
//! rather than errors. Pull failures are logged and surface as `None` so the
//! sync engine can treat them as absence and keep going.

pub mod garmin;
pub mod parsers;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use vitalforge_core::AppResult;

pub use garmin::{GarminClient, GarminConfig};

/// Per-day pull operations against a wearable vendor.
///
/// Every pull either returns the raw payload or `None`; a pull never fails
/// into the caller. Only [`authenticate`](WearableClient::authenticate) and
/// [`push_weight`](WearableClient::push_weight) report errors, because their
/// callers need to know.
#[async_trait]
pub trait WearableClient: Send + Sync {
    /// Establish or resume a session with the vendor
    ///
    /// # Errors
    ///
    /// Returns an error if neither saved tokens nor credentials produce a
    /// usable session.
    async fn authenticate(&self) -> AppResult<()>;

    /// Daily sleep payload
    async fn sleep(&self, date: NaiveDate) -> Option<Value>;

    /// Daily user summary payload (steps, calories, resting HR)
    async fn daily_summary(&self, date: NaiveDate) -> Option<Value>;

    /// Daily HRV payload
    async fn hrv(&self, date: NaiveDate) -> Option<Value>;

    /// Daily body battery report payload
    async fn body_battery(&self, date: NaiveDate) -> Option<Value>;

    /// Daily stress payload
    async fn stress(&self, date: NaiveDate) -> Option<Value>;

    /// Training status payload (VO2 max and training load)
    async fn training_status(&self, date: NaiveDate) -> Option<Value>;

    /// Weight history payload for a date range
    async fn weight_range(&self, start: NaiveDate, end: NaiveDate) -> Option<Value>;

    /// Upload a weight measurement to the vendor
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is rejected or the vendor is
    /// unreachable.
    async fn push_weight(&self, weight_grams: f64, timestamp: DateTime<Utc>) -> AppResult<()>;
}
