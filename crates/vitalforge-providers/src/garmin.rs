// ABOUTME: Garmin Connect client with token-store resume and per-day wellness pulls
// ABOUTME: Pull failures are logged and mapped to None, never surfaced to the sync caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Garmin Connect implementation of [`WearableClient`].
//!
//! Session handling follows the token-store pattern: a previously saved
//! OAuth token is resumed from disk when present, otherwise a fresh
//! credential login is performed and the new token persisted. The wellness
//! endpoints are the same ones the Connect web app calls.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use vitalforge_core::{AppError, AppResult};

use super::WearableClient;

/// Default Garmin Connect API base URL
const DEFAULT_API_BASE_URL: &str = "https://connectapi.garmin.com";

/// File inside the token directory holding the persisted session token
const TOKEN_FILE: &str = "oauth_token.json";

/// Garmin Connect connection settings
#[derive(Debug, Clone)]
pub struct GarminConfig {
    /// API base URL, overridable for testing
    pub api_base_url: String,
    /// Directory the session token is persisted in
    pub token_dir: PathBuf,
    /// Account email for fresh logins
    pub email: Option<String>,
    /// Account password for fresh logins
    pub password: Option<String>,
}

impl GarminConfig {
    /// Create a config with the production base URL
    #[must_use]
    pub fn new(token_dir: PathBuf, email: Option<String>, password: Option<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_dir,
            email,
            password,
        }
    }
}

/// Persisted session token
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionToken {
    access_token: String,
}

/// Garmin Connect provider implementation
pub struct GarminClient {
    config: GarminConfig,
    token: RwLock<Option<SessionToken>>,
    client: Client,
}

impl GarminClient {
    /// Create a new client; no network traffic until `authenticate`
    #[must_use]
    pub fn new(config: GarminConfig) -> Self {
        Self {
            config,
            token: RwLock::new(None),
            client: Client::new(),
        }
    }

    fn token_path(&self) -> PathBuf {
        self.config.token_dir.join(TOKEN_FILE)
    }

    /// Resume a saved session token from the token store
    async fn resume_session(&self) -> Option<SessionToken> {
        let raw = tokio::fs::read(self.token_path()).await.ok()?;
        let token: SessionToken = serde_json::from_slice(&raw).ok()?;
        debug!("resumed Garmin session from saved tokens");
        Some(token)
    }

    /// Persist the session token so the next start can resume it
    async fn save_session(&self, token: &SessionToken) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.config.token_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create token dir: {e}")))?;
        let raw = serde_json::to_vec(token)?;
        tokio::fs::write(self.token_path(), raw)
            .await
            .map_err(|e| AppError::internal(format!("Failed to save Garmin token: {e}")))?;
        info!(dir = %self.config.token_dir.display(), "Garmin tokens saved");
        Ok(())
    }

    /// Fresh credential login against the token exchange endpoint
    async fn login(&self) -> AppResult<SessionToken> {
        let (Some(email), Some(password)) = (&self.config.email, &self.config.password) else {
            return Err(AppError::config(
                "GARMIN_EMAIL / GARMIN_PASSWORD not set and no saved session to resume",
            ));
        };

        info!(email = %email, "performing fresh Garmin login");
        let response = self
            .client
            .post(format!(
                "{}/oauth-service/oauth/exchange/user/2.0",
                self.config.api_base_url
            ))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                AppError::external_auth("Garmin", format!("login request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_auth(
                "Garmin",
                format!("login rejected with status {status}"),
            ));
        }

        response
            .json::<SessionToken>()
            .await
            .map_err(|e| AppError::external_auth("Garmin", format!("malformed login reply: {e}")))
    }

    /// GET an authenticated API endpoint, returning the raw JSON payload.
    /// Any failure is logged and collapses to `None`.
    async fn pull(&self, what: &str, endpoint: &str) -> Option<Value> {
        let access_token = {
            let guard = self.token.read().await;
            match guard.as_ref() {
                Some(token) => token.access_token.clone(),
                None => {
                    warn!("Failed to get {what}: not authenticated");
                    return None;
                }
            }
        };

        let url = format!("{}/{endpoint}", self.config.api_base_url);
        let result = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to get {what}: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Failed to get {what}: status {}", response.status());
            return None;
        }

        match response.json::<Value>().await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("Failed to get {what}: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl WearableClient for GarminClient {
    async fn authenticate(&self) -> AppResult<()> {
        // Saved tokens first, fresh login only when resuming fails
        let token = match self.resume_session().await {
            Some(token) => token,
            None => self.login().await?,
        };

        // Re-save to keep the store fresh; losing the write is not fatal
        if let Err(e) = self.save_session(&token).await {
            warn!("could not persist Garmin token: {e}");
        }

        *self.token.write().await = Some(token);
        Ok(())
    }

    async fn sleep(&self, date: NaiveDate) -> Option<Value> {
        self.pull(
            "sleep data",
            &format!("wellness-service/wellness/dailySleepData?date={date}"),
        )
        .await
    }

    async fn daily_summary(&self, date: NaiveDate) -> Option<Value> {
        self.pull(
            "user summary",
            &format!("usersummary-service/usersummary/daily?calendarDate={date}"),
        )
        .await
    }

    async fn hrv(&self, date: NaiveDate) -> Option<Value> {
        self.pull("HRV data", &format!("hrv-service/hrv/{date}")).await
    }

    async fn body_battery(&self, date: NaiveDate) -> Option<Value> {
        self.pull(
            "body battery",
            &format!(
                "wellness-service/wellness/bodyBattery/reports/daily?startDate={date}&endDate={date}"
            ),
        )
        .await
    }

    async fn stress(&self, date: NaiveDate) -> Option<Value> {
        self.pull(
            "stress data",
            &format!("wellness-service/wellness/dailyStress/{date}"),
        )
        .await
    }

    async fn training_status(&self, date: NaiveDate) -> Option<Value> {
        self.pull(
            "training status",
            &format!("metrics-service/metrics/trainingstatus/aggregated/{date}"),
        )
        .await
    }

    async fn weight_range(&self, start: NaiveDate, end: NaiveDate) -> Option<Value> {
        self.pull(
            "weight range",
            &format!("weight-service/weight/range/{start}/{end}?includeAll=true"),
        )
        .await
    }

    async fn push_weight(&self, weight_grams: f64, timestamp: DateTime<Utc>) -> AppResult<()> {
        let access_token = {
            let guard = self.token.read().await;
            guard
                .as_ref()
                .map(|t| t.access_token.clone())
                .ok_or_else(|| AppError::external_auth("Garmin", "not authenticated"))?
        };

        let weight_kg = weight_grams / 1000.0;
        info!(
            weight_kg = format!("{weight_kg:.1}"),
            weight_grams = format!("{weight_grams:.0}"),
            "pushing weight to Garmin"
        );

        let response = self
            .client
            .post(format!("{}/weight-service/user-weight", self.config.api_base_url))
            .bearer_auth(access_token)
            .json(&json!({
                "value": weight_kg,
                "unitKey": "kg",
                "date": timestamp.format("%Y-%m-%d").to_string(),
                "gmtTimestamp": timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            }))
            .send()
            .await
            .map_err(|e| AppError::external_service("Garmin", format!("weight upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                "Garmin",
                format!("weight upload rejected with status {status}"),
            ));
        }

        info!("weight pushed to Garmin successfully");
        Ok(())
    }
}
