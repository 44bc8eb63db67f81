// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Database path, HTTP bind, Garmin credentials, LLM endpoint, sync cadence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Environment-only configuration.
//!
//! Every setting has an explicit default so the server starts with nothing
//! but a writable data directory. Missing Garmin credentials disable fresh
//! logins (saved tokens can still resume); missing LLM settings are a valid
//! state that routes the narrative layer to its deterministic fallback.

use std::env;
use std::path::PathBuf;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default SQLite database path
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fitness.db";

/// Default Garmin token directory
const DEFAULT_TOKEN_DIR: &str = "./data/.garth";

/// Default hours between scheduled syncs
const DEFAULT_SYNC_INTERVAL_HOURS: u64 = 2;

/// Default days backfilled on first start
const DEFAULT_BACKFILL_DAYS: u32 = 90;

/// Days refreshed by each scheduled sync after the backfill
const DEFAULT_REFRESH_DAYS: u32 = 3;

/// Garmin Connect account settings
#[derive(Debug, Clone)]
pub struct GarminSettings {
    /// Account email, `GARMIN_EMAIL`
    pub email: Option<String>,
    /// Account password, `GARMIN_PASSWORD`
    pub password: Option<String>,
    /// Token store directory, `GARTH_TOKEN_DIR`
    pub token_dir: PathBuf,
}

/// Language-model endpoint settings.
///
/// Absence of both key and base URL is a valid configuration state, not an
/// error; the narrative layer then always uses its rules-derived fallback.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// API key, `ANTHROPIC_API_KEY`
    pub api_key: Option<String>,
    /// Base URL override for proxies, `ANTHROPIC_BASE_URL`
    pub base_url: Option<String>,
}

impl LlmSettings {
    /// Whether any endpoint is configured at all
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.base_url.is_some()
    }
}

/// Background sync cadence
#[derive(Debug, Clone, Copy)]
pub struct SyncSettings {
    /// Hours between scheduled syncs, `SYNC_INTERVAL_HOURS`
    pub interval_hours: u64,
    /// Days backfilled on first start
    pub backfill_days: u32,
    /// Days refreshed by each scheduled sync
    pub refresh_days: u32,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port, `HTTP_PORT`
    pub http_port: u16,
    /// SQLite database URL, `DATABASE_URL`
    pub database_url: String,
    /// Garmin account settings
    pub garmin: GarminSettings,
    /// Language-model settings
    pub llm: LlmSettings,
    /// Sync cadence
    pub sync: SyncSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        let http_port = env::var("HTTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let garmin = GarminSettings {
            email: env::var("GARMIN_EMAIL").ok(),
            password: env::var("GARMIN_PASSWORD").ok(),
            token_dir: env::var("GARTH_TOKEN_DIR")
                .map_or_else(|_| PathBuf::from(DEFAULT_TOKEN_DIR), PathBuf::from),
        };

        let llm = LlmSettings {
            api_key: env::var("ANTHROPIC_API_KEY").ok(),
            base_url: env::var("ANTHROPIC_BASE_URL").ok(),
        };

        let sync = SyncSettings {
            interval_hours: env::var("SYNC_INTERVAL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SYNC_INTERVAL_HOURS),
            backfill_days: DEFAULT_BACKFILL_DAYS,
            refresh_days: DEFAULT_REFRESH_DAYS,
        };

        Self {
            http_port,
            database_url,
            garmin,
            llm,
            sync,
        }
    }
}
