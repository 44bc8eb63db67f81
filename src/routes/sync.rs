// ABOUTME: Manual sync trigger and sync status endpoints
// ABOUTME: The trigger spawns a background pass; the advisory lock refuses overlap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;
use vitalforge_core::AppResult;

use super::AppState;

/// Default days for a manual sync
const DEFAULT_SYNC_DAYS: u32 = 7;

/// Query parameters for the sync trigger
#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    /// How many days back to sync (1..=90)
    pub days: Option<u32>,
}

/// Sync status response
#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    /// When the last sync started
    pub last_sync_time: Option<chrono::DateTime<chrono::Utc>>,
    /// Outcome of the last sync, `never` before the first one
    pub last_sync_result: String,
    /// Days the last sync covered
    pub last_sync_days: Option<i64>,
    /// Whether a sync is running right now
    pub syncing: bool,
}

/// `POST /api/sync?days=` - spawn a background sync pass
pub async fn trigger_sync(
    State(state): State<AppState>,
    Query(query): Query<SyncQuery>,
) -> Json<Value> {
    let days = query.days.unwrap_or(DEFAULT_SYNC_DAYS).clamp(1, 90);

    if state.sync.is_running() {
        return Json(json!({
            "status": "already_running",
            "message": "A sync is already in progress",
        }));
    }

    let engine = state.sync.clone();
    tokio::spawn(async move {
        if let Err(e) = engine.run_sync(days).await {
            error!("manual sync failed: {e}");
        }
    });

    Json(json!({ "status": "started", "days": days }))
}

/// `GET /api/sync/status`
pub async fn sync_status(State(state): State<AppState>) -> AppResult<Json<SyncStatusResponse>> {
    let status = state.database.sync_status().await?;
    let syncing = state.sync.is_running();

    let response = status.map_or_else(
        || SyncStatusResponse {
            last_sync_time: None,
            last_sync_result: "never".to_owned(),
            last_sync_days: None,
            syncing,
        },
        |row| SyncStatusResponse {
            last_sync_time: row.last_sync_time,
            last_sync_result: row.last_sync_result.unwrap_or_else(|| "never".to_owned()),
            last_sync_days: row.last_sync_days,
            syncing,
        },
    );

    Ok(Json(response))
}
