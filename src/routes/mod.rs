// ABOUTME: HTTP API router and shared application state
// ABOUTME: Thin layer over the sync engine, metric store, and recommendation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! The REST surface.
//!
//! Handlers validate input and delegate; everything inside the analysis
//! pipeline is designed to always produce a result, so caller-facing errors
//! exist only at this boundary (bad metric name, bad weight unit).

/// Metric time-series endpoint
pub mod metrics;
/// Recommendation endpoints
pub mod recommendations;
/// Sync trigger and status endpoints
pub mod sync;
/// Manual weight logging endpoints
pub mod weight;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use vitalforge_providers::WearableClient;

use crate::database::Database;
use crate::intelligence::advisor::RecommendationService;
use crate::sync::SyncEngine;

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    /// Metric store
    pub database: Arc<Database>,
    /// Recommendation pipeline
    pub recommendations: Arc<RecommendationService>,
    /// Ingestion engine
    pub sync: Arc<SyncEngine>,
    /// Wearable client for weight uploads
    pub wearable: Arc<dyn WearableClient>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sync", post(sync::trigger_sync))
        .route("/api/sync/status", get(sync::sync_status))
        .route("/api/metrics/:metric", get(metrics::metric_series))
        .route("/api/recommendations", get(recommendations::recommendations))
        .route(
            "/api/recommendations/rules-only",
            get(recommendations::rules_only),
        )
        .route("/api/weight", post(weight::log_weight))
        .route("/api/weight/recent", get(weight::recent_weights))
        .route("/api/weight/:id", delete(weight::delete_weight))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "vitalforge" }))
}
