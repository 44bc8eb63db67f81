// ABOUTME: Recommendation endpoints: the full pipeline and the rules-only view
// ABOUTME: refresh=true forces a recompute past the cache freshness check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use vitalforge_core::models::{FindingsReport, RecommendationReport};
use vitalforge_core::AppResult;

use super::AppState;

/// Query parameters for the recommendations endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Force a recompute even when the cache is fresh
    #[serde(default)]
    pub refresh: bool,
}

/// `GET /api/recommendations?refresh=`
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationReport>> {
    let report = state.recommendations.get_recommendations(query.refresh).await?;
    Ok(Json(report))
}

/// `GET /api/recommendations/rules-only`
pub async fn rules_only(State(state): State<AppState>) -> AppResult<Json<FindingsReport>> {
    let report = state.recommendations.get_rules_only().await?;
    Ok(Json(report))
}
