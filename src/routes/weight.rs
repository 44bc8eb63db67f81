// ABOUTME: Manual weight logging: unit conversion, Garmin upload, local persistence
// ABOUTME: A failed upload is recorded, not fatal; the entry is kept either way
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;
use vitalforge_core::constants::units;
use vitalforge_core::{AppError, AppResult};
use vitalforge_providers::parsers::WeightEntry;

use super::AppState;
use crate::database::{WeightLogEntry, WeightLogRow};

/// Weight submission body
#[derive(Debug, Deserialize)]
pub struct WeightIn {
    /// Measured weight in the given unit
    pub weight: f64,
    /// `lbs` or `kg`
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "lbs".to_owned()
}

/// Weight submission response
#[derive(Debug, Serialize)]
pub struct WeightOut {
    /// Always true when the entry was stored
    pub success: bool,
    /// Weight in pounds, rounded for display
    pub weight_lbs: f64,
    /// Weight in kilograms, rounded for display
    pub weight_kg: f64,
    /// When the measurement was recorded
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Whether the Garmin upload succeeded
    pub synced_to_garmin: bool,
    /// Upload error message when the upload failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garmin_error: Option<String>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Convert a submitted weight into `(lbs, kg, grams)`
///
/// # Errors
///
/// Returns an error for an unknown unit or a non-positive weight.
pub fn normalize_weight(weight: f64, unit: &str) -> AppResult<(f64, f64, f64)> {
    let (weight_lbs, weight_kg) = match unit.to_lowercase().as_str() {
        "lbs" => (weight, weight / units::POUNDS_PER_KILOGRAM),
        "kg" => (weight * units::POUNDS_PER_KILOGRAM, weight),
        _ => return Err(AppError::invalid_input("unit must be 'lbs' or 'kg'")),
    };
    if !weight_lbs.is_finite() || weight_lbs <= 0.0 {
        return Err(AppError::invalid_input("weight must be a positive number"));
    }
    let weight_grams = (weight_kg * units::GRAMS_PER_KILOGRAM).round();
    Ok((weight_lbs, weight_kg, weight_grams))
}

/// `POST /api/weight`
pub async fn log_weight(
    State(state): State<AppState>,
    Json(body): Json<WeightIn>,
) -> AppResult<Json<WeightOut>> {
    let (weight_lbs, weight_kg, weight_grams) = normalize_weight(body.weight, &body.unit)?;
    let now = Utc::now();

    // Garmin first; a failed upload is reported but never blocks the log
    let garmin_error = match async {
        state.wearable.authenticate().await?;
        state.wearable.push_weight(weight_grams, now).await
    }
    .await
    {
        Ok(()) => None,
        Err(e) => {
            error!("Failed to push weight to Garmin: {e}");
            Some(e.to_string())
        }
    };
    let synced = garmin_error.is_none();

    state
        .database
        .insert_weight_log(&WeightLogEntry {
            weight_lbs: round2(weight_lbs),
            weight_kg: round2(weight_kg),
            weight_grams: weight_grams as i64,
            timestamp: now,
            synced_to_garmin: synced,
        })
        .await?;

    // Keep the analysis series current without waiting for the next sync
    state
        .database
        .upsert_weight_history(&WeightEntry {
            date: now.date_naive(),
            weight_grams,
            bmi: None,
            body_fat: None,
        })
        .await?;

    Ok(Json(WeightOut {
        success: true,
        weight_lbs: round2(weight_lbs),
        weight_kg: round2(weight_kg),
        timestamp: now,
        synced_to_garmin: synced,
        garmin_error,
    }))
}

/// `GET /api/weight/recent` - last ten manual entries
pub async fn recent_weights(State(state): State<AppState>) -> AppResult<Json<Vec<WeightLogRow>>> {
    let rows = state.database.recent_weight_logs(10).await?;
    Ok(Json(rows))
}

/// `DELETE /api/weight/{id}`
pub async fn delete_weight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    if state.database.delete_weight_log(id).await? {
        Ok(Json(serde_json::json!({ "success": true, "deleted_id": id })))
    } else {
        Err(AppError::not_found("Weight entry"))
    }
}
