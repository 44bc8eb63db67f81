// ABOUTME: Sync engine tests with a canned wearable client and in-memory store
// ABOUTME: Covers full-day ingestion, incremental skip, and absence tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

mod common;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use common::create_test_database;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::Arc;
use vitalforge::errors::AppResult;
use vitalforge::models::MetricKind;
use vitalforge::SyncEngine;
use vitalforge_providers::WearableClient;

/// Canned client: every day has a full set of wellness payloads, and every
/// pull is logged so tests can assert what the engine asked for.
#[derive(Default)]
struct FakeClient {
    pulls: Mutex<Vec<(&'static str, NaiveDate)>>,
    missing_hrv: bool,
}

impl FakeClient {
    fn new() -> Self {
        Self::default()
    }

    fn without_hrv() -> Self {
        Self {
            pulls: Mutex::new(Vec::new()),
            missing_hrv: true,
        }
    }

    fn log(&self, what: &'static str, date: NaiveDate) {
        self.pulls.lock().unwrap().push((what, date));
    }

    fn pull_count(&self, what: &str) -> usize {
        self.pulls.lock().unwrap().iter().filter(|(w, _)| *w == what).count()
    }

    fn pulled_dates(&self, what: &str) -> Vec<NaiveDate> {
        self.pulls
            .lock()
            .unwrap()
            .iter()
            .filter(|(w, _)| *w == what)
            .map(|(_, d)| *d)
            .collect()
    }
}

#[async_trait]
impl WearableClient for FakeClient {
    async fn authenticate(&self) -> AppResult<()> {
        Ok(())
    }

    async fn sleep(&self, date: NaiveDate) -> Option<Value> {
        self.log("sleep", date);
        Some(json!({
            "dailySleepDTO": {
                "sleepTimeSeconds": 26100,
                "sleepScores": { "overall": { "value": 78 } }
            }
        }))
    }

    async fn daily_summary(&self, date: NaiveDate) -> Option<Value> {
        self.log("summary", date);
        Some(json!({
            "restingHeartRate": 52,
            "totalSteps": 8400,
            "activeKilocalories": 450
        }))
    }

    async fn hrv(&self, date: NaiveDate) -> Option<Value> {
        self.log("hrv", date);
        if self.missing_hrv {
            return None;
        }
        Some(json!({ "hrvSummary": { "lastNightAvg": 46.0 } }))
    }

    async fn body_battery(&self, date: NaiveDate) -> Option<Value> {
        self.log("body_battery", date);
        Some(json!([{
            "bodyBatteryValuesArray": [[0, 25], [1, 92], [2, 40]]
        }]))
    }

    async fn stress(&self, date: NaiveDate) -> Option<Value> {
        self.log("stress", date);
        Some(json!({ "avgStressLevel": 31, "maxStressLevel": 88 }))
    }

    async fn training_status(&self, date: NaiveDate) -> Option<Value> {
        self.log("training_status", date);
        Some(json!({
            "mostRecentVO2Max": { "generic": { "vo2MaxValue": 48.0 } },
            "mostRecentTrainingLoadBalance": {
                "metricsTrainingLoadBalanceDTOMap": {
                    "3411": { "monthlyLoadAerobicLow": 150.0, "monthlyLoadAerobicHigh": 60.0 }
                }
            }
        }))
    }

    async fn weight_range(&self, start: NaiveDate, _end: NaiveDate) -> Option<Value> {
        self.log("weight_range", start);
        Some(json!({
            "dailyWeightSummaries": [{
                "summaryDate": Utc::now().date_naive().to_string(),
                "latestWeight": { "weight": 81000.0 }
            }]
        }))
    }

    async fn push_weight(&self, _weight_grams: f64, _timestamp: DateTime<Utc>) -> AppResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn sync_populates_every_metric_table() {
    let db = create_test_database().await.unwrap();
    let client = Arc::new(FakeClient::new());
    let engine = SyncEngine::new(db.clone(), client.clone());

    let result = engine.run_sync(3).await.unwrap();
    assert_eq!(result, "success");

    let expectations: HashMap<MetricKind, f64> = HashMap::from([
        (MetricKind::SleepDuration, 26100.0),
        (MetricKind::SleepScore, 78.0),
        (MetricKind::RestingHr, 52.0),
        (MetricKind::Steps, 8400.0),
        (MetricKind::ActiveCalories, 450.0),
        (MetricKind::Hrv, 46.0),
        (MetricKind::BodyBattery, 92.0),
        (MetricKind::BodyBatteryLow, 25.0),
        (MetricKind::Stress, 31.0),
        (MetricKind::Vo2Max, 48.0),
        (MetricKind::TrainingLoad, 210.0),
        (MetricKind::Weight, 81000.0),
    ]);

    for (kind, expected) in expectations {
        let series = db.read_metric_series(kind, 30).await.unwrap();
        assert!(!series.is_empty(), "expected data for {kind}");
        let last = series.last().unwrap();
        assert!(
            (last.value - expected).abs() < 1e-9,
            "unexpected value for {kind}: {}",
            last.value
        );
    }

    // Three days pulled, status recorded
    assert_eq!(client.pull_count("sleep"), 3);
    let status = db.sync_status().await.unwrap().unwrap();
    assert_eq!(status.last_sync_result.as_deref(), Some("success"));
    assert_eq!(status.last_sync_days, Some(3));
}

#[tokio::test]
async fn second_sync_refreshes_only_today() {
    let db = create_test_database().await.unwrap();
    let client = Arc::new(FakeClient::new());
    let engine = SyncEngine::new(db, client.clone());

    engine.run_sync(3).await.unwrap();
    assert_eq!(client.pull_count("sleep"), 3);

    engine.run_sync(3).await.unwrap();

    // Past days are complete in every table and get skipped; today refreshes
    assert_eq!(client.pull_count("sleep"), 4);
    let today = Utc::now().date_naive();
    assert_eq!(client.pulled_dates("sleep").last(), Some(&today));
}

#[tokio::test]
async fn missing_metric_keeps_the_day_incomplete() {
    let db = create_test_database().await.unwrap();
    let client = Arc::new(FakeClient::without_hrv());
    let engine = SyncEngine::new(db.clone(), client.clone());

    let result = engine.run_sync(2).await.unwrap();
    assert_eq!(result, "success");

    // HRV absent everywhere, everything else landed
    assert!(db.read_metric_series(MetricKind::Hrv, 30).await.unwrap().is_empty());
    assert!(!db.read_metric_series(MetricKind::Stress, 30).await.unwrap().is_empty());

    // Because the hrv table has no rows, yesterday is not "complete" and is
    // pulled again on the next pass
    engine.run_sync(2).await.unwrap();
    assert_eq!(client.pull_count("sleep"), 4);
}

#[tokio::test]
async fn sync_dates_walk_newest_first() {
    let db = create_test_database().await.unwrap();
    let client = Arc::new(FakeClient::new());
    let engine = SyncEngine::new(db, client.clone());

    engine.run_sync(3).await.unwrap();

    let today = Utc::now().date_naive();
    let dates = client.pulled_dates("sleep");
    assert_eq!(
        dates,
        vec![
            today,
            today.checked_sub_days(Days::new(1)).unwrap(),
            today.checked_sub_days(Days::new(2)).unwrap(),
        ]
    );
}
