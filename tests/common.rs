// ABOUTME: Shared test utilities: quiet logging, fixture metric stores, mock LLM provider
// ABOUTME: Reduces duplication across the integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge
#![allow(dead_code)]

//! Shared test utilities for `vitalforge` integration tests.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use vitalforge::errors::{AppError, AppResult};
use vitalforge::llm::{ChatRequest, ChatResponse, LlmProvider};
use vitalforge::models::{MetricKind, MetricPoint, MetricSeries, MetricSet};
use vitalforge_intelligence::MetricStore;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database
pub async fn create_test_database() -> anyhow::Result<Arc<vitalforge::Database>> {
    init_test_logging();
    Ok(Arc::new(vitalforge::Database::new("sqlite::memory:").await?))
}

/// A series of consecutive daily values ending today
#[must_use]
pub fn daily_series(values: &[f64]) -> MetricSeries {
    daily_series_ending(values, Utc::now().date_naive())
}

/// A series of consecutive daily values ending on the given day
#[must_use]
pub fn daily_series_ending(values: &[f64], last_day: NaiveDate) -> MetricSeries {
    let n = values.len() as u64;
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let offset = n - 1 - i as u64;
            let date = last_day
                .checked_sub_days(Days::new(offset))
                .unwrap_or(NaiveDate::MIN);
            MetricPoint::new(date, value)
        })
        .collect()
}

/// Build a metric set anchored today from (kind, values) pairs
#[must_use]
pub fn metric_set(entries: &[(MetricKind, &[f64])]) -> MetricSet {
    let today = Utc::now().date_naive();
    let mut set = MetricSet::new(today);
    for (kind, values) in entries {
        set.insert(*kind, daily_series(values));
    }
    set
}

/// In-memory metric store serving canned series
#[derive(Default)]
pub struct FixtureStore {
    series: Mutex<HashMap<MetricKind, MetricSeries>>,
}

impl FixtureStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one metric's canned series
    pub fn set_series(&self, kind: MetricKind, values: &[f64]) {
        let mut series = self.series.lock().unwrap();
        series.insert(kind, daily_series(values));
    }
}

#[async_trait]
impl MetricStore for FixtureStore {
    async fn read(&self, kind: MetricKind, _lookback_days: u32) -> AppResult<MetricSeries> {
        let series = self.series.lock().unwrap();
        Ok(series.get(&kind).cloned().unwrap_or_default())
    }
}

/// What the mock LLM should do when called
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with this body
    Reply(String),
    /// Fail the request
    Fail,
}

/// Mock LLM provider counting completions
pub struct MockLlm {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockLlm {
    #[must_use]
    pub fn new(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    /// How many completions were attempted
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock LLM"
    }

    fn default_model(&self) -> &'static str {
        "mock-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Reply(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "mock-model".to_owned(),
            }),
            MockBehavior::Fail => Err(AppError::external_service("Mock", "simulated failure")),
        }
    }
}
