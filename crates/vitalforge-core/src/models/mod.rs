// ABOUTME: Domain model re-exports for metric series and analysis reports
// ABOUTME: Splits metric storage types from findings/recommendation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Domain models shared across the workspace.

mod metrics;
mod report;

pub use metrics::{MetricKind, MetricPoint, MetricSeries, MetricSet};
pub use report::{
    Finding, FindingsReport, Recommendation, RecommendationReport, RuleCategory, Severity,
};
