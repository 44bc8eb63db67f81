// ABOUTME: Core types and constants for the VitalForge health analytics platform
// ABOUTME: Foundation crate with error types, domain models, and threshold constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! # VitalForge Core
//!
//! Foundation crate shared by the analysis engine, the wearable provider
//! client, and the server. Holds the unified error type, the metric and
//! recommendation domain models, and the physiological threshold constants
//! the rules engine is calibrated against.

pub mod constants;
pub mod errors;
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{
    Finding, FindingsReport, MetricKind, MetricPoint, MetricSeries, MetricSet, Recommendation,
    RecommendationReport, RuleCategory, Severity,
};
