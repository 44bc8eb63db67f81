// ABOUTME: Main library entry point for the VitalForge health analytics platform
// ABOUTME: Wires storage, sync, intelligence, the narrative layer, and the REST API together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

#![deny(unsafe_code)]

//! # VitalForge
//!
//! Single-subject health analytics over Garmin wearable data. A background
//! sync engine pulls daily physiological metrics (sleep, heart rate, HRV,
//! stress, body battery, VO2 max, training load, weight) into a per-metric
//! SQLite time-series store; the analysis pipeline turns them into health
//! recommendations through a deterministic rules engine followed by optional
//! LLM elaboration with a deterministic fallback.
//!
//! ## Architecture
//!
//! - **`vitalforge-core`**: error types, domain models, threshold constants
//! - **`vitalforge-intelligence`**: statistical primitives, rules engine,
//!   metric summary, recommendation cache
//! - **`vitalforge-providers`**: Garmin Connect client and payload parsers
//! - **This crate**: SQLite metric store, sync engine, LLM providers, the
//!   narrative layer, the recommendation service, and the axum routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitalforge::config::environment::ServerConfig;
//! use vitalforge::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env();
//!     println!("VitalForge configured with HTTP port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-based configuration
pub mod config;
/// SQLite metric store and schema management
pub mod database;
/// Analysis pipeline: rules engine re-exports, narrative layer, service
pub mod intelligence;
/// LLM provider abstraction and implementations
pub mod llm;
/// Structured logging setup
pub mod logging;
/// HTTP API routes
pub mod routes;
/// Garmin ingestion engine and scheduler
pub mod sync;

/// Unified error types, re-exported from `vitalforge-core`
pub mod errors {
    pub use vitalforge_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
}

/// Domain models, re-exported from `vitalforge-core`
pub mod models {
    pub use vitalforge_core::models::{
        Finding, FindingsReport, MetricKind, MetricPoint, MetricSeries, MetricSet,
        Recommendation, RecommendationReport, RuleCategory, Severity,
    };
}

/// Threshold and unit constants, re-exported from `vitalforge-core`
pub mod constants {
    pub use vitalforge_core::constants::*;
}

pub use database::Database;
pub use intelligence::advisor::RecommendationService;
pub use intelligence::narrative::{FallbackReason, NarrativeGenerator, NarrativeOutcome};
pub use sync::SyncEngine;
