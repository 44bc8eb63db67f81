// ABOUTME: Health analytics engine extracted into its own crate for parallel compilation
// ABOUTME: Statistical primitives, rules engine, metric summaries, and the recommendation cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! # VitalForge Intelligence
//!
//! The deterministic half of the recommendation pipeline. Everything here is
//! pure computation over in-memory metric series: the statistical primitives,
//! the rules engine that detects physiologically meaningful patterns, the
//! fixed-format metric summary fed to the narrative layer, and the
//! single-slot recommendation cache.
//!
//! The narrative (LLM) layer and the concrete metric store live in the main
//! crate; this crate only defines the [`MetricStore`] contract they meet.

pub mod cache;
pub mod rules;
pub mod stats;
pub mod store;
pub mod summary;

pub use cache::{CachedRecommendations, RecommendationCache};
pub use rules::RulesEngine;
pub use store::{fetch_metric_set, MetricStore};
pub use summary::build_metric_summary;
