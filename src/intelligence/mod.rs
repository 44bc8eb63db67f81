// ABOUTME: Intelligence module re-exports from the vitalforge-intelligence crate
// ABOUTME: Local submodules hold the pieces that need LLM and database access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! # Intelligence Module
//!
//! The deterministic analysis pieces live in the `vitalforge-intelligence`
//! crate and are re-exported here. The submodules that depend on main-crate
//! features (the LLM-backed narrative layer and the recommendation service
//! that ties store, rules, narrative, and cache together) stay local.

// Re-export all public items from vitalforge-intelligence
pub use vitalforge_intelligence::*;

// Re-export submodules for path-based access
pub use vitalforge_intelligence::{cache, rules, stats, store, summary};

/// Recommendation service composing store, rules, narrative, and cache
pub mod advisor;
/// LLM-backed narrative generation with deterministic fallback
pub mod narrative;

pub use advisor::RecommendationService;
pub use narrative::{FallbackReason, NarrativeGenerator, NarrativeOutcome};
