// ABOUTME: Single-slot recommendation cache keyed by metric-set content hash
// ABOUTME: Freshness requires matching hash, age under the TTL, and a non-empty result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Memoization of the last computed recommendation set.
//!
//! The cache holds at most one entry and is owned by the analysis service
//! instance, so lifetime and test isolation are explicit. Concurrent passes
//! during the TTL window may each recompute and overwrite the slot; that
//! last-writer-wins race is accepted by contract.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use vitalforge_core::constants::cache;
use vitalforge_core::models::{MetricSet, Recommendation};
use vitalforge_core::AppResult;

/// The slot's payload, cloned out on a fresh hit
#[derive(Debug, Clone)]
pub struct CachedRecommendations {
    /// Recommendations exactly as stored
    pub recommendations: Vec<Recommendation>,
    /// When they were computed
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug)]
struct CacheEntry {
    content_hash: String,
    generated_at: DateTime<Utc>,
    recommendations: Vec<Recommendation>,
}

/// Single mutable slot holding the most recent recommendation set
#[derive(Debug, Default)]
pub struct RecommendationCache {
    slot: Mutex<Option<CacheEntry>>,
}

impl RecommendationCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable content hash of a metric set.
    ///
    /// The set serializes with deterministic key order, so equal data always
    /// hashes equally and any changed sample invalidates the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric set fails to serialize.
    pub fn content_hash(metrics: &MetricSet) -> AppResult<String> {
        let payload = serde_json::to_vec(metrics)?;
        let digest = Sha256::digest(&payload);
        Ok(digest.iter().fold(
            String::with_capacity(digest.len() * 2),
            |mut out, byte| {
                use std::fmt::Write;
                // Safe: writing to a String cannot fail
                let _ = write!(out, "{byte:02x}");
                out
            },
        ))
    }

    /// Return the slot's payload when the freshness invariant holds:
    /// the hash matches, the entry is younger than the TTL, and the stored
    /// recommendations are non-empty.
    #[must_use]
    pub fn lookup(&self, content_hash: &str, now: DateTime<Utc>) -> Option<CachedRecommendations> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = slot.as_ref()?;

        let fresh = entry.content_hash == content_hash
            && now - entry.generated_at < Duration::seconds(cache::RECOMMENDATION_TTL_SECS)
            && !entry.recommendations.is_empty();

        if !fresh {
            return None;
        }

        debug!(age_secs = (now - entry.generated_at).num_seconds(), "cache hit");
        Some(CachedRecommendations {
            recommendations: entry.recommendations.clone(),
            generated_at: entry.generated_at,
        })
    }

    /// Overwrite the slot with a freshly computed recommendation set
    pub fn store(
        &self,
        content_hash: impl Into<String>,
        generated_at: DateTime<Utc>,
        recommendations: Vec<Recommendation>,
    ) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CacheEntry {
            content_hash: content_hash.into(),
            generated_at,
            recommendations,
        });
    }
}
