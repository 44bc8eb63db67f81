// ABOUTME: Recommendation service composing store reads, rules, narrative, and the cache
// ABOUTME: One sequential analysis pass per call; the cache slot is last-writer-wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! The recommendation pipeline entry points.
//!
//! `get_recommendations` runs the full pass: fetch the 30-day metric set,
//! consult the cache by content hash, evaluate the rules, narrate (or fall
//! back), store, return. `get_rules_only` recomputes findings every time and
//! touches neither the narrative layer nor the cache slot.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use vitalforge_core::constants::windows::LOOKBACK_DAYS;
use vitalforge_core::models::{FindingsReport, RecommendationReport};
use vitalforge_core::AppResult;
use vitalforge_intelligence::{fetch_metric_set, MetricStore, RecommendationCache, RulesEngine};

use super::narrative::{findings_to_recommendations, NarrativeGenerator, NarrativeOutcome};

/// Analysis service owning the cache slot and the narrative generator
pub struct RecommendationService {
    store: Arc<dyn MetricStore>,
    narrative: NarrativeGenerator,
    cache: Arc<RecommendationCache>,
}

impl RecommendationService {
    /// Create a service over a metric store, a narrative generator, and an
    /// explicitly injected cache
    #[must_use]
    pub fn new(
        store: Arc<dyn MetricStore>,
        narrative: NarrativeGenerator,
        cache: Arc<RecommendationCache>,
    ) -> Self {
        Self {
            store,
            narrative,
            cache,
        }
    }

    /// Full recommendation pass.
    ///
    /// Returns the cached set when `force` is false and the freshness
    /// invariant holds; otherwise recomputes, overwrites the slot, and
    /// returns the fresh result with `cached = false`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the metric store read fails; narrative
    /// failures never surface here.
    pub async fn get_recommendations(&self, force: bool) -> AppResult<RecommendationReport> {
        let today = Utc::now().date_naive();
        let metrics = fetch_metric_set(self.store.as_ref(), today, LOOKBACK_DAYS).await?;
        let content_hash = RecommendationCache::content_hash(&metrics)?;

        let now = Utc::now();
        if !force {
            if let Some(hit) = self.cache.lookup(&content_hash, now) {
                return Ok(RecommendationReport {
                    recommendations: hit.recommendations,
                    cached: true,
                    generated_at: hit.generated_at,
                });
            }
        }

        let findings = RulesEngine::evaluate(&metrics);
        let recommendations = match self.narrative.generate(&findings, &metrics).await {
            NarrativeOutcome::Generated(recommendations) => recommendations,
            NarrativeOutcome::Fallback(reason) => {
                info!(%reason, "using rules-derived recommendations");
                findings_to_recommendations(&findings)
            }
        };

        self.cache.store(content_hash, now, recommendations.clone());

        Ok(RecommendationReport {
            recommendations,
            cached: false,
            generated_at: now,
        })
    }

    /// Rules-engine output only: no narrative call, no cache interaction
    ///
    /// # Errors
    ///
    /// Returns an error if the metric store read fails.
    pub async fn get_rules_only(&self) -> AppResult<FindingsReport> {
        let today = Utc::now().date_naive();
        let metrics = fetch_metric_set(self.store.as_ref(), today, LOOKBACK_DAYS).await?;
        let findings = RulesEngine::evaluate(&metrics);
        let count = findings.len();
        Ok(FindingsReport { findings, count })
    }
}
