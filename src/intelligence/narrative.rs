// ABOUTME: Narrative layer turning findings plus metric summaries into recommendations
// ABOUTME: Single LLM attempt with a typed outcome; fallback renders the top findings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Optional language-model elaboration of rules-engine findings.
//!
//! The generator makes exactly one completion attempt per invocation and
//! reports what happened as a typed [`NarrativeOutcome`] instead of raising:
//! unconfigured, transport failure, and malformed output all collapse to a
//! fallback variant carrying the reason, and the caller renders the
//! deterministic rules-derived recommendations. Nothing in here can fail
//! into the analysis pipeline.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use vitalforge_core::constants::cache::MAX_RECOMMENDATIONS;
use vitalforge_core::models::{Finding, MetricSet, Recommendation};

use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use vitalforge_intelligence::build_metric_summary;

/// System instruction constraining the model to prioritized, grounded JSON
const SYSTEM_PROMPT: &str = "You are a knowledgeable fitness and health coach analyzing data \
from a Garmin Fenix 7X user. Provide specific, actionable recommendations based on the patterns \
detected. Be direct and practical. Reference specific numbers from their data. Suggest concrete \
changes to training, sleep habits, nutrition, or lifestyle. Keep recommendations to 3-5 items, \
prioritized by impact.\n\n\
Respond with a JSON array of objects, each with: \
\"title\" (short, 5-8 words), \
\"text\" (2-3 sentences, specific and actionable), \
\"severity\" (\"info\", \"warning\", or \"alert\"), \
\"metrics\" (list of metric names this relates to, e.g. [\"sleep\", \"hrv\"]). \
Return ONLY valid JSON, no markdown or explanation.";

/// Fixed sentence used when the rules engine found nothing
const NO_ISSUES_SENTENCE: &str = "No significant issues detected.";

/// Why the narrative layer fell back to the rules-derived rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No API key or endpoint configured; expected state, not an error
    NotConfigured,
    /// The single completion attempt failed (transport, status, auth)
    RequestFailed,
    /// The model replied but not with a parseable recommendation array
    MalformedResponse,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotConfigured => "not configured",
            Self::RequestFailed => "request failed",
            Self::MalformedResponse => "malformed response",
        };
        f.write_str(label)
    }
}

/// Result of one narrative generation attempt
#[derive(Debug, Clone)]
pub enum NarrativeOutcome {
    /// Model produced a usable recommendation array (already truncated)
    Generated(Vec<Recommendation>),
    /// Use the rules-derived rendering instead
    Fallback(FallbackReason),
}

/// LLM-backed recommendation narrator
pub struct NarrativeGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl NarrativeGenerator {
    /// Create a generator; `None` means always fall back
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { provider }
    }

    /// Create a generator that never calls a model
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Make one generation attempt.
    ///
    /// Never returns an error; every failure mode maps to a
    /// [`NarrativeOutcome::Fallback`] with its reason.
    pub async fn generate(&self, findings: &[Finding], metrics: &MetricSet) -> NarrativeOutcome {
        let Some(provider) = &self.provider else {
            warn!("LLM endpoint not configured, falling back to rules-only");
            return NarrativeOutcome::Fallback(FallbackReason::NotConfigured);
        };

        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_message(findings, metrics)),
        ])
        .with_max_tokens(1024);

        let response = match provider.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("LLM recommendation call failed: {e}");
                return NarrativeOutcome::Fallback(FallbackReason::RequestFailed);
            }
        };

        match serde_json::from_str::<Vec<Recommendation>>(response.content.trim()) {
            Ok(mut recommendations) => {
                recommendations.truncate(MAX_RECOMMENDATIONS);
                debug!(
                    count = recommendations.len(),
                    model = response.model,
                    "model recommendations accepted"
                );
                NarrativeOutcome::Generated(recommendations)
            }
            Err(e) => {
                warn!("Failed to parse LLM response as JSON: {e}");
                NarrativeOutcome::Fallback(FallbackReason::MalformedResponse)
            }
        }
    }
}

/// Findings rendered as `[SEVERITY] message` lines plus the metric summary
fn build_user_message(findings: &[Finding], metrics: &MetricSet) -> String {
    let findings_text = if findings.is_empty() {
        NO_ISSUES_SENTENCE.to_owned()
    } else {
        findings
            .iter()
            .map(|f| format!("[{}] {}", f.severity.as_str().to_uppercase(), f.message))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Here are the detected patterns:\n{findings_text}\n\n\
         Metric summaries (last 30 days):\n{}\n\n\
         Based on these patterns and data, provide your recommendations.",
        build_metric_summary(metrics)
    )
}

/// Deterministic rendering of the top findings as recommendations
#[must_use]
pub fn findings_to_recommendations(findings: &[Finding]) -> Vec<Recommendation> {
    findings
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|finding| Recommendation {
            title: humanize_rule(&finding.rule),
            text: finding.message.clone(),
            severity: finding.severity,
            metrics: vec![finding.category.as_str().to_owned()],
        })
        .collect()
}

/// `sleep_low_duration` -> `Sleep Low Duration`
fn humanize_rule(rule: &str) -> String {
    rule.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalforge_core::models::{RuleCategory, Severity};

    #[test]
    fn humanizes_rule_identifiers() {
        assert_eq!(humanize_rule("sleep_low_duration"), "Sleep Low Duration");
        assert_eq!(humanize_rule("hrv_weekly_drop"), "Hrv Weekly Drop");
    }

    #[test]
    fn fallback_rendering_truncates_to_five() {
        let findings: Vec<Finding> = (0..8)
            .map(|i| {
                Finding::new(
                    RuleCategory::Sleep,
                    Severity::Warning,
                    format!("rule_{i}"),
                    format!("message {i}"),
                )
            })
            .collect();

        let recommendations = findings_to_recommendations(&findings);
        assert_eq!(recommendations.len(), 5);
        assert_eq!(recommendations[0].title, "Rule 0");
        assert_eq!(recommendations[0].metrics, vec!["sleep".to_owned()]);
    }
}
