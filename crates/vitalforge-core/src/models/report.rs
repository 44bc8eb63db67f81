// ABOUTME: Findings and recommendation types produced by the analysis pipeline
// ABOUTME: Findings come from the rules engine, recommendations from the narrative layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How urgent a detected pattern is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, no action required
    Info,
    /// Pattern that deserves a behavior change
    Warning,
    /// Multiple signals agree something is wrong
    Alert,
}

impl Severity {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detector category, also the evaluation order of the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Sleep duration and quality
    Sleep,
    /// HRV, resting heart rate, body battery
    Recovery,
    /// Daily stress levels
    Stress,
    /// Weight and body composition
    BodyComposition,
    /// Steps, training load, VO2 max
    Activity,
    /// Cross-metric patterns
    Correlation,
}

impl RuleCategory {
    /// Stable snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Recovery => "recovery",
            Self::Stress => "stress",
            Self::BodyComposition => "body_composition",
            Self::Activity => "activity",
            Self::Correlation => "correlation",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single pattern detected by the rules engine.
///
/// Findings keep their insertion order (category traversal order); consumers
/// that only want the most important ones truncate, they do not re-sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Detector category
    pub category: RuleCategory,
    /// Urgency of the pattern
    pub severity: Severity,
    /// Stable rule identifier, e.g. `sleep_low_duration`
    pub rule: String,
    /// Human-readable description with the numbers that triggered it
    pub message: String,
    /// Structured numeric evidence, rounded for display
    pub data: serde_json::Value,
}

impl Finding {
    /// Create a finding with an empty data payload
    #[must_use]
    pub fn new(
        category: RuleCategory,
        severity: Severity,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            rule: rule.into(),
            message: message.into(),
            data: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Attach the numeric evidence payload
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// A user-facing actionable item, model-generated or rules-derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short headline
    pub title: String,
    /// Specific, actionable body text
    pub text: String,
    /// Urgency inherited from the underlying pattern
    pub severity: Severity,
    /// Metric names this recommendation relates to
    pub metrics: Vec<String>,
}

/// Response of a full recommendation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Prioritized recommendations, at most five
    pub recommendations: Vec<Recommendation>,
    /// Whether the result came from the cache slot
    pub cached: bool,
    /// When the recommendations were computed
    pub generated_at: DateTime<Utc>,
}

/// Response of a rules-only pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingsReport {
    /// Findings in rules-engine order
    pub findings: Vec<Finding>,
    /// Number of findings
    pub count: usize,
}
