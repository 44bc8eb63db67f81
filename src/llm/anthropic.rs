// ABOUTME: Anthropic Messages API provider implementation
// ABOUTME: Supports direct API access or an OpenAI-proxy base URL override
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! # Anthropic Provider
//!
//! Implementation of [`LlmProvider`] over the Anthropic Messages API.
//!
//! ## Configuration
//!
//! - `ANTHROPIC_API_KEY`: API key for direct access
//! - `ANTHROPIC_BASE_URL`: optional base URL override, e.g. a LiteLLM proxy
//!   at `http://localhost:4000`; when only the base URL is set a placeholder
//!   key is sent and the proxy handles authentication
//!
//! At least one of the two must be set for the provider to construct.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use vitalforge_core::AppError;

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole};
use crate::config::LlmSettings;

/// Default model to use
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Base URL for the Anthropic API
const API_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value
const API_VERSION: &str = "2023-06-01";

/// Placeholder key sent when a proxy base URL handles authentication
const PROXY_PLACEHOLDER_KEY: &str = "unused";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Messages API request structure
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

/// Non-system message for the Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

/// Messages API response structure
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    model: String,
}

/// One block of response content
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Messages API error response
#[derive(Debug, Deserialize)]
struct AnthropicErrorResponse {
    error: AnthropicErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicProvider {
    /// Create a provider with an explicit key and base URL
    #[must_use]
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| API_BASE_URL.to_owned()),
        }
    }

    /// Create a provider from [`LlmSettings`], `None` when neither a key nor
    /// a base URL is configured.
    ///
    /// Absence of configuration is an expected state, not an error; the
    /// caller decides what "no provider" means.
    #[must_use]
    pub fn from_settings(settings: &LlmSettings) -> Option<Self> {
        if !settings.is_configured() {
            return None;
        }
        let api_key = settings
            .api_key
            .clone()
            .unwrap_or_else(|| PROXY_PLACEHOLDER_KEY.to_owned());
        Some(Self::new(api_key, settings.base_url.clone()))
    }

    /// Split the conversation into the system instruction and the rest;
    /// the Messages API carries the system prompt in its own field.
    fn split_messages(messages: &[ChatMessage]) -> (Option<String>, Vec<AnthropicMessage>) {
        let mut system = None;
        let mut rest = Vec::with_capacity(messages.len());
        for message in messages {
            if message.role == MessageRole::System && system.is_none() {
                system = Some(message.content.clone());
            } else {
                rest.push(AnthropicMessage {
                    role: message.role.as_str().to_owned(),
                    content: message.content.clone(),
                });
            }
        }
        (system, rest)
    }

    /// Parse error response from the Messages API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        if let Ok(error_response) = serde_json::from_str::<AnthropicErrorResponse>(body) {
            let error_type = error_response
                .error
                .error_type
                .unwrap_or_else(|| "unknown".to_owned());
            match status.as_u16() {
                401 | 403 => AppError::external_auth(
                    "Anthropic",
                    format!("authentication failed: {}", error_response.error.message),
                ),
                429 => AppError::external_service(
                    "Anthropic",
                    format!("rate limited: {}", error_response.error.message),
                ),
                _ => AppError::external_service(
                    "Anthropic",
                    format!("{error_type} - {}", error_response.error.message),
                ),
            }
        } else {
            AppError::external_service(
                "Anthropic",
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                ),
            )
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn display_name(&self) -> &'static str {
        "Anthropic (Claude)"
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);
        let (system, messages) = Self::split_messages(&request.messages);

        debug!(model, "sending chat completion request to Anthropic");

        let api_request = AnthropicRequest {
            model: model.to_owned(),
            max_tokens: request.max_tokens.unwrap_or(1024),
            system,
            messages,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Anthropic API: {e}");
                AppError::external_service("Anthropic", format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Anthropic API response: {e}");
            AppError::external_service("Anthropic", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let api_response: AnthropicResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Anthropic API response: {e}");
            AppError::external_service("Anthropic", format!("Failed to parse response: {e}"))
        })?;

        let content = api_response
            .content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.clone())
            .ok_or_else(|| {
                AppError::external_service("Anthropic", "Response contained no text block")
            })?;

        Ok(ChatResponse {
            content,
            model: api_response.model,
        })
    }
}
