// ABOUTME: Configuration module with environment-only configuration loading
// ABOUTME: All settings come from environment variables with explicit defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Configuration management.

/// Environment-based server configuration
pub mod environment;

pub use environment::{GarminSettings, LlmSettings, ServerConfig, SyncSettings};
