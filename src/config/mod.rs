// ABOUTME: Configuration management module for pipeline endpoints and client settings
// ABOUTME: Endpoints and the sentinel category are injected at startup, never hardcoded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for `FoodLens`
//!
//! - **Environment**: `PipelineConfig` built programmatically or from environment variables

/// Pipeline configuration and environment parsing
pub mod environment;

pub use environment::{ConfigError, HttpClientConfig, PipelineConfig};
