// ABOUTME: Tests for loading pipeline and logging configuration from the process environment
// ABOUTME: Serialized because they mutate shared environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use foodlens::config::{ConfigError, PipelineConfig};
use foodlens::constants::env_config;
use foodlens::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const PIPELINE_VARS: [&str; 5] = [
    env_config::RECOGNITION_URL,
    env_config::DETAIL_URL,
    env_config::FALLBACK_CATEGORY,
    env_config::HTTP_TIMEOUT_SECS,
    env_config::HTTP_CONNECT_TIMEOUT_SECS,
];

fn clear_pipeline_env() {
    for var in PIPELINE_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_pipeline_config_from_env() {
    clear_pipeline_env();
    env::set_var(env_config::RECOGNITION_URL, "https://vision.example.com/foodapp/upload/");
    env::set_var(env_config::DETAIL_URL, "https://db.example.com/foods/");
    env::set_var(env_config::HTTP_TIMEOUT_SECS, "12");

    let config = PipelineConfig::from_env().unwrap();

    assert_eq!(config.recognition_url.host_str(), Some("vision.example.com"));
    assert_eq!(config.detail_base_url.path(), "/foods/");
    assert_eq!(config.fallback_category, "27");
    assert_eq!(config.http.timeout_secs, 12);
    assert_eq!(config.http.connect_timeout_secs, 10);

    clear_pipeline_env();
}

#[test]
#[serial]
fn test_pipeline_config_requires_endpoints() {
    clear_pipeline_env();
    env::set_var(env_config::RECOGNITION_URL, "https://vision.example.com/upload/");

    let error = PipelineConfig::from_env().unwrap_err();

    assert!(matches!(
        error,
        ConfigError::Missing {
            var: env_config::DETAIL_URL
        }
    ));
    assert!(error.to_string().contains(env_config::DETAIL_URL));

    clear_pipeline_env();
}

#[test]
#[serial]
fn test_pipeline_config_rejects_blank_sentinel() {
    clear_pipeline_env();
    env::set_var(env_config::RECOGNITION_URL, "http://localhost:8000/upload/");
    env::set_var(env_config::DETAIL_URL, "http://localhost:8001/foods/");
    env::set_var(env_config::FALLBACK_CATEGORY, "  ");

    assert!(matches!(
        PipelineConfig::from_env(),
        Err(ConfigError::EmptyFallbackCategory)
    ));

    clear_pipeline_env();
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("SERVICE_NAME", "foodlens-test");
    env::set_var("ENVIRONMENT", "production");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.service_name, "foodlens-test");
    assert!(config.include_location);
    assert!(config.include_spans);

    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");
    env::remove_var("SERVICE_NAME");
    env::remove_var("ENVIRONMENT");
}
