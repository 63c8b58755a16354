// ABOUTME: Pipeline configuration from code or environment variables
// ABOUTME: Validates endpoint URLs, the sentinel fallback category, and HTTP timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Startup-injected configuration for the capture-recognize-detail pipeline

use foodlens_core::constants::env_config;
use foodlens_core::constants::recognition::DEFAULT_FALLBACK_CATEGORY;
use foodlens_core::constants::timeouts::{
    HTTP_CLIENT_CONNECT_TIMEOUT_SECS, HTTP_CLIENT_TIMEOUT_SECS,
};
use std::env;
use thiserror::Error;
use tracing::info;
use url::Url;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{var} is required")]
    Missing {
        /// Variable or field name
        var: &'static str,
    },
    /// A URL did not parse
    #[error("{var} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        /// Variable or field name
        var: &'static str,
        /// Offending value
        value: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },
    /// A URL uses a scheme the HTTP client cannot speak
    #[error("{var} must use http or https, got {scheme}")]
    UnsupportedScheme {
        /// Variable or field name
        var: &'static str,
        /// Offending scheme
        scheme: String,
    },
    /// The sentinel category is blank
    #[error("fallback category cannot be empty")]
    EmptyFallbackCategory,
    /// A timeout is not a positive integer
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidTimeout {
        /// Variable or field name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

/// Timeouts applied to both remote services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: HTTP_CLIENT_TIMEOUT_SECS,
            connect_timeout_secs: HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Everything the pipeline needs from the outside world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Recognition endpoint (multipart POST target)
    pub recognition_url: Url,
    /// Detail base URL; lookups go to `<base>/<category>/`
    pub detail_base_url: Url,
    /// Category substituted when recognition finds nothing
    pub fallback_category: String,
    /// Client timeouts
    pub http: HttpClientConfig,
}

impl PipelineConfig {
    /// Build a configuration with the reference sentinel and default timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if either URL is invalid or not http(s)
    pub fn new(recognition_url: &str, detail_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            recognition_url: parse_url(env_config::RECOGNITION_URL, recognition_url)?,
            detail_base_url: parse_url(env_config::DETAIL_URL, detail_base_url)?,
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_owned(),
            http: HttpClientConfig::default(),
        })
    }

    /// Replace the sentinel fallback category
    ///
    /// # Errors
    ///
    /// Returns `EmptyFallbackCategory` for a blank category
    pub fn with_fallback_category(mut self, category: &str) -> Result<Self, ConfigError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ConfigError::EmptyFallbackCategory);
        }
        category.clone_into(&mut self.fallback_category);
        Ok(self)
    }

    /// Replace the client timeouts
    #[must_use]
    pub const fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            recognition_url = %config.recognition_url,
            detail_base_url = %config.detail_base_url,
            fallback_category = %config.fallback_category,
            timeout_secs = config.http.timeout_secs,
            "Pipeline configuration loaded from environment"
        );
        Ok(config)
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing or any value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing { var })
        };

        let mut config = Self::new(
            &required(env_config::RECOGNITION_URL)?,
            &required(env_config::DETAIL_URL)?,
        )?;

        if let Some(category) = lookup(env_config::FALLBACK_CATEGORY) {
            config = config.with_fallback_category(&category)?;
        }

        config.http = HttpClientConfig {
            timeout_secs: parse_timeout(
                env_config::HTTP_TIMEOUT_SECS,
                lookup(env_config::HTTP_TIMEOUT_SECS),
                HTTP_CLIENT_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_timeout(
                env_config::HTTP_CONNECT_TIMEOUT_SECS,
                lookup(env_config::HTTP_CONNECT_TIMEOUT_SECS),
                HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(config)
    }
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        var,
        value: value.to_owned(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            var,
            scheme: other.to_owned(),
        }),
    }
}

fn parse_timeout(
    var: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout { var, value }),
    }
}
