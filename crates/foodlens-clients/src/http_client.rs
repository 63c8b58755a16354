// ABOUTME: HTTP client construction for recognition and detail calls
// ABOUTME: Builds one timeout-bounded client per pipeline from startup configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Create a new HTTP client with custom timeout settings
///
/// Both service clients of a pipeline clone the returned client, so they share
/// one connection pool. If the builder rejects the configuration a default
/// client is returned and a warning is logged; that client has no request
/// timeout.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(concat!("foodlens/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            warn!(
                error = %e,
                timeout_secs,
                connect_timeout_secs,
                "HTTP client builder failed, falling back to a client without timeouts"
            );
            Client::new()
        })
}
