// ABOUTME: Recognition result model with sentinel fallback support
// ABOUTME: A category is never empty; "nothing recognized" is the configured sentinel at confidence 0
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Classification returned by the recognition service
///
/// `confidence` is passed through as received; no local range is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Category identifier used as the detail lookup key
    pub category: String,
    /// Service-reported confidence
    pub confidence: f64,
}

impl RecognitionResult {
    /// A confident classification
    #[must_use]
    pub fn new(category: impl Into<String>, confidence: f64) -> Self {
        Self {
            category: category.into(),
            confidence,
        }
    }

    /// The "could not identify" substitution
    #[must_use]
    pub fn fallback(sentinel: &str) -> Self {
        Self::new(sentinel, 0.0)
    }

    /// Whether this result is the sentinel substitution
    #[must_use]
    pub fn is_fallback(&self, sentinel: &str) -> bool {
        self.category == sentinel && self.confidence.abs() < f64::EPSILON
    }
}
