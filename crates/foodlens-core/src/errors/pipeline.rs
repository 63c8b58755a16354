// ABOUTME: Classified pipeline failures carried by the Error phase
// ABOUTME: Pairs a FailureKind with the human-readable cause shown to the user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// User-visible failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Camera permission was not granted
    PermissionDenied,
    /// The picker could not produce a usable image
    AcquisitionFailed,
    /// The recognition service was unreachable or answered with garbage
    RecognitionFailed,
    /// The detail service could not supply a record for the category
    DetailFetchFailed,
}

impl FailureKind {
    /// Stable machine-readable code for logs and serialized views
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::AcquisitionFailed => "acquisition_failed",
            Self::RecognitionFailed => "recognition_failed",
            Self::DetailFetchFailed => "detail_fetch_failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure with its cause
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct PipelineFailure {
    /// Failure class driving the notification shown to the user
    pub kind: FailureKind,
    /// Human-readable cause
    pub message: String,
}

impl PipelineFailure {
    /// Create a failure of the given kind
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Camera permission denial
    #[must_use]
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(FailureKind::PermissionDenied, message)
    }

    /// Picker failure
    #[must_use]
    pub fn acquisition_failed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::AcquisitionFailed, message)
    }

    /// Recognition transport or payload failure
    #[must_use]
    pub fn recognition_failed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::RecognitionFailed, message)
    }

    /// Detail lookup failure
    #[must_use]
    pub fn detail_fetch_failed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::DetailFetchFailed, message)
    }
}
