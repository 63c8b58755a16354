// ABOUTME: Typed errors raised at each collaborator boundary
// ABOUTME: Converted into classified PipelineFailure values before reaching the controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::AcquisitionMode;
use foodlens_core::PipelineFailure;
use thiserror::Error;

/// Failure reported by the platform picker bridge
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BridgeError(pub String);

impl BridgeError {
    /// Create a bridge error from any message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Image acquisition outcomes other than success
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// The user backed out of the picker; not an error for the user
    #[error("acquisition cancelled")]
    Cancelled,
    /// Capture permission was not granted
    #[error("{mode} permission denied")]
    PermissionDenied {
        /// Mode that needed the permission
        mode: AcquisitionMode,
    },
    /// The picker could not produce a usable image
    #[error("image acquisition failed: {0}")]
    Failed(String),
}

impl AcquisitionError {
    /// Classify for the pipeline; cancellation yields `None`
    #[must_use]
    pub fn failure(&self) -> Option<PipelineFailure> {
        match self {
            Self::Cancelled => None,
            Self::PermissionDenied { .. } => {
                Some(PipelineFailure::permission_denied(self.to_string()))
            }
            Self::Failed(_) => Some(PipelineFailure::acquisition_failed(self.to_string())),
        }
    }
}

impl From<BridgeError> for AcquisitionError {
    fn from(error: BridgeError) -> Self {
        Self::Failed(error.0)
    }
}

/// Hard recognition failures
///
/// "Nothing recognized" is not represented here; it is a sentinel result.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The local image could not be read for upload
    #[error("could not read image {path}: {source}")]
    ImageUnreadable {
        /// Canonical path that failed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// No response within the configured timeout
    #[error("recognition request timed out")]
    Timeout,
    /// Connection or protocol failure
    #[error("recognition request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The service answered with a server error
    #[error("recognition service returned HTTP {status}")]
    ServerError {
        /// HTTP status code
        status: u16,
    },
    /// The body was present but not JSON
    #[error("recognition response is malformed: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for RecognitionError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(error)
        }
    }
}

impl From<RecognitionError> for PipelineFailure {
    fn from(error: RecognitionError) -> Self {
        Self::recognition_failed(error.to_string())
    }
}

/// Detail lookup failures; no substitute content is ever produced
#[derive(Debug, Error)]
pub enum DetailError {
    /// Lookup attempted without a category
    #[error("detail lookup requires a category")]
    EmptyCategory,
    /// The base URL cannot carry path segments
    #[error("detail base URL cannot be extended: {0}")]
    InvalidBaseUrl(String),
    /// No response within the configured timeout
    #[error("detail request for category {category} timed out")]
    Timeout {
        /// Category being fetched
        category: String,
    },
    /// Connection or protocol failure
    #[error("detail request for category {category} failed: {source}")]
    Transport {
        /// Category being fetched
        category: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },
    /// Any non-2xx answer
    #[error("detail service returned HTTP {status} for category {category}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Category being fetched
        category: String,
    },
    /// The body did not describe a food
    #[error("detail response for category {category} is malformed: {reason}")]
    Decode {
        /// Category being fetched
        category: String,
        /// Parser message
        reason: String,
    },
}

impl DetailError {
    pub(crate) fn from_transport(category: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                category: category.to_owned(),
            }
        } else {
            Self::Transport {
                category: category.to_owned(),
                source: error,
            }
        }
    }
}

impl From<DetailError> for PipelineFailure {
    fn from(error: DetailError) -> Self {
        Self::detail_fetch_failed(error.to_string())
    }
}
