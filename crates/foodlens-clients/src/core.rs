// ABOUTME: Collaborator traits for the capture-recognize-detail pipeline
// ABOUTME: Image source, recognizer, and detail source abstractions the controller is generic over
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pipeline Collaborators
//!
//! The controller drives exactly three suspension points per cycle, one per
//! trait below. Every method returns a typed `Result`; the failure variant is
//! already classified, so the controller only has to map it to a phase.
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use foodlens_clients::{DetailError, FoodDetailSource};
//! use foodlens_clients::models::FoodDetail;
//!
//! struct FixedDetail;
//!
//! #[async_trait]
//! impl FoodDetailSource for FixedDetail {
//!     async fn fetch_detail(&self, _category: &str) -> Result<FoodDetail, DetailError> {
//!         Err(DetailError::EmptyCategory)
//!     }
//! }
//! ```

use crate::errors::{AcquisitionError, DetailError, RecognitionError};
use crate::models::{AcquisitionMode, FoodDetail, ImageReference, RecognitionResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of a capture permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// The user granted access
    Granted,
    /// The user refused access
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

impl PermissionStatus {
    /// Whether capture may proceed
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Camera capture and gallery selection
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Ask for the permission `mode` needs; modes without one report `Granted`
    async fn request_permission(&self, mode: AcquisitionMode) -> PermissionStatus;

    /// Produce a canonical image reference, or report cancellation/failure
    async fn acquire(&self, mode: AcquisitionMode) -> Result<ImageReference, AcquisitionError>;
}

/// Remote food recognition
#[async_trait]
pub trait FoodRecognizer: Send + Sync {
    /// Category substituted when the service finds nothing distinguishable
    fn fallback_category(&self) -> &str;

    /// Classify one image with a single request
    async fn recognize(&self, image: &ImageReference)
        -> Result<RecognitionResult, RecognitionError>;
}

/// Remote food detail lookup
#[async_trait]
pub trait FoodDetailSource: Send + Sync {
    /// Fetch the detail record for a category with a single request
    async fn fetch_detail(&self, category: &str) -> Result<FoodDetail, DetailError>;
}
