// ABOUTME: Image acquisition adapter and remote service clients for FoodLens
// ABOUTME: Collaborator traits, picker normalization, recognition upload, and detail lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External collaborators consumed by the pipeline controller.
//!
//! Each client converts transport and payload failures into its own typed
//! error at the method boundary; callers never see a raw `reqwest::Error`
//! outside of those enums.

// Re-export foodlens-core modules so client code can keep `crate::models::*` paths
pub use foodlens_core::constants;
pub use foodlens_core::models;

/// Collaborator traits the controller is generic over
pub mod core;
/// Detail service client
pub mod detail;
/// Typed client-boundary errors
pub mod errors;
/// HTTP client construction
pub mod http_client;
/// Camera/gallery adapter over a platform picker bridge
pub mod image_source;
/// Recognition service client
pub mod recognition;

pub use core::{FoodDetailSource, FoodRecognizer, ImageSource, PermissionStatus};
pub use detail::DetailClient;
pub use errors::{AcquisitionError, BridgeError, DetailError, RecognitionError};
pub use http_client::create_client_with_timeout;
pub use image_source::{
    AcquisitionOptions, PickedAsset, PickerBridge, PickerImageSource, PickerResponse,
};
pub use recognition::{interpret_prediction, RecognitionClient};
