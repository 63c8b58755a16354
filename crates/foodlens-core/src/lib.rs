// ABOUTME: Core types and constants for the FoodLens capture-recognize-detail pipeline
// ABOUTME: Foundation crate with domain models, failure taxonomy, and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FoodLens` Core
//!
//! Foundation crate providing the types shared by the image source adapter,
//! the remote service clients and the pipeline controller. It carries no I/O
//! of its own so the client and controller crates can depend on it freely.
//!
//! ## Modules
//!
//! - **models**: `ImageReference`, `RecognitionResult`, `FoodDetail` and acquisition modes
//! - **errors**: Failure classification surfaced to the presentation layer
//! - **constants**: Wire-format names, the reference sentinel category and default timeouts

/// Failure classification shared by every pipeline stage
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Cycle-scoped domain models
pub mod models;

pub use errors::{FailureKind, PipelineFailure};
pub use models::{AcquisitionMode, FoodDetail, ImageReference, RecognitionResult};
