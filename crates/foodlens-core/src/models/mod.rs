// ABOUTME: Cycle-scoped domain models for the capture-recognize-detail pipeline
// ABOUTME: Image references, recognition results, and food detail records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Every model here lives for a single pipeline cycle at most. Nothing is
//! persisted; the controller replaces each slot wholesale on the next cycle.

mod detail;
mod image;
mod recognition;

pub use detail::FoodDetail;
pub use image::{canonicalize_uri, mime_from_extension, AcquisitionMode, ImageReference};
pub use recognition::RecognitionResult;
