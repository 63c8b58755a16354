// ABOUTME: Failure taxonomy for the capture-recognize-detail pipeline
// ABOUTME: Every collaborator error is classified into a FailureKind before it reaches the controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pipeline Failure Types
//!
//! - `FailureKind` - the four user-visible failure classes
//! - `PipelineFailure` - a classified failure carrying a human-readable cause
//!
//! Cancellation is deliberately absent: a cancelled acquisition returns the
//! pipeline to idle without raising anything.

mod pipeline;

pub use pipeline::{FailureKind, PipelineFailure};
