// ABOUTME: Main library entry point for the FoodLens capture-recognize-detail pipeline
// ABOUTME: Re-exports the controller, configuration, logging, and collaborator crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FoodLens`
//!
//! Capture or pick a photo of a food item, classify it with a remote
//! recognition service, then fetch nutritional details for the recognized
//! category from a second service.
//!
//! ## Architecture
//!
//! - **`foodlens-core`**: models, failure taxonomy, constants
//! - **`foodlens-clients`**: image source adapter, recognition and detail clients
//! - **pipeline**: the state machine sequencing the three calls and the view it exposes
//! - **config** / **logging**: startup injection and structured logs
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use foodlens::config::PipelineConfig;
//! use foodlens::pipeline::{self, CycleOutcome};
//! use foodlens::clients::{PickerBridge, PickerImageSource};
//!
//! async fn run<B: PickerBridge>(bridge: B) -> anyhow::Result<()> {
//!     foodlens::logging::init_from_env()?;
//!     let config = PipelineConfig::from_env()?;
//!     let controller = pipeline::connect(&config, PickerImageSource::new(bridge));
//!
//!     controller.prepare().await;
//!     if let CycleOutcome::Completed(detail) = controller.request_pick().await {
//!         println!("{}: {} kcal", detail.name, detail.kcal);
//!         controller.dismiss_detail();
//!     }
//!     Ok(())
//! }
//! ```

/// Startup configuration
pub mod config;
/// Structured logging setup
pub mod logging;
/// Capture-recognize-detail state machine
pub mod pipeline;

pub use foodlens_clients as clients;
pub use foodlens_core::{constants, errors, models};

pub use config::PipelineConfig;
pub use pipeline::{CycleOutcome, PipelineController, PipelinePhase, PipelineState, PresentationView};
