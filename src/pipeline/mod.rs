// ABOUTME: Capture-recognize-detail pipeline: state machine, controller, and presentation projection
// ABOUTME: Wires configured HTTP clients and an image source into a ready controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Controller driving one cycle at a time
pub mod controller;
/// Phase enum and published state
pub mod phase;
/// Read-only view for renderers
pub mod presentation;

pub use controller::{CycleOutcome, PipelineController};
pub use phase::{PhaseTransition, PipelinePhase, PipelineState};
pub use presentation::{Notification, PresentationView, CAMERA_PERMISSION_NOTICE};

use crate::config::PipelineConfig;
use foodlens_clients::{create_client_with_timeout, DetailClient, ImageSource, RecognitionClient};
use tracing::info;

/// Controller backed by the HTTP recognition and detail clients
pub type HttpPipeline<S> = PipelineController<S, RecognitionClient, DetailClient>;

/// Build a controller from startup configuration
///
/// Both clients share one connection pool with the configured timeouts.
#[must_use]
pub fn connect<S: ImageSource>(config: &PipelineConfig, source: S) -> HttpPipeline<S> {
    let client =
        create_client_with_timeout(config.http.timeout_secs, config.http.connect_timeout_secs);

    let recognizer = RecognitionClient::with_client(
        client.clone(),
        config.recognition_url.clone(),
        config.fallback_category.clone(),
    );
    let details = DetailClient::with_client(client, config.detail_base_url.clone());

    info!(
        recognition_url = %config.recognition_url,
        detail_base_url = %config.detail_base_url,
        "Pipeline connected"
    );

    PipelineController::new(source, recognizer, details)
}
