// ABOUTME: Read-only projection of pipeline state for the presentation layer
// ABOUTME: Derives spinner, thumbnail, result panel, detail modal, and notifications from one state value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::phase::{PipelinePhase, PipelineState};
use foodlens_core::models::{FoodDetail, RecognitionResult};
use foodlens_core::{FailureKind, PipelineFailure};
use serde::Serialize;

/// Acknowledgeable message for an `Error` phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Failure class
    pub kind: FailureKind,
    /// Short headline
    pub title: &'static str,
    /// What the user can do about it
    pub body: &'static str,
    /// Underlying cause, for details or logs
    pub cause: String,
}

impl From<&PipelineFailure> for Notification {
    fn from(failure: &PipelineFailure) -> Self {
        let (title, body) = match failure.kind {
            FailureKind::PermissionDenied => (
                "Camera permission required",
                "Grant the app camera access to take photos, or pick one from the gallery.",
            ),
            FailureKind::AcquisitionFailed => (
                "Could not use this photo",
                "Please choose a valid image.",
            ),
            FailureKind::RecognitionFailed => (
                "Food recognition failed",
                "The recognition service could not be reached. Please try again later.",
            ),
            FailureKind::DetailFetchFailed => (
                "Could not load food details",
                "The food details could not be retrieved. Please try again later.",
            ),
        };

        Self {
            kind: failure.kind,
            title,
            body,
            cause: failure.message.clone(),
        }
    }
}

/// Notice shown while camera permission is missing
pub const CAMERA_PERMISSION_NOTICE: &str =
    "Camera permission is needed to take photos. Gallery selection still works.";

/// What the presentation layer should render right now
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationView {
    /// Show the loading indicator
    pub show_spinner: bool,
    /// Capture/pick buttons are live
    pub accepts_requests: bool,
    /// Path of the last acquired image
    pub thumbnail: Option<String>,
    /// Recognition result panel
    pub result_panel: Option<RecognitionResult>,
    /// Detail modal contents
    pub detail_modal: Option<FoodDetail>,
    /// Error notification awaiting acknowledgement
    pub notification: Option<Notification>,
    /// Standing notice about camera permission
    pub permission_notice: Option<&'static str>,
}

impl From<&PipelineState> for PresentationView {
    fn from(state: &PipelineState) -> Self {
        let show_spinner = matches!(
            state.phase,
            PipelinePhase::Recognizing | PipelinePhase::DetailLoading { .. }
        );

        Self {
            show_spinner,
            accepts_requests: !state.phase.is_in_flight(),
            thumbnail: state.image.as_ref().map(|image| image.uri.clone()),
            result_panel: if show_spinner {
                None
            } else {
                state.recognition.clone()
            },
            detail_modal: match state.phase {
                PipelinePhase::DetailReady => state.detail.clone(),
                _ => None,
            },
            notification: state.phase.failure().map(Notification::from),
            permission_notice: state
                .camera_permission
                .filter(|status| !status.is_granted())
                .map(|_| CAMERA_PERMISSION_NOTICE),
        }
    }
}
