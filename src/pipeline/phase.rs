// ABOUTME: Pipeline phase enum and the controller-owned state snapshot
// ABOUTME: One tagged phase value decides what the presentation layer renders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodlens_clients::PermissionStatus;
use foodlens_core::models::{AcquisitionMode, FoodDetail, ImageReference, RecognitionResult};
use foodlens_core::PipelineFailure;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Position of the controller in the capture-recognize-detail state machine
///
/// ```text
/// Idle -> Acquiring -> Recognizing -> DetailLoading -> DetailReady
///            |             |              |               |
///            +-------------+--------------+--> Error      |
///  Idle <-- (cancel)                          Error/DetailReady -> Idle
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PipelinePhase {
    /// Nothing in flight
    #[default]
    Idle,
    /// The picker is open
    Acquiring {
        /// Camera or gallery
        mode: AcquisitionMode,
    },
    /// The photo is being classified
    Recognizing,
    /// Details are being fetched for the resolved category
    DetailLoading {
        /// Category being looked up (possibly the sentinel)
        category: String,
    },
    /// Details are available for modal presentation
    DetailReady,
    /// A stage failed; waits for acknowledgement
    Error {
        /// Classified cause
        failure: PipelineFailure,
    },
}

impl PipelinePhase {
    /// Whether a cycle is currently running
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Acquiring { .. } | Self::Recognizing | Self::DetailLoading { .. }
        )
    }

    /// Classified failure, in the `Error` phase only
    #[must_use]
    pub const fn failure(&self) -> Option<&PipelineFailure> {
        match self {
            Self::Error { failure } => Some(failure),
            _ => None,
        }
    }

    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Acquiring { .. } => "acquiring",
            Self::Recognizing => "recognizing",
            Self::DetailLoading { .. } => "detail_loading",
            Self::DetailReady => "detail_ready",
            Self::Error { .. } => "error",
        }
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error { failure } => write!(f, "error({})", failure.kind),
            other => f.write_str(other.name()),
        }
    }
}

/// Everything the controller holds, published after every change
///
/// The slots are only ever written by the controller. `image` outlives
/// dismissal so the last thumbnail stays visible; `recognition` survives a
/// detail failure so the result stays readable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PipelineState {
    /// Identifier of the current or most recent cycle
    pub cycle_id: Option<Uuid>,
    /// Current phase
    pub phase: PipelinePhase,
    /// Last acquired image
    pub image: Option<ImageReference>,
    /// Result of the current cycle's recognition
    pub recognition: Option<RecognitionResult>,
    /// Detail record, present in `DetailReady` only
    pub detail: Option<FoodDetail>,
    /// Camera permission as observed by `prepare`
    pub camera_permission: Option<PermissionStatus>,
}

/// One edge taken through the state machine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTransition {
    /// Cycle that caused the transition
    pub cycle_id: Option<Uuid>,
    /// Phase before
    pub from: PipelinePhase,
    /// Phase after
    pub to: PipelinePhase,
}
