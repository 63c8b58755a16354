// ABOUTME: Pipeline controller sequencing image acquisition, recognition, and detail lookup
// ABOUTME: Owns the state machine, rejects overlapping cycles, and publishes every transition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pipeline Controller
//!
//! A cooperative state machine with exactly three suspension points per
//! cycle: `acquire`, `recognize`, `fetch_detail`. State lives in a
//! `tokio::sync::watch` channel, so renderers can read the current phase at
//! any moment (including while a call is outstanding) without ever holding a
//! lock the controller needs.
//!
//! Overlapping requests are rejected: while a cycle is in flight,
//! `request_capture`/`request_pick` return [`CycleOutcome::Rejected`] and
//! leave the state untouched. In-flight calls are never aborted, so a
//! rejected request cannot orphan a network call that later writes into a
//! newer cycle's slots.
//!
//! A caller may still drop the request future itself (a timeout, a
//! `select!`, a torn-down task). A guard held for the cycle then moves the
//! controller back to `Idle` so later requests are accepted again.

use super::phase::{PhaseTransition, PipelinePhase, PipelineState};
use super::presentation::PresentationView;
use foodlens_clients::{FoodDetailSource, FoodRecognizer, ImageSource, PermissionStatus};
use foodlens_core::models::{AcquisitionMode, FoodDetail};
use foodlens_core::PipelineFailure;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Buffered transitions per subscriber before the slowest one starts lagging
const TRANSITION_BUFFER: usize = 64;

/// How a capture/pick request ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Reached `DetailReady`
    Completed(FoodDetail),
    /// The user backed out of the picker; the controller is `Idle`
    Cancelled,
    /// Reached `Error`
    Failed(PipelineFailure),
    /// Another cycle was in flight; nothing changed
    Rejected,
}

/// Drives one capture-recognize-detail cycle at a time
pub struct PipelineController<S, R, D> {
    source: S,
    recognizer: R,
    details: D,
    state: watch::Sender<PipelineState>,
    transitions: broadcast::Sender<PhaseTransition>,
}

impl<S, R, D> PipelineController<S, R, D>
where
    S: ImageSource,
    R: FoodRecognizer,
    D: FoodDetailSource,
{
    /// Create an idle controller over its three collaborators
    #[must_use]
    pub fn new(source: S, recognizer: R, details: D) -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);

        Self {
            source,
            recognizer,
            details,
            state,
            transitions,
        }
    }

    /// Watch the published state
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Receive every transition from now on
    #[must_use]
    pub fn transitions(&self) -> broadcast::Receiver<PhaseTransition> {
        self.transitions.subscribe()
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> PipelinePhase {
        self.state.borrow().phase.clone()
    }

    /// Read-only projection for the presentation layer
    #[must_use]
    pub fn view(&self) -> PresentationView {
        PresentationView::from(&*self.state.borrow())
    }

    /// The image source adapter
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The recognition client
    pub const fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// The detail client
    pub const fn details(&self) -> &D {
        &self.details
    }

    /// Ask for camera permission once at startup
    ///
    /// A refusal does not block gallery use; it is recorded so the
    /// presentation layer can show a notice.
    pub async fn prepare(&self) -> PermissionStatus {
        let status = self.source.request_permission(AcquisitionMode::Camera).await;
        if !status.is_granted() {
            warn!(?status, "Camera permission not granted, capture will be unavailable");
        }
        self.state.send_modify(|state| state.camera_permission = Some(status));
        status
    }

    /// Take a new photo and run it through the pipeline
    pub async fn request_capture(&self) -> CycleOutcome {
        self.run_cycle(AcquisitionMode::Camera).await
    }

    /// Pick an existing photo and run it through the pipeline
    pub async fn request_pick(&self) -> CycleOutcome {
        self.run_cycle(AcquisitionMode::Gallery).await
    }

    /// Close the detail modal
    ///
    /// Clears the recognition result and detail record; the image stays for
    /// the thumbnail. Returns `false` (and changes nothing) outside `DetailReady`.
    pub fn dismiss_detail(&self) -> bool {
        self.return_to_idle(|state| {
            if state.phase != PipelinePhase::DetailReady {
                return false;
            }
            state.recognition = None;
            state.detail = None;
            true
        })
    }

    /// Acknowledge the error notification
    ///
    /// Returns `false` (and changes nothing) outside `Error`.
    pub fn acknowledge_error(&self) -> bool {
        self.return_to_idle(|state| state.phase.failure().is_some())
    }

    async fn run_cycle(&self, mode: AcquisitionMode) -> CycleOutcome {
        let cycle_id = Uuid::new_v4();

        if !self.begin(cycle_id, mode) {
            debug!(%mode, phase = %self.phase(), "Request ignored, a cycle is already in flight");
            return CycleOutcome::Rejected;
        }

        let _guard = CycleGuard {
            state: &self.state,
            transitions: &self.transitions,
            cycle_id,
        };

        let span = info_span!("pipeline_cycle", %cycle_id, %mode);
        self.drive(mode).instrument(span).await
    }

    async fn drive(&self, mode: AcquisitionMode) -> CycleOutcome {
        let image = match self.source.acquire(mode).await {
            Ok(image) => image,
            Err(error) => {
                return match error.failure() {
                    None => {
                        info!("Acquisition cancelled");
                        self.transition(PipelinePhase::Idle, |_| {});
                        CycleOutcome::Cancelled
                    }
                    Some(failure) => self.fail(failure),
                };
            }
        };

        self.transition(PipelinePhase::Recognizing, |state| {
            state.image = Some(image.clone());
        });

        let recognition = match self.recognizer.recognize(&image).await {
            Ok(result) => result,
            Err(error) => return self.fail(error.into()),
        };

        if recognition.is_fallback(self.recognizer.fallback_category()) {
            info!(category = %recognition.category, "Nothing distinguishable, looking up fallback detail");
        }

        let category = recognition.category.clone();
        self.transition(
            PipelinePhase::DetailLoading {
                category: category.clone(),
            },
            |state| state.recognition = Some(recognition),
        );

        match self.details.fetch_detail(&category).await {
            Ok(detail) => {
                self.transition(PipelinePhase::DetailReady, |state| {
                    state.detail = Some(detail.clone());
                });
                info!(name = %detail.name, "Cycle complete");
                CycleOutcome::Completed(detail)
            }
            Err(error) => self.fail(error.into()),
        }
    }

    /// Atomically claim the controller for a new cycle
    fn begin(&self, cycle_id: Uuid, mode: AcquisitionMode) -> bool {
        let mut edges = Vec::with_capacity(2);

        let started = self.state.send_if_modified(|state| {
            if state.phase.is_in_flight() {
                return false;
            }

            if state.phase != PipelinePhase::Idle {
                edges.push(PhaseTransition {
                    cycle_id: state.cycle_id,
                    from: state.phase.clone(),
                    to: PipelinePhase::Idle,
                });
            }

            // The previous image stays until a new acquisition succeeds
            state.recognition = None;
            state.detail = None;
            state.cycle_id = Some(cycle_id);
            state.phase = PipelinePhase::Acquiring { mode };

            edges.push(PhaseTransition {
                cycle_id: Some(cycle_id),
                from: PipelinePhase::Idle,
                to: state.phase.clone(),
            });
            true
        });

        for edge in edges {
            self.publish(edge);
        }
        started
    }

    fn fail(&self, failure: PipelineFailure) -> CycleOutcome {
        warn!(kind = %failure.kind, cause = %failure.message, "Cycle failed");
        self.transition(
            PipelinePhase::Error {
                failure: failure.clone(),
            },
            |_| {},
        );
        CycleOutcome::Failed(failure)
    }

    fn transition(&self, to: PipelinePhase, update: impl FnOnce(&mut PipelineState)) {
        let mut edge = None;

        self.state.send_modify(|state| {
            update(state);
            let from = std::mem::replace(&mut state.phase, to.clone());
            edge = Some(PhaseTransition {
                cycle_id: state.cycle_id,
                from,
                to,
            });
        });

        if let Some(edge) = edge {
            self.publish(edge);
        }
    }

    fn return_to_idle(&self, accept: impl FnOnce(&mut PipelineState) -> bool) -> bool {
        let mut edge = None;

        let changed = self.state.send_if_modified(|state| {
            if !accept(state) {
                return false;
            }
            let from = std::mem::replace(&mut state.phase, PipelinePhase::Idle);
            edge = Some(PhaseTransition {
                cycle_id: state.cycle_id,
                from,
                to: PipelinePhase::Idle,
            });
            true
        });

        if let Some(edge) = edge {
            self.publish(edge);
        }
        changed
    }

    fn publish(&self, edge: PhaseTransition) {
        publish(&self.transitions, edge);
    }
}

/// Returns the controller to `Idle` if its cycle is dropped mid-flight
///
/// A cycle that runs to completion leaves a settled phase behind, so the
/// guard finds nothing to do.
struct CycleGuard<'a> {
    state: &'a watch::Sender<PipelineState>,
    transitions: &'a broadcast::Sender<PhaseTransition>,
    cycle_id: Uuid,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        let mut edge = None;

        self.state.send_if_modified(|state| {
            if state.cycle_id != Some(self.cycle_id) || !state.phase.is_in_flight() {
                return false;
            }
            let from = std::mem::replace(&mut state.phase, PipelinePhase::Idle);
            edge = Some(PhaseTransition {
                cycle_id: state.cycle_id,
                from,
                to: PipelinePhase::Idle,
            });
            true
        });

        if let Some(edge) = edge {
            warn!(
                cycle_id = %self.cycle_id,
                abandoned = %edge.from,
                "Cycle dropped before completing, returning to idle"
            );
            publish(self.transitions, edge);
        }
    }
}

fn publish(transitions: &broadcast::Sender<PhaseTransition>, edge: PhaseTransition) {
    debug!(from = %edge.from, to = %edge.to, "Phase transition");
    // No subscribers is fine; the watch channel still carries the state
    let _ = transitions.send(edge);
}
