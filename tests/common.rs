// ABOUTME: Shared test doubles and helpers for pipeline integration tests
// ABOUTME: Scripted image source, counting recognizer and detail source, transition collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `foodlens`

use async_trait::async_trait;
use foodlens::clients::{
    AcquisitionError, DetailError, FoodDetailSource, FoodRecognizer, ImageSource,
    PermissionStatus, RecognitionError,
};
use foodlens::models::{AcquisitionMode, FoodDetail, ImageReference, RecognitionResult};
use foodlens::pipeline::{PhaseTransition, PipelinePhase};
use serde_json::Map;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tokio::sync::{broadcast, Notify};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// A detail record as the detail service would return it
pub fn food(name: &str, kcal: f64) -> FoodDetail {
    FoodDetail {
        name: name.to_owned(),
        kcal,
        description: format!("About {name}"),
        extra: Map::new(),
    }
}

/// Blocks a double until the test releases it
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Wait until the double has reached the gate
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the double continue
    pub fn open(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Image source returning queued outcomes, then repeating the last one
pub struct ScriptedSource {
    outcomes: Mutex<Vec<Result<ImageReference, AcquisitionError>>>,
    permission: PermissionStatus,
    pub calls: AtomicUsize,
    pub modes: Mutex<Vec<AcquisitionMode>>,
}

impl ScriptedSource {
    pub fn new(outcomes: Vec<Result<ImageReference, AcquisitionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            permission: PermissionStatus::Granted,
            calls: AtomicUsize::new(0),
            modes: Mutex::new(Vec::new()),
        }
    }

    pub fn image(uri: &str) -> Self {
        Self::new(vec![Ok(ImageReference::new(uri, None))])
    }

    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }
}

#[async_trait]
impl ImageSource for ScriptedSource {
    async fn request_permission(&self, _mode: AcquisitionMode) -> PermissionStatus {
        self.permission
    }

    async fn acquire(&self, mode: AcquisitionMode) -> Result<ImageReference, AcquisitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.modes.lock().unwrap().push(mode);
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.len() > 1 {
            outcomes.remove(0)
        } else {
            outcomes.first().cloned().expect("no scripted acquisition outcome")
        }
    }
}

type RecognizeFn = dyn Fn(&ImageReference) -> Result<RecognitionResult, RecognitionError> + Send + Sync;

/// Recognizer counting calls and answering from a closure
pub struct CountingRecognizer {
    respond: Box<RecognizeFn>,
    fallback: String,
    gate: Option<Gate>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<String>>,
}

impl CountingRecognizer {
    pub fn new(
        respond: impl Fn(&ImageReference) -> Result<RecognitionResult, RecognitionError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            fallback: "27".to_owned(),
            gate: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(category: &str, confidence: f64) -> Self {
        let category = category.to_owned();
        Self::new(move |_| Ok(RecognitionResult::new(category.clone(), confidence)))
    }

    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl FoodRecognizer for CountingRecognizer {
    fn fallback_category(&self) -> &str {
        &self.fallback
    }

    async fn recognize(
        &self,
        image: &ImageReference,
    ) -> Result<RecognitionResult, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(image.uri.clone());
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        (self.respond)(image)
    }
}

type DetailFn = dyn Fn(&str) -> Result<FoodDetail, DetailError> + Send + Sync;

/// Detail source counting calls and answering from a closure
pub struct CountingDetails {
    respond: Box<DetailFn>,
    pub calls: AtomicUsize,
    pub categories: Mutex<Vec<String>>,
}

impl CountingDetails {
    pub fn new(
        respond: impl Fn(&str) -> Result<FoodDetail, DetailError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            categories: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(detail: FoodDetail) -> Self {
        Self::new(move |_| Ok(detail.clone()))
    }

    pub fn failing(status: u16) -> Self {
        Self::new(move |category| {
            Err(DetailError::Status {
                status,
                category: category.to_owned(),
            })
        })
    }
}

#[async_trait]
impl FoodDetailSource for CountingDetails {
    async fn fetch_detail(&self, category: &str) -> Result<FoodDetail, DetailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.categories.lock().unwrap().push(category.to_owned());
        (self.respond)(category)
    }
}

/// Drain buffered transitions into the phase sequence, starting from `initial`
pub fn phase_sequence(
    initial: PipelinePhase,
    receiver: &mut broadcast::Receiver<PhaseTransition>,
) -> Vec<PipelinePhase> {
    let mut phases = vec![initial];
    while let Ok(edge) = receiver.try_recv() {
        assert_eq!(
            phases.last(),
            Some(&edge.from),
            "transition does not continue from the previous phase"
        );
        phases.push(edge.to);
    }
    phases
}

/// Phase names, for compact assertions
pub fn names(phases: &[PipelinePhase]) -> Vec<String> {
    phases.iter().map(ToString::to_string).collect()
}
