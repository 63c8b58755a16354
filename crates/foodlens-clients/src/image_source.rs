// ABOUTME: Image source adapter over a platform camera/gallery picker bridge
// ABOUTME: Enforces camera permission and normalizes picker responses into canonical image references
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Image Source Adapter
//!
//! The camera and gallery themselves live on the platform side, behind a
//! [`PickerBridge`]. This adapter owns the parts that do not depend on the
//! platform:
//!
//! - camera permission is checked before every capture and a refusal is
//!   reported as [`AcquisitionError::PermissionDenied`], never as cancellation
//! - the two response shapes pickers produce (a legacy top-level `uri`, or an
//!   `assets` list) are folded into one [`ImageReference`]
//! - `file://` prefixes are stripped so downstream code sees one path form

use crate::constants::acquisition::{DEFAULT_ASPECT, DEFAULT_QUALITY};
use crate::core::{ImageSource, PermissionStatus};
use crate::errors::{AcquisitionError, BridgeError};
use crate::models::{AcquisitionMode, ImageReference};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Options forwarded to the platform picker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionOptions {
    /// Let the user crop before returning
    pub allows_editing: bool,
    /// Crop aspect ratio (width, height)
    pub aspect: (u32, u32),
    /// Compression quality in `0.0..=1.0`
    pub quality: f32,
}

impl Default for AcquisitionOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            aspect: DEFAULT_ASPECT,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// One picked asset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedAsset {
    /// Platform URI, possibly carrying a `file://` prefix
    pub uri: String,
    /// Mime type, when reported
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Pixel width, when reported
    #[serde(default)]
    pub width: Option<u32>,
    /// Pixel height, when reported
    #[serde(default)]
    pub height: Option<u32>,
}

/// Raw picker result in either of the shapes platforms return
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerResponse {
    /// The user dismissed the picker
    #[serde(default, alias = "cancelled")]
    pub canceled: bool,
    /// Legacy single-image form
    #[serde(default)]
    pub uri: Option<String>,
    /// Current multi-asset form; only the first entry is used
    #[serde(default)]
    pub assets: Option<Vec<PickedAsset>>,
}

impl PickerResponse {
    /// Response for a successful single-asset pick
    #[must_use]
    pub fn picked(uri: impl Into<String>) -> Self {
        Self {
            canceled: false,
            uri: None,
            assets: Some(vec![PickedAsset {
                uri: uri.into(),
                mime_type: None,
                width: None,
                height: None,
            }]),
        }
    }

    /// Response for a dismissed picker
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            canceled: true,
            ..Self::default()
        }
    }

    /// Fold the response into a canonical image reference
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` for a dismissed picker and `Failed` when neither
    /// response shape carries a non-empty URI.
    pub fn into_image_reference(self) -> Result<ImageReference, AcquisitionError> {
        if self.canceled {
            return Err(AcquisitionError::Cancelled);
        }

        if let Some(uri) = self.uri.filter(|u| !u.is_empty()) {
            return Ok(ImageReference::new(&uri, None));
        }

        let asset = self
            .assets
            .and_then(|assets| assets.into_iter().next())
            .filter(|asset| !asset.uri.is_empty())
            .ok_or_else(|| AcquisitionError::Failed("picker returned no image uri".into()))?;

        Ok(
            ImageReference::new(&asset.uri, asset.mime_type.as_deref())
                .with_dimensions(asset.width, asset.height),
        )
    }
}

/// Platform side of camera capture and gallery selection
#[async_trait]
pub trait PickerBridge: Send + Sync {
    /// Prompt for (or report) camera permission
    async fn request_camera_permission(&self) -> Result<PermissionStatus, BridgeError>;

    /// Open the camera
    async fn launch_camera(
        &self,
        options: &AcquisitionOptions,
    ) -> Result<PickerResponse, BridgeError>;

    /// Open the photo library
    async fn launch_library(
        &self,
        options: &AcquisitionOptions,
    ) -> Result<PickerResponse, BridgeError>;
}

/// [`ImageSource`] backed by a [`PickerBridge`]
pub struct PickerImageSource<B> {
    bridge: B,
    options: AcquisitionOptions,
    camera_granted: AtomicBool,
}

impl<B: PickerBridge> PickerImageSource<B> {
    /// Create an adapter with the default picker options
    #[must_use]
    pub fn new(bridge: B) -> Self {
        Self::with_options(bridge, AcquisitionOptions::default())
    }

    /// Create an adapter with custom picker options
    #[must_use]
    pub const fn with_options(bridge: B, options: AcquisitionOptions) -> Self {
        Self {
            bridge,
            options,
            camera_granted: AtomicBool::new(false),
        }
    }

    /// Options forwarded on every launch
    #[must_use]
    pub const fn options(&self) -> &AcquisitionOptions {
        &self.options
    }

    /// The wrapped bridge
    #[must_use]
    pub const fn bridge(&self) -> &B {
        &self.bridge
    }

    async fn camera_status(&self) -> PermissionStatus {
        // Only a grant is cached; a refusal is asked again next time
        if self.camera_granted.load(Ordering::Acquire) {
            return PermissionStatus::Granted;
        }

        match self.bridge.request_camera_permission().await {
            Ok(status) => {
                if status.is_granted() {
                    self.camera_granted.store(true, Ordering::Release);
                }
                debug!(?status, "Camera permission status");
                status
            }
            Err(e) => {
                warn!(error = %e, "Camera permission request failed");
                PermissionStatus::Denied
            }
        }
    }
}

#[async_trait]
impl<B: PickerBridge> ImageSource for PickerImageSource<B> {
    async fn request_permission(&self, mode: AcquisitionMode) -> PermissionStatus {
        if mode.requires_permission() {
            self.camera_status().await
        } else {
            PermissionStatus::Granted
        }
    }

    async fn acquire(&self, mode: AcquisitionMode) -> Result<ImageReference, AcquisitionError> {
        if mode.requires_permission() && !self.camera_status().await.is_granted() {
            warn!(%mode, "Acquisition refused: permission not granted");
            return Err(AcquisitionError::PermissionDenied { mode });
        }

        let response = match mode {
            AcquisitionMode::Camera => self.bridge.launch_camera(&self.options).await?,
            AcquisitionMode::Gallery => self.bridge.launch_library(&self.options).await?,
        };

        let image = response.into_image_reference()?;
        info!(%mode, uri = %image.uri, mime = %image.mime_type, "Image acquired");
        Ok(image)
    }
}
