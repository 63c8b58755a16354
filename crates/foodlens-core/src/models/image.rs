// ABOUTME: Image reference model produced by the image source adapter
// ABOUTME: Canonicalizes platform URIs and infers mime types from file extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::acquisition::{DEFAULT_MIME, FILE_SCHEME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Where the image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    /// Take a new photo with the device camera
    Camera,
    /// Pick an existing photo from the gallery
    Gallery,
}

impl AcquisitionMode {
    /// Whether the mode needs a capture permission grant first
    #[must_use]
    pub const fn requires_permission(self) -> bool {
        matches!(self, Self::Camera)
    }
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::Gallery => f.write_str("gallery"),
        }
    }
}

/// A locally accessible image, identified by its canonical URI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Canonical path form (no `file://` prefix)
    pub uri: String,
    /// Mime type reported by the platform or inferred from the extension
    pub mime_type: String,
    /// Pixel width, when the platform reports it
    pub width: Option<u32>,
    /// Pixel height, when the platform reports it
    pub height: Option<u32>,
    /// When the adapter produced this reference
    pub acquired_at: DateTime<Utc>,
}

impl ImageReference {
    /// Build a reference from a raw platform URI
    ///
    /// The URI is canonicalized. When `mime_type` is `None` it is inferred
    /// from the file extension.
    #[must_use]
    pub fn new(raw_uri: &str, mime_type: Option<&str>) -> Self {
        let uri = canonicalize_uri(raw_uri);
        let mime_type = mime_type
            .filter(|m| !m.trim().is_empty())
            .map_or_else(|| mime_from_extension(&uri).to_owned(), str::to_owned);

        Self {
            uri,
            mime_type,
            width: None,
            height: None,
            acquired_at: Utc::now(),
        }
    }

    /// Attach pixel dimensions
    #[must_use]
    pub const fn with_dimensions(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Filesystem path the image bytes can be read from
    #[must_use]
    pub fn path(&self) -> &Path {
        Path::new(&self.uri)
    }
}

/// Strip a leading local-file scheme so every downstream consumer sees one form
#[must_use]
pub fn canonicalize_uri(raw: &str) -> String {
    raw.strip_prefix(FILE_SCHEME).unwrap_or(raw).to_owned()
}

/// Infer an image mime type from a path's extension
#[must_use]
pub fn mime_from_extension(uri: &str) -> &'static str {
    let extension = Path::new(uri)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("heic" | "heif") => "image/heic",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => DEFAULT_MIME,
    }
}
