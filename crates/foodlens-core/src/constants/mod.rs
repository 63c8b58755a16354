// ABOUTME: Application constants for the FoodLens pipeline
// ABOUTME: Wire-format names, reference sentinel category, acquisition and timeout defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Values here are defaults. Endpoint URLs and the sentinel category are
//! injected at startup through `PipelineConfig`; nothing below is read at
//! runtime unless the caller opts into the defaults.

/// Recognition service wire format
pub mod recognition {
    /// Multipart field carrying the image bytes
    pub const IMAGE_FIELD: &str = "image";

    /// Filename sent with every upload
    pub const UPLOAD_FILENAME: &str = "photo.jpg";

    /// Mime type sent with every upload
    pub const UPLOAD_MIME: &str = "image/jpeg";

    /// Reference sentinel category used when nothing distinguishable was found
    pub const DEFAULT_FALLBACK_CATEGORY: &str = "27";

    /// Envelope key wrapping the classification
    pub const PREDICTION_KEY: &str = "prediction";

    /// Category field and its service-localized alias
    pub const CATEGORY_FIELDS: [&str; 2] = ["category", "食物類別"];

    /// Confidence field and its service-localized alias
    pub const CONFIDENCE_FIELDS: [&str; 2] = ["confidence", "信心度"];
}

/// Image acquisition
pub mod acquisition {
    /// Local-file scheme stripped from platform URIs
    pub const FILE_SCHEME: &str = "file://";

    /// Mime type assumed when neither the platform nor the extension says otherwise
    pub const DEFAULT_MIME: &str = "image/jpeg";

    /// Crop aspect ratio offered by the picker editor (width, height)
    pub const DEFAULT_ASPECT: (u32, u32) = (4, 3);

    /// Compression quality requested from the picker
    pub const DEFAULT_QUALITY: f32 = 0.7;
}

/// HTTP client timeouts
pub mod timeouts {
    /// Request timeout for both remote services
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;

    /// Connection establishment timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names read by `PipelineConfig::from_env`
pub mod env_config {
    /// Recognition endpoint URL
    pub const RECOGNITION_URL: &str = "FOODLENS_RECOGNITION_URL";
    /// Detail endpoint base URL
    pub const DETAIL_URL: &str = "FOODLENS_DETAIL_URL";
    /// Sentinel fallback category
    pub const FALLBACK_CATEGORY: &str = "FOODLENS_FALLBACK_CATEGORY";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "FOODLENS_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "FOODLENS_HTTP_CONNECT_TIMEOUT_SECS";
}

/// Service names for structured logging
pub mod service_names {
    /// Default service name reported at logging startup
    pub const FOODLENS: &str = "foodlens";
}
