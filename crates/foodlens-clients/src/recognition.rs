// ABOUTME: Recognition service client uploading one photo per cycle as multipart form data
// ABOUTME: Separates "service found nothing" (sentinel fallback) from "service unreachable" (hard failure)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recognition Client
//!
//! Sends `POST <endpoint>` with the image under the `image` field as
//! `photo.jpg` / `image/jpeg`, then reads `{ "prediction": { "category", "confidence" } }`.
//!
//! | Response | Result |
//! |---|---|
//! | 2xx with category and confidence | that classification |
//! | 2xx with either field missing, or an empty body | sentinel, confidence 0 |
//! | 4xx | sentinel, confidence 0 |
//! | 5xx / other | `RecognitionError::ServerError` |
//! | 2xx with a non-JSON body | `RecognitionError::MalformedPayload` |
//! | no response | `RecognitionError::Timeout` / `Transport` |

use crate::constants::recognition::{
    CATEGORY_FIELDS, CONFIDENCE_FIELDS, IMAGE_FIELD, PREDICTION_KEY, UPLOAD_FILENAME, UPLOAD_MIME,
};
use crate::core::FoodRecognizer;
use crate::errors::RecognitionError;
use crate::models::{ImageReference, RecognitionResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the food recognition endpoint
#[derive(Debug, Clone)]
pub struct RecognitionClient {
    client: Client,
    endpoint: Url,
    fallback_category: String,
}

impl RecognitionClient {
    /// Create a client posting to `endpoint` through `client`
    #[must_use]
    pub fn with_client(client: Client, endpoint: Url, fallback_category: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            fallback_category: fallback_category.into(),
        }
    }

    /// Endpoint uploads are posted to
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn build_form(image: &ImageReference) -> Result<Form, RecognitionError> {
        let bytes = tokio::fs::read(image.path()).await.map_err(|source| {
            RecognitionError::ImageUnreadable {
                path: image.uri.clone(),
                source,
            }
        })?;

        debug!(bytes = bytes.len(), uri = %image.uri, "Prepared recognition upload");

        let part = Part::bytes(bytes)
            .file_name(UPLOAD_FILENAME)
            .mime_str(UPLOAD_MIME)?;

        Ok(Form::new().part(IMAGE_FIELD, part))
    }
}

#[async_trait]
impl FoodRecognizer for RecognitionClient {
    fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    async fn recognize(
        &self,
        image: &ImageReference,
    ) -> Result<RecognitionResult, RecognitionError> {
        let form = Self::build_form(image).await?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();

        if status.is_client_error() {
            warn!(
                status = status.as_u16(),
                fallback = %self.fallback_category,
                "Recognition service rejected the photo, using fallback category"
            );
            return Ok(RecognitionResult::fallback(&self.fallback_category));
        }

        if !status.is_success() {
            return Err(RecognitionError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let result = interpret_prediction(&body, &self.fallback_category)?;

        info!(
            category = %result.category,
            confidence = result.confidence,
            fallback = result.is_fallback(&self.fallback_category),
            "Recognition complete"
        );

        Ok(result)
    }
}

/// Interpret a 2xx recognition body
///
/// An empty body, a non-object document, or a prediction lacking either field
/// yields the sentinel. A zero confidence, a blank category, or a numeric
/// category of zero counts as lacking.
///
/// # Errors
///
/// Returns `MalformedPayload` when a non-empty body is not JSON.
pub fn interpret_prediction(
    body: &[u8],
    fallback_category: &str,
) -> Result<RecognitionResult, RecognitionError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecognitionResult::fallback(fallback_category));
    }

    let document: Value = serde_json::from_slice(body)
        .map_err(|e| RecognitionError::MalformedPayload(e.to_string()))?;

    let prediction = document.get(PREDICTION_KEY);
    let category = prediction.and_then(extract_category);
    let confidence = prediction.and_then(extract_confidence);

    match (category, confidence) {
        (Some(category), Some(confidence)) => Ok(RecognitionResult::new(category, confidence)),
        _ => {
            debug!("Prediction incomplete, substituting fallback category");
            Ok(RecognitionResult::fallback(fallback_category))
        }
    }
}

fn extract_category(prediction: &Value) -> Option<String> {
    CATEGORY_FIELDS
        .iter()
        .find_map(|field| match prediction.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Number(n) if n.as_f64().is_some_and(|v| v.abs() > 0.0) => {
                Some(n.to_string())
            }
            _ => None,
        })
}

fn extract_confidence(prediction: &Value) -> Option<f64> {
    CONFIDENCE_FIELDS
        .iter()
        .find_map(|field| match prediction.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|c| c.is_finite() && c.abs() > 0.0)
}
