// ABOUTME: Integration tests for the recognition client against a mock HTTP server
// ABOUTME: Covers multipart upload shape, sentinel fallback, and hard failure classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use foodlens_clients::models::{ImageReference, RecognitionResult};
use foodlens_clients::{
    create_client_with_timeout, FoodRecognizer, RecognitionClient, RecognitionError,
};
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use url::Url;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ASCII payload so body matchers can inspect the multipart body as text
const FAKE_JPEG: &[u8] = b"fake-jpeg-bytes";

fn photo_on_disk() -> (NamedTempFile, ImageReference) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FAKE_JPEG).unwrap();
    let uri = format!("file://{}", file.path().display());
    let image = ImageReference::new(&uri, Some("image/jpeg"));
    (file, image)
}

fn client_for(server: &MockServer) -> RecognitionClient {
    let endpoint = Url::parse(&format!("{}/foodapp/upload/", server.uri())).unwrap();
    RecognitionClient::with_client(create_client_with_timeout(5, 2), endpoint, "27")
}

#[tokio::test]
async fn test_upload_is_multipart_with_fixed_field_and_filename() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/foodapp/upload/"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("filename=\"photo.jpg\""))
        .and(body_string_contains("Content-Type: image/jpeg"))
        .and(body_string_contains("fake-jpeg-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prediction": {"category": "apple", "confidence": 0.92}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_file, image) = photo_on_disk();
    let result = client_for(&server).recognize(&image).await.unwrap();

    assert_eq!(result, RecognitionResult::new("apple", 0.92));
}

#[tokio::test]
async fn test_missing_confidence_yields_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"prediction": {"category": "apple"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (_file, image) = photo_on_disk();
    let result = client_for(&server).recognize(&image).await.unwrap();

    assert_eq!(result, RecognitionResult::fallback("27"));
}

#[tokio::test]
async fn test_empty_body_yields_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (_file, image) = photo_on_disk();
    let client = client_for(&server);
    let result = client.recognize(&image).await.unwrap();

    assert!(result.is_fallback(client.fallback_category()));
}

#[tokio::test]
async fn test_client_error_status_yields_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_string("no food found"))
        .mount(&server)
        .await;

    let (_file, image) = photo_on_disk();
    let result = client_for(&server).recognize(&image).await.unwrap();

    assert_eq!(result, RecognitionResult::fallback("27"));
}

#[tokio::test]
async fn test_server_error_is_hard_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (_file, image) = photo_on_disk();
    let error = client_for(&server).recognize(&image).await.unwrap_err();

    assert!(matches!(error, RecognitionError::ServerError { status: 500 }));
}

#[tokio::test]
async fn test_non_json_body_is_hard_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (_file, image) = photo_on_disk();
    let error = client_for(&server).recognize(&image).await.unwrap_err();

    assert!(matches!(error, RecognitionError::MalformedPayload(_)));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"prediction": {"category": "apple", "confidence": 0.9}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let endpoint = Url::parse(&server.uri()).unwrap();
    let client = RecognitionClient::with_client(create_client_with_timeout(1, 1), endpoint, "27");
    let (_file, image) = photo_on_disk();
    let error = client.recognize(&image).await.unwrap_err();

    assert!(matches!(error, RecognitionError::Timeout));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_failure() {
    // Port 1 is reserved and closed on test hosts
    let uri = "http://127.0.0.1:1/upload/";

    let client = RecognitionClient::with_client(
        create_client_with_timeout(2, 1),
        Url::parse(uri).unwrap(),
        "27",
    );
    let (_file, image) = photo_on_disk();
    let error = client.recognize(&image).await.unwrap_err();

    assert!(matches!(
        error,
        RecognitionError::Transport(_) | RecognitionError::Timeout
    ));
}

#[tokio::test]
async fn test_unreadable_image_never_hits_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let image = ImageReference::new("/definitely/not/here.jpg", None);
    let error = client_for(&server).recognize(&image).await.unwrap_err();

    assert!(matches!(error, RecognitionError::ImageUnreadable { .. }));
}
