//! Generate scenario tests
//!
//! POST /generate against a mock Stability AI

use axum::http::StatusCode;
use mintd::mint::decode_image;
use mintd::models::GenerateResponse;
use serde_json::{json, Value};

use crate::harness::{MockProvider, Reply, TestEnv, TestServer, STABILITY_PATH, TEST_STABILITY_KEY};

/// Test: a prompt yields exactly one image, passed through unchanged
#[tokio::test]
async fn test_generate_returns_single_image() {
    let stability = MockProvider::stability_image("Zm9v").await.unwrap();
    let server = TestServer::start(TestEnv::new().stability(&stability))
        .await
        .expect("Failed to start server");

    let resp = server
        .post("/generate", &json!({"prompt": "a red fox"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"images": ["Zm9v"]}));
}

/// Test: the provider receives the prompt as multipart form fields
#[tokio::test]
async fn test_generate_forwards_prompt_and_format() {
    let stability = MockProvider::stability_image("Zm9v").await.unwrap();
    let server = TestServer::start(TestEnv::new().stability(&stability))
        .await
        .expect("Failed to start server");

    server
        .post("/generate", &json!({"prompt": "a red fox"}))
        .await
        .unwrap();

    let calls = stability.calls();
    assert_eq!(calls.len(), 1);

    let call = &calls[0];
    assert_eq!(call.path, STABILITY_PATH);
    assert_eq!(
        call.header("authorization"),
        Some(format!("Bearer {}", TEST_STABILITY_KEY).as_str())
    );
    assert!(call
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));

    let body = call.body_text();
    assert!(body.contains("name=\"prompt\""));
    assert!(body.contains("a red fox"));
    assert!(body.contains("name=\"output_format\""));
    assert!(body.contains("png"));
}

/// Test: a provider response without an image is a 500 with an error field
#[tokio::test]
async fn test_generate_without_image_field() {
    let stability = MockProvider::stability(Reply::Json(
        StatusCode::OK,
        json!({"finish_reason": "CONTENT_FILTERED", "seed": 7}),
    ))
    .await
    .unwrap();
    let server = TestServer::start(TestEnv::new().stability(&stability))
        .await
        .expect("Failed to start server");

    let resp = server
        .post("/generate", &json!({"prompt": "a red fox"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No image returned from Stability AI");
    assert!(body.get("details").is_none());
}

/// Test: the provider's error body is surfaced verbatim
#[tokio::test]
async fn test_generate_surfaces_provider_error_body() {
    let provider_body = json!({
        "id": "abc123",
        "name": "unauthorized",
        "errors": ["authorization: invalid or missing header value"],
    });
    let stability = MockProvider::stability(Reply::Json(
        StatusCode::UNAUTHORIZED,
        provider_body.clone(),
    ))
    .await
    .unwrap();
    let server = TestServer::start(TestEnv::new().stability(&stability))
        .await
        .expect("Failed to start server");

    let resp = server
        .post("/generate", &json!({"prompt": "a red fox"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Error generating image");
    assert_eq!(body["details"], provider_body);
}

/// Test: without an API key the request goes out unauthenticated
#[tokio::test]
async fn test_generate_without_api_key() {
    let stability = MockProvider::stability(Reply::Json(
        StatusCode::UNAUTHORIZED,
        json!({"name": "unauthorized"}),
    ))
    .await
    .unwrap();
    let env = TestEnv::new().var("MINTD_STABILITY__BASE_URL", stability.base_url());
    let server = TestServer::start(env).await.expect("Failed to start server");

    let resp = server
        .post("/generate", &json!({"prompt": "a red fox"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let calls = stability.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].header("authorization").is_none());
}

/// Test: a raw image body is base64-encoded
#[tokio::test]
async fn test_generate_accepts_raw_image_body() {
    let stability = MockProvider::stability(Reply::Raw(
        StatusCode::OK,
        "image/png",
        b"foo".to_vec(),
    ))
    .await
    .unwrap();
    let server = TestServer::start(TestEnv::new().stability(&stability))
        .await
        .expect("Failed to start server");

    let resp = server
        .post("/generate", &json!({"prompt": "a red fox"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["images"], json!(["Zm9v"]));
}

/// 1x1 RGBA PNG: signature plus IHDR chunk
const PNG_HEADER: [u8; 33] = [
    0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, // signature
    0x00, 0x00, 0x00, 0x0d, b'I', b'H', b'D', b'R', // IHDR, 13 bytes
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
    0x08, 0x06, 0x00, 0x00, 0x00, // 8-bit RGBA
    0x1f, 0x15, 0xc4, 0x89, // crc
];

/// Test: a PNG body from the provider comes back as base64 that decodes to the same PNG
#[tokio::test]
async fn test_generate_returns_decodable_png() {
    let stability = MockProvider::stability(Reply::Raw(
        StatusCode::OK,
        "image/png",
        PNG_HEADER.to_vec(),
    ))
    .await
    .unwrap();
    let server = TestServer::start(TestEnv::new().stability(&stability))
        .await
        .expect("Failed to start server");

    let resp = server
        .post("/generate", &json!({"prompt": "a red fox"}))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: GenerateResponse = resp.json().await.unwrap();
    assert_eq!(body.images.len(), 1);

    let png = decode_image(&body.images[0]).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(&png[12..16], b"IHDR");
    assert_eq!(png, PNG_HEADER);
}
