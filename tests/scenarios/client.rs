//! Client scenario tests
//!
//! The full form flow: generate, then publish, through `MintClient` and the
//! `mintctl` binary.

use axum::http::StatusCode;
use mintd::client::{ClientError, MintClient};
use mintd::form::{ActionState, FormState, ViewState, NO_IMAGES_MESSAGE};
use mintd::models::MintRequest;
use serde_json::json;
use tokio::process::Command;

use crate::harness::{MockProvider, Reply, TestEnv, TestServer};

const GATEWAY: &str = "https://gateway.pinata.cloud";

async fn full_stack() -> (MockProvider, MockProvider, TestServer) {
    let stability = MockProvider::stability_image("Zm9v").await.unwrap();
    let pinata = MockProvider::pinata("Qimg", "Qmeta").await.unwrap();
    let server = TestServer::start(
        TestEnv::new()
            .stability(&stability)
            .pinata(&pinata)
            .pinata_credentials(),
    )
    .await
    .expect("Failed to start server");
    (stability, pinata, server)
}

/// Test: generate then publish through the form state
#[tokio::test]
async fn test_form_generate_then_publish() {
    let (_stability, pinata, server) = full_stack().await;
    let client = MintClient::new(server.base_url());
    let mut form = FormState::new(GATEWAY);

    form.prompt = "a red fox".to_string();
    let request = form.begin_generation();
    let result = client.generate(&request).await;
    form.finish_generation(result);

    assert_eq!(form.view(), ViewState::HasResult);
    assert!(form.shows_publish_controls());
    assert_eq!(form.images(), ["Zm9v".to_string()]);

    form.name = "Fox #1".to_string();
    form.description = "A fox.".to_string();
    let request = form.begin_publication().unwrap();
    let result = client.mint(&request).await.map_err(|e| e.to_string());
    form.finish_publication(result);

    assert_eq!(form.publication(), &ActionState::Success);
    let published = form.published().unwrap();
    assert_eq!(published.image_cid, "ipfs://Qimg");
    assert_eq!(published.metadata_cid, "Qmeta");
    assert_eq!(published.image_link, format!("{}/ipfs/Qimg", GATEWAY));
    assert_eq!(published.metadata_link, format!("{}/ipfs/Qmeta", GATEWAY));
    assert!(published.csv.contains("\"Fox #1\""));
    assert!(form.name.is_empty());

    assert_eq!(pinata.calls().len(), 2);
}

/// Test: a generate failure body shows the no-images error, not a fetch failure
#[tokio::test]
async fn test_form_generate_without_image_shows_no_images() {
    let stability = MockProvider::stability(Reply::Json(
        StatusCode::OK,
        json!({"finish_reason": "CONTENT_FILTERED", "seed": 1234}),
    ))
    .await
    .unwrap();
    let server = TestServer::start(TestEnv::new().stability(&stability))
        .await
        .expect("Failed to start server");
    let client = MintClient::new(server.base_url());
    let mut form = FormState::new(GATEWAY);

    form.prompt = "a red fox".to_string();
    let request = form.begin_generation();
    let result = client.generate(&request).await;
    assert!(matches!(result, Err(ClientError::Server(_))));
    form.finish_generation(result);

    assert_eq!(form.view(), ViewState::Error(NO_IMAGES_MESSAGE.to_string()));
    assert!(!form.shows_publish_controls());
    assert_eq!(stability.calls().len(), 1);
}

/// Test: a server-side mint failure comes back as `ClientError::Server`
#[tokio::test]
async fn test_client_reports_mint_failure() {
    let pinata = MockProvider::pinata("Qimg", "Qmeta").await.unwrap();
    let server = TestServer::start(TestEnv::new().pinata(&pinata))
        .await
        .expect("Failed to start server");
    let client = MintClient::new(server.base_url());

    let err = client
        .mint(&MintRequest {
            name: "Fox #1".to_string(),
            description: "A fox.".to_string(),
            image_base64: Some("Zm9v".to_string()),
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Server(message) => {
            assert_eq!(message, "Pinata API credentials are not set")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test: mintctl generate writes the decoded image, mintctl mint publishes it
#[tokio::test]
async fn test_mintctl_round_trip() {
    let (_stability, pinata, server) = full_stack().await;
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("fox.png");

    let output = Command::new(env!("CARGO_BIN_EXE_mintctl"))
        .arg("--server")
        .arg(server.base_url())
        .arg("generate")
        .arg("--prompt")
        .arg("a red fox")
        .arg("--out")
        .arg(&image_path)
        .output()
        .await
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(std::fs::read(&image_path).unwrap(), b"foo");

    let output = Command::new(env!("CARGO_BIN_EXE_mintctl"))
        .arg("--server")
        .arg(server.base_url())
        .arg("mint")
        .arg("--image")
        .arg(&image_path)
        .arg("--name")
        .arg("Fox #1")
        .arg("--description")
        .arg("A fox.")
        .output()
        .await
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://gateway.pinata.cloud/ipfs/Qimg"));
    assert!(stdout.contains("https://gateway.pinata.cloud/ipfs/Qmeta"));

    // The uploaded image is the file's bytes
    let upload = &pinata.calls()[0];
    assert!(upload.body_text().contains("\r\n\r\nfoo\r\n"));
}

/// Test: mintctl refuses to publish without name and description
#[tokio::test]
async fn test_mintctl_requires_fields() {
    let (_stability, pinata, server) = full_stack().await;
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("fox.png");
    std::fs::write(&image_path, b"foo").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_mintctl"))
        .arg("--server")
        .arg(server.base_url())
        .arg("mint")
        .arg("--image")
        .arg(&image_path)
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Name and Description must be filled!"));
    assert!(pinata.calls().is_empty());
}
