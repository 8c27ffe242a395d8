//! Pinata pinning client
//!
//! Content-addressed storage on IPFS through Pinata:
//! - `pinFileToIPFS` for raw files (multipart)
//! - `pinJSONToIPFS` for JSON documents
//!
//! Both return the CID of the pinned object. Pins are immutable, so a
//! repeated upload of the same content yields the same CID.

use std::fmt;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.pinata.cloud";

/// Default public gateway
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud";

const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

/// Errors from the pinning service
#[derive(Debug, Error)]
pub enum PinataError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Pinata API error: {status} - {body}")]
    Provider { status: StatusCode, body: String },

    #[error("Pinata response did not include an IpfsHash")]
    MissingHash,
}

/// Pinata API key pair
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret_api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_api_key: secret_api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_api_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_api_key", &"<redacted>")
            .finish()
    }
}

/// Pin response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinResponse {
    ipfs_hash: Option<String>,
    pin_size: Option<u64>,
}

/// Pinata API client
#[derive(Debug, Clone)]
pub struct PinataClient {
    client: Client,
    base_url: String,
}

impl PinataClient {
    /// Create a client for the given API base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Pin a raw file, returning its CID
    pub async fn pin_file(
        &self,
        credentials: &Credentials,
        data: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<String, PinataError> {
        let size = data.len();
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().part("file", part);

        debug!("Pinning file {} ({} bytes)", file_name, size);
        let request = self
            .client
            .post(format!("{}{}", self.base_url, PIN_FILE_PATH))
            .multipart(form);

        self.send(credentials.apply(request)).await
    }

    /// Pin a JSON document, returning its CID
    pub async fn pin_json<T: Serialize + ?Sized>(
        &self,
        credentials: &Credentials,
        document: &T,
    ) -> Result<String, PinataError> {
        debug!("Pinning JSON document");
        let request = self
            .client
            .post(format!("{}{}", self.base_url, PIN_JSON_PATH))
            .json(document);

        self.send(credentials.apply(request)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, PinataError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Pinata API error: {} - {}", status, body);
            return Err(PinataError::Provider { status, body });
        }

        let pinned: PinResponse = response.json().await?;
        if let Some(size) = pinned.pin_size {
            debug!("Pinned {} bytes", size);
        }

        pinned
            .ipfs_hash
            .filter(|hash| !hash.is_empty())
            .ok_or(PinataError::MissingHash)
    }
}
