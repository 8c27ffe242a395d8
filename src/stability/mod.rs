//! Stability AI integration
//!
//! Text-to-image generation against the Stable Image Core endpoint.
//! One prompt in, one base64-encoded image out.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::multipart::Form;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::StabilityConfig;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.stability.ai";

/// Stable Image Core generation endpoint
const GENERATE_PATH: &str = "/v2beta/stable-image/generate/core";

/// Errors from the generation provider
#[derive(Debug, Error)]
pub enum StabilityError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status}")]
    Provider { status: StatusCode, body: Value },

    #[error("No image returned from Stability AI")]
    MissingImage,
}

impl StabilityError {
    /// Best-available detail for the caller: the provider body verbatim,
    /// else the transport message
    pub fn details(&self) -> Option<Value> {
        match self {
            StabilityError::Transport(e) => Some(Value::String(e.to_string())),
            StabilityError::Provider { body, .. } => Some(body.clone()),
            StabilityError::MissingImage => None,
        }
    }
}

/// JSON generation response
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    image: Option<String>,
    finish_reason: Option<String>,
    seed: Option<u64>,
}

/// Stability AI client
#[derive(Debug, Clone)]
pub struct StabilityClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    output_format: String,
}

impl StabilityClient {
    /// Create a client from configuration
    pub fn new(config: &StabilityConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            output_format: config.output_format.clone(),
        }
    }

    /// Check if API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate one image for `prompt`, returned base64-encoded
    ///
    /// Without an API key the request is still sent; the provider's
    /// authentication failure comes back as `StabilityError::Provider`.
    pub async fn generate(&self, prompt: &str) -> Result<String, StabilityError> {
        let form = Form::new()
            .text("prompt", prompt.to_string())
            .text("output_format", self.output_format.clone());

        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, GENERATE_PATH))
            .header(header::ACCEPT, "application/json")
            .multipart(form);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        debug!("Sending image generation request to Stability AI");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Stability API error: {} - {}", status, text);
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(StabilityError::Provider { status, body });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        // Honour raw image bodies even though JSON was requested
        if content_type.starts_with("image/") {
            let bytes = response.bytes().await?;
            debug!("Received {} raw image bytes ({})", bytes.len(), content_type);
            return Ok(BASE64.encode(&bytes));
        }

        let generation: GenerationResponse = response.json().await?;
        if let Some(reason) = generation
            .finish_reason
            .as_deref()
            .filter(|r| *r != "SUCCESS")
        {
            warn!("Stability finish_reason: {}", reason);
        }
        if let Some(seed) = generation.seed {
            debug!("Stability generation seed: {}", seed);
        }

        generation
            .image
            .filter(|image| !image.is_empty())
            .ok_or(StabilityError::MissingImage)
    }
}
