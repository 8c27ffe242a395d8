//! HTTP client for the mintd API

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    GenerateFailure, GenerateRequest, GenerateResponse, MintReply, MintRequest, MintResponse,
};

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a failure body
    #[error("{0}")]
    Server(String),
}

/// Client for `/generate` and `/makeNFT`
#[derive(Debug, Clone)]
pub struct MintClient {
    http: Client,
    base_url: String,
}

impl MintClient {
    /// Create a client for a server base URL, e.g. `http://localhost:8000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request an image for a prompt
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ClientError> {
        debug!("POST {}/generate", self.base_url);
        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let failure: GenerateFailure = response.json().await?;
            let message = match failure.details {
                Some(details) => format!("{}: {}", failure.error, details),
                None => failure.error,
            };
            return Err(ClientError::Server(message));
        }

        Ok(response.json().await?)
    }

    /// Publish an image with its name and description
    pub async fn mint(&self, request: &MintRequest) -> Result<MintResponse, ClientError> {
        debug!("POST {}/makeNFT", self.base_url);
        let reply: MintReply = self
            .http
            .post(format!("{}/makeNFT", self.base_url))
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        match reply {
            MintReply::Minted(minted) => Ok(minted),
            MintReply::Failed(failure) => Err(ClientError::Server(failure.error)),
        }
    }
}
