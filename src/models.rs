//! Wire payloads for the HTTP API
//!
//! Shared by the server handlers and `MintClient`.

use serde::{Deserialize, Serialize};

/// `POST /generate` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

/// `POST /generate` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Base64-encoded images; the provider always yields exactly one
    pub images: Vec<String>,
}

/// `POST /generate` failure body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateFailure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// `POST /makeNFT` request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// May carry a `data:image/<fmt>;base64,` prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// `POST /makeNFT` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    pub success: bool,
    /// Metadata CID
    pub ipfs_hash: String,
    /// `ipfs://<image cid>`
    pub image_cid: String,
    /// `ipfs://<metadata cid>`
    pub metadata_url: String,
    pub csv: String,
}

/// `POST /makeNFT` failure body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintFailure {
    pub success: bool,
    pub error: String,
}

/// Either body of `POST /makeNFT`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MintReply {
    Minted(MintResponse),
    Failed(MintFailure),
}
