//! NFT publication pipeline
//!
//! Strictly sequential:
//! 1. Require Pinata credentials
//! 2. Decode the base64 image and pin it
//! 3. Build the metadata document pointing at `ipfs://<image cid>`
//! 4. Pin the metadata document
//! 5. Draw a display token id and render the summary CSV
//!
//! A failure aborts the remaining steps. Already-pinned content is left in
//! place.

mod image;
mod record;

use thiserror::Error;
use tracing::info;

use crate::config::PinataConfig;
use crate::models::MintRequest;
use crate::pinata::{Credentials, PinataClient, PinataError};

pub use image::{decode_image, strip_data_url_prefix};
pub use record::{ipfs_uri, MetadataDocument, SummaryRecord, TokenId, TOKEN_ID_MAX};

/// File name given to the pinned image
pub const IMAGE_FILE_NAME: &str = "nftImage.png";

/// Publication errors
#[derive(Debug, Error)]
pub enum MintError {
    #[error("Pinata API credentials are not set")]
    MissingCredentials,

    #[error("imageBase64 is required")]
    MissingImage,

    #[error("invalid base64 image: {0}")]
    InvalidImage(#[from] base64::DecodeError),

    #[error(transparent)]
    Storage(#[from] PinataError),
}

/// Result of a successful publication
#[derive(Debug, Clone)]
pub struct Minted {
    pub image_cid: String,
    pub metadata_cid: String,
    pub summary: SummaryRecord,
}

impl Minted {
    /// `ipfs://` URI of the image
    pub fn image_uri(&self) -> String {
        ipfs_uri(&self.image_cid)
    }

    /// `ipfs://` URI of the metadata document
    pub fn metadata_uri(&self) -> String {
        ipfs_uri(&self.metadata_cid)
    }
}

/// Publishes images and their metadata to Pinata
#[derive(Debug, Clone)]
pub struct Minter {
    pinata: PinataClient,
    credentials: Option<Credentials>,
}

impl Minter {
    pub fn new(config: &PinataConfig) -> Self {
        Self {
            pinata: PinataClient::new(&config.base_url),
            credentials: config.credentials(),
        }
    }

    /// Check if Pinata credentials are configured
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Run the publication pipeline for one request
    pub async fn mint(&self, request: &MintRequest) -> Result<Minted, MintError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(MintError::MissingCredentials)?;

        let encoded = request
            .image_base64
            .as_deref()
            .ok_or(MintError::MissingImage)?;
        let image = decode_image(encoded)?;

        let image_cid = self
            .pinata
            .pin_file(credentials, image, IMAGE_FILE_NAME, "image/png")
            .await?;
        info!("Image CID: {}", image_cid);

        let metadata = MetadataDocument::new(&request.name, &request.description, &image_cid);
        let metadata_cid = self.pinata.pin_json(credentials, &metadata).await?;
        info!("Metadata CID: {}", metadata_cid);

        let summary = SummaryRecord::new(
            TokenId::random(),
            &request.name,
            &request.description,
            &metadata_cid,
        );
        info!("Summary record for token {}", summary.token_id);

        Ok(Minted {
            image_cid,
            metadata_cid,
            summary,
        })
    }
}
