//! Client form view-state
//!
//! One explicit state value per form instead of DOM-driven visibility.
//! Each action (generate, publish) runs `Idle -> Loading -> Success | Error`
//! and is reset when the next action of the same kind begins. The rendering
//! layer reads `view()` and `shows_publish_controls()` after every
//! transition, so visibility always reflects the applied update.

use thiserror::Error;

use crate::client::ClientError;
use crate::models::{GenerateRequest, GenerateResponse, MintRequest, MintResponse};

/// Warning shown when publication is submitted without name or description
pub const MISSING_FIELDS_WARNING: &str = "Name and Description must be filled!";

/// Error text when the server answered without images, including failure bodies
pub const NO_IMAGES_MESSAGE: &str = "No images returned from API.";

/// Error text when the generate call never got an answer
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch images. Please try again.";

/// Progress of one user action
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// What the image area should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Loading,
    HasResult,
    Error(String),
}

/// Publication submit errors, raised before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Name and Description must be filled!")]
    MissingFields,

    #[error("no generated image to publish")]
    NoImage,
}

/// Identifiers and public links from a successful publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub image_cid: String,
    pub metadata_cid: String,
    pub image_link: String,
    pub metadata_link: String,
    pub csv: String,
}

/// Turn a CID or `ipfs://` URI into a gateway link
pub fn gateway_link(gateway_url: &str, cid: &str) -> String {
    format!(
        "{}/ipfs/{}",
        gateway_url.trim_end_matches('/'),
        cid.trim_start_matches("ipfs://")
    )
}

/// Form state
#[derive(Debug, Clone)]
pub struct FormState {
    pub prompt: String,
    pub name: String,
    pub description: String,
    images: Vec<String>,
    generation: ActionState,
    publication: ActionState,
    published: Option<Published>,
    missing_fields: bool,
    gateway_url: String,
}

impl FormState {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            prompt: String::new(),
            name: String::new(),
            description: String::new(),
            images: Vec::new(),
            generation: ActionState::Idle,
            publication: ActionState::Idle,
            published: None,
            missing_fields: false,
            gateway_url: gateway_url.into(),
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn generation(&self) -> &ActionState {
        &self.generation
    }

    pub fn publication(&self) -> &ActionState {
        &self.publication
    }

    pub fn published(&self) -> Option<&Published> {
        self.published.as_ref()
    }

    /// Static warning line, if the last submit lacked name or description
    pub fn warning(&self) -> Option<&'static str> {
        self.missing_fields.then_some(MISSING_FIELDS_WARNING)
    }

    /// Image area view
    pub fn view(&self) -> ViewState {
        match &self.generation {
            ActionState::Loading => ViewState::Loading,
            ActionState::Error(message) => ViewState::Error(message.clone()),
            _ if !self.images.is_empty() => ViewState::HasResult,
            _ => ViewState::Empty,
        }
    }

    /// Name, description and publish button are visible once images exist
    pub fn shows_publish_controls(&self) -> bool {
        !self.images.is_empty()
    }

    /// Adopt images obtained elsewhere (e.g. loaded from disk)
    pub fn load_images(&mut self, images: Vec<String>) {
        self.generation = if images.is_empty() {
            ActionState::Idle
        } else {
            ActionState::Success
        };
        self.images = images;
    }

    /// Start a generation: clears previous images and errors
    pub fn begin_generation(&mut self) -> GenerateRequest {
        self.generation = ActionState::Loading;
        self.images.clear();
        GenerateRequest {
            prompt: self.prompt.clone(),
        }
    }

    /// Apply the outcome of a generation
    ///
    /// A server failure body carries no images, so it reads the same as an
    /// empty result; only a transport failure reports the fetch itself.
    pub fn finish_generation(&mut self, result: Result<GenerateResponse, ClientError>) {
        match result {
            Ok(response) if !response.images.is_empty() => {
                self.images = response.images;
                self.generation = ActionState::Success;
            }
            Ok(_) | Err(ClientError::Server(_)) => {
                self.images.clear();
                self.generation = ActionState::Error(NO_IMAGES_MESSAGE.to_string());
            }
            Err(ClientError::Transport(_)) => {
                self.generation = ActionState::Error(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Validate the fields and build the publication request for the first image
    pub fn begin_publication(&mut self) -> Result<MintRequest, SubmitError> {
        if self.name.is_empty() || self.description.is_empty() {
            self.missing_fields = true;
            return Err(SubmitError::MissingFields);
        }
        self.missing_fields = false;

        let image = self.images.first().cloned().ok_or(SubmitError::NoImage)?;

        self.publication = ActionState::Loading;
        self.published = None;
        Ok(MintRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            image_base64: Some(image),
        })
    }

    /// Apply the outcome of a publication; `Err` carries the failure text
    pub fn finish_publication(&mut self, result: Result<MintResponse, String>) {
        match result {
            Ok(response) => {
                let metadata_cid = response.metadata_url.trim_start_matches("ipfs://");
                self.published = Some(Published {
                    image_link: gateway_link(&self.gateway_url, &response.image_cid),
                    metadata_link: gateway_link(&self.gateway_url, metadata_cid),
                    image_cid: response.image_cid.clone(),
                    metadata_cid: metadata_cid.to_string(),
                    csv: response.csv,
                });
                self.publication = ActionState::Success;
                self.name.clear();
                self.description.clear();
            }
            Err(message) => {
                self.publication = ActionState::Error(message);
            }
        }
    }
}
