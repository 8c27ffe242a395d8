//! Metadata document, token id and the CSV summary record

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the display token id range
pub const TOKEN_ID_MAX: u16 = 1000;

const CSV_HEADER: &str = "tokenID,name,description,file_name,metadata_CID";

/// Provider-neutral URI for a CID
pub fn ipfs_uri(cid: &str) -> String {
    format!("ipfs://{}", cid)
}

/// NFT metadata document pinned alongside the image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub description: String,
    /// `ipfs://<image cid>`
    pub image: String,
}

impl MetadataDocument {
    pub fn new(name: &str, description: &str, image_cid: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            image: ipfs_uri(image_cid),
        }
    }
}

/// Display token id, uniform over `1..=TOKEN_ID_MAX`
///
/// Not unique: two publications may draw the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u16);

impl TokenId {
    /// Draw from the thread-local RNG
    pub fn random() -> Self {
        Self::draw(&mut rand::rng())
    }

    /// Draw from a caller-supplied RNG
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(1..=TOKEN_ID_MAX))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Derived image file name, e.g. `42.png`
    pub fn file_name(self) -> String {
        format!("{}.png", self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-row CSV export of a publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub token_id: TokenId,
    pub name: String,
    pub description: String,
    pub metadata_cid: String,
}

impl SummaryRecord {
    pub fn new(token_id: TokenId, name: &str, description: &str, metadata_cid: &str) -> Self {
        Self {
            token_id,
            name: name.to_string(),
            description: description.to_string(),
            metadata_cid: metadata_cid.to_string(),
        }
    }

    /// Header line plus the data line
    pub fn to_csv(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{},{},{},{},{}",
            CSV_HEADER,
            self.token_id,
            quote(&self.name),
            quote(&self.description),
            self.token_id.file_name(),
            self.metadata_cid
        )
    }
}

/// Always-quoted CSV field; embedded quotes are doubled
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
