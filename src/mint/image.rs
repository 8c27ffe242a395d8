//! Base64 image payload decoding

use std::sync::LazyLock;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{DecodeError, Engine};
use regex::Regex;

// Standard alphabet, padding optional
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").unwrap());

/// Strip a leading `data:image/<fmt>;base64,` prefix, if any
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    match DATA_URL_PREFIX.find(encoded) {
        Some(m) => &encoded[m.end()..],
        None => encoded,
    }
}

/// Decode an image payload, with or without a data URL prefix
///
/// Whitespace (e.g. line-wrapped base64) is ignored.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let payload: String = strip_data_url_prefix(encoded)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    LENIENT.decode(payload)
}
