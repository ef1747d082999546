//! Body data decoding.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::error::Result;

/// URL-safe base64 that accepts data with or without trailing padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes base64url body data into text.
///
/// Line breaks inside the encoded data are ignored. Invalid UTF-8 sequences
/// in the decoded bytes are replaced with U+FFFD, so only a structurally
/// invalid base64 string fails.
pub fn decode_body_data(data: &str) -> Result<String> {
    let bytes = if data.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        URL_SAFE_LENIENT.decode(compact)?
    } else {
        URL_SAFE_LENIENT.decode(data)?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Encodes text as unpadded base64url, the form Gmail sends.
pub fn encode_body_data(text: impl AsRef<[u8]>) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(text)
}
