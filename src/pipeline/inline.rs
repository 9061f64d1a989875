//! Image inlining: raw file bytes → base64 data URI.
//!
//! The declared media type is a constant `image/png` regardless of the actual
//! source format. Word-compatible viewers sniff the content rather than trust
//! the label, so a mislabelled JPEG still renders; the label is kept constant
//! for output compatibility with the original tool rather than derived from
//! the file signature.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Fixed media-type prefix for every embedded image.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode raw image bytes as a data URI with the fixed declared media type.
pub fn to_data_uri(bytes: &[u8]) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + bytes.len() * 4 / 3 + 4);
    uri.push_str(DATA_URI_PREFIX);
    uri.push_str(&STANDARD.encode(bytes));
    uri
}
