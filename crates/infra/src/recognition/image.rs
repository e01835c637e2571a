//! Image payload checks done before anything leaves the process.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use pantry_core::{PantryError, PantryResult};

/// Container formats accepted by the recognition gateway.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
        }
    }
}

/// Identify the image container from its magic number.
pub fn sniff_format(bytes: &[u8]) -> PantryResult<ImageFormat> {
    if bytes.is_empty() {
        return Err(PantryError::invalid_image("image payload is empty"));
    }

    let format = if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        ImageFormat::Jpeg
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        ImageFormat::Png
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        ImageFormat::Gif
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        ImageFormat::WebP
    } else if bytes.starts_with(b"BM") && bytes.len() >= 14 {
        ImageFormat::Bmp
    } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
        ImageFormat::Tiff
    } else {
        return Err(PantryError::invalid_image("unrecognized image format"));
    };

    Ok(format)
}

/// Decode a base64 image payload, either bare or wrapped in a data URL
/// (`data:image/jpeg;base64,...`, as produced by browser camera captures).
pub fn decode_image_payload(payload: &str) -> PantryResult<Vec<u8>> {
    let payload = payload.trim();

    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| PantryError::invalid_image("malformed data URL"))?;
            if !header.ends_with(";base64") {
                return Err(PantryError::invalid_image("data URL is not base64 encoded"));
            }
            data
        }
        None => payload,
    };

    if encoded.is_empty() {
        return Err(PantryError::invalid_image("image payload is empty"));
    }

    STANDARD
        .decode(encoded)
        .map_err(|e| PantryError::invalid_image(format!("invalid base64: {e}")))
}
