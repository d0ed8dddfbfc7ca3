//! Image upload rules (PNG/JPEG/WebP/GIF, 5 MiB cap) and the mapping between
//! public image URLs and object-store keys.

use image::ImageFormat;
use serde_json::Value;

use crate::error::CoreError;

/// Maximum accepted upload size (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Image file validation
// ---------------------------------------------------------------------------

/// Validate an uploaded image and return the file extension to store it under.
///
/// The declared content type must be `image/*`, the payload must be non-empty
/// and at most [`MAX_UPLOAD_BYTES`], and the leading bytes must identify one of
/// the supported formats. The declared type alone is never trusted.
pub fn validate_upload(content_type: Option<&str>, bytes: &[u8]) -> Result<&'static str, CoreError> {
    let is_image = content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return Err(CoreError::Validation("Please select an image file".into()));
    }

    if bytes.is_empty() {
        return Err(CoreError::Validation("Image file is empty".into()));
    }

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation("Image must be under 5MB".into()));
    }

    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok("png"),
        Ok(ImageFormat::Jpeg) => Ok("jpg"),
        Ok(ImageFormat::WebP) => Ok("webp"),
        Ok(ImageFormat::Gif) => Ok("gif"),
        _ => Err(CoreError::Validation(
            "Unsupported image format. Use JPG, PNG, WebP or GIF".into(),
        )),
    }
}

/// Content type to store alongside an object with the given extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Image URL validation
// ---------------------------------------------------------------------------

/// Validate the `image_url` field of a face-creation request.
///
/// The value must be a non-empty string holding an absolute `http(s)` URL that
/// points at an object under `public_base_url`, so face records can only
/// reference images this service stored.
pub fn validate_image_url(raw: &Value, public_base_url: &str) -> Result<String, CoreError> {
    let url = match raw {
        Value::String(s) if !s.trim().is_empty() => s.trim(),
        _ => return Err(CoreError::Validation("image_url is required".into())),
    };

    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(CoreError::Validation(
            "image_url must be an absolute http(s) URL".into(),
        ));
    }

    if url.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation("image_url must not contain whitespace".into()));
    }

    if object_key_from_url(url, public_base_url).is_none() {
        return Err(CoreError::Validation(
            "image_url must reference an uploaded image".into(),
        ));
    }

    Ok(url.to_string())
}

/// Extract the object-store key from a public image URL.
///
/// Returns `None` when the URL does not live under `public_base_url`, carries
/// no key, or the key tries to escape the bucket (`..` segments or a leading
/// slash). Query strings and fragments are ignored.
pub fn object_key_from_url(url: &str, public_base_url: &str) -> Option<String> {
    let base = public_base_url.trim_end_matches('/');
    let rest = url.strip_prefix(base)?.strip_prefix('/')?;
    let key = rest.split(['?', '#']).next().unwrap_or_default();

    if key.is_empty() || key.starts_with('/') || key.split('/').any(|seg| seg == ".." || seg.is_empty()) {
        return None;
    }

    Some(key.to_string())
}

/// Build the public URL for a stored object key.
pub fn public_url_for(public_base_url: &str, key: &str) -> String {
    format!("{}/{}", public_base_url.trim_end_matches('/'), key)
}
