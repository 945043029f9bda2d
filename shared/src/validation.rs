//! Form validation for the AgriNova advisory platform
//!
//! The same checks run in the browser (through the WASM module) before a
//! form is submitted and in the backend before a request is forwarded.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::borrow::Cow;
use thiserror::Error;

/// Largest accepted image upload (10 MB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// A single rejected form field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Request bodies use camelCase keys; `validator` reports Rust field names
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Collapse `validator` errors into the first offending field, named by its body key
impl From<validator::ValidationErrors> for FieldError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(name, _)| *name);

        fields
            .into_iter()
            .find_map(|(name, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", name));
                    FieldError::new(camel_case(name), message)
                })
            })
            .unwrap_or_else(|| FieldError::new("input", "Invalid input"))
    }
}

/// `validator` hook: the value must contain a non-whitespace character
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("required");
        err.message = Some(Cow::Borrowed("Crop name is required"));
        return Err(err);
    }
    Ok(())
}

/// Required text field
pub fn require(field: &str, value: &str, message: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, message));
    }
    Ok(())
}

/// Required optional text field (missing counts as empty)
pub fn require_opt(field: &str, value: Option<&str>, message: &str) -> Result<(), FieldError> {
    require(field, value.unwrap_or(""), message)
}

/// Strip a `data:<mime>;base64,` prefix if present
pub fn strip_data_url(image: &str) -> &str {
    match image.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => image,
    }
}

/// Validate an uploaded image given as a data URL or bare base64 string
///
/// Returns the decoded size in bytes.
pub fn validate_image(field: &str, image: &str) -> Result<usize, FieldError> {
    let payload = strip_data_url(image.trim());
    if payload.is_empty() {
        return Err(FieldError::new(field, "No image provided"));
    }

    // Reject oversized payloads before decoding
    if payload.len() / 4 * 3 > MAX_IMAGE_BYTES + 3 {
        return Err(FieldError::new(
            field,
            "Please upload an image smaller than 10MB.",
        ));
    }

    let bytes = STANDARD
        .decode(payload.as_bytes())
        .map_err(|_| FieldError::new(field, "Image is not valid base64 data"))?;

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(FieldError::new(
            field,
            "Please upload an image smaller than 10MB.",
        ));
    }

    Ok(bytes.len())
}

/// Validate GPS coordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), FieldError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(FieldError::new(
            "latitude",
            "Latitude must be between -90 and 90",
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(FieldError::new(
            "longitude",
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(())
}

/// Validate a strictly positive quantity such as land size
pub fn validate_positive(field: &str, value: f64, message: &str) -> Result<(), FieldError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FieldError::new(field, message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_field_names() {
        assert_eq!(camel_case("crop_name"), "cropName");
        assert_eq!(camel_case("image_base64"), "imageBase64");
        assert_eq!(camel_case("notes"), "notes");
    }

    #[test]
    fn test_require() {
        assert!(require("crop", "Rice", "Please select a crop").is_ok());
        let err = require("crop", "  ", "Please select a crop").unwrap_err();
        assert_eq!(err.field, "crop");
        assert_eq!(err.message, "Please select a crop");
        assert!(require_opt("region", None, "Please select a region").is_err());
    }

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url("AAAA"), "AAAA");
    }

    #[test]
    fn test_validate_image() {
        // "hello" in base64
        assert_eq!(validate_image("imageBase64", "data:image/jpeg;base64,aGVsbG8="), Ok(5));
        assert!(validate_image("imageBase64", "").is_err());
        assert!(validate_image("imageBase64", "data:image/png;base64,").is_err());
        assert!(validate_image("imageBase64", "not base64!!").is_err());
    }

    #[test]
    fn test_validate_image_too_large() {
        let payload = "A".repeat((MAX_IMAGE_BYTES / 3 + 8) * 4);
        let err = validate_image("imageBase64", &payload).unwrap_err();
        assert!(err.message.contains("10MB"));
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(28.6139, 77.2090).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert_eq!(validate_coordinates(91.0, 0.0).unwrap_err().field, "latitude");
        assert_eq!(validate_coordinates(0.0, -181.0).unwrap_err().field, "longitude");
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("landSize", 2.5, "Land size is required").is_ok());
        assert!(validate_positive("landSize", 0.0, "Land size is required").is_err());
        assert!(validate_positive("landSize", -1.0, "Land size is required").is_err());
    }
}
