//! Base64 encoding and data URL utilities

use base64::{engine::general_purpose::STANDARD, Engine};
use crate::error::{AppError, Result};

/// Encode binary data to base64 string
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Strip a `data:<type>;base64,` prefix if present
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        encoded.split_once(',').map(|(_, data)| data).unwrap_or(encoded)
    } else {
        encoded
    }
}

/// Decode base64 string (or data URL) to binary data
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(strip_data_url_prefix(encoded).trim())
        .map_err(|e| AppError::InvalidRequest(format!("Invalid base64 data: {}", e)))
}

/// Create a data URL from an already encoded payload
pub fn create_data_url(payload: &str, media_type: &str) -> String {
    format!("data:{};base64,{}", media_type, payload)
}
