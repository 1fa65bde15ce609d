//! Common traits and types for generative model backends

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::response::base64;

/// Base64 image payload plus its declared media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    /// Base64 encoded bytes, without a data URL prefix
    pub payload: String,

    /// Media type, e.g. "image/png"
    pub media_type: String,
}

impl EncodedImage {
    pub fn new(payload: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            media_type: media_type.into(),
        }
    }

    /// Encode raw bytes under the given media type
    pub fn from_bytes(data: &[u8], media_type: impl Into<String>) -> Self {
        Self::new(base64::encode(data), media_type)
    }

    /// Decode the payload back to raw bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::decode(&self.payload)
    }

    /// Render as a `data:` URL
    pub fn to_data_url(&self) -> String {
        base64::create_data_url(&self.payload, &self.media_type)
    }
}

/// A unit of a model request or response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Plain text
    Text(String),

    /// Inline binary data with its media type
    InlineData(EncodedImage),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The inline image carried by this part, if any
    pub fn as_image(&self) -> Option<&EncodedImage> {
        match self {
            Self::InlineData(image) if image.media_type.starts_with("image/") => Some(image),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::InlineData(_) => None,
        }
    }
}

/// Trait for remote generative model backends
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Generate text from an ordered list of parts
    async fn generate_text(&self, parts: Vec<ContentPart>) -> Result<String>;

    /// Generate image output from an ordered list of parts.
    ///
    /// Returns every part of the first candidate; callers pick the image out.
    async fn generate_image(&self, parts: Vec<ContentPart>) -> Result<Vec<ContentPart>>;
}
