//! Image intake - turns user-provided files into encoded images
//!
//! A candidate file is accepted only when its declared content type is an
//! image. Read failures are logged and reported the same way as "no file".

pub mod uploader;

pub use uploader::{DragEvent, DragOutcome, ImageSlot, ImageUploader};

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::backend::traits::EncodedImage;

/// Media type assumed when nothing better is known
pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone)]
enum FileSource {
    Memory(Vec<u8>),
    Disk(PathBuf),
}

/// A file offered by the user, not yet validated
#[derive(Debug, Clone)]
pub struct CandidateFile {
    name: String,
    content_type: String,
    source: FileSource,
}

impl CandidateFile {
    /// A file already held in memory, e.g. a multipart upload
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            source: FileSource::Memory(bytes.into()),
        }
    }

    /// A file on disk; the content type is declared from its extension
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = media_type_for_path(&path).to_string();
        Self {
            name,
            content_type,
            source: FileSource::Disk(path),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Whether the declared content type is an image type
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Disk(path) => tokio::fs::read(path).await,
        }
    }
}

/// Declared media type for a path, by extension
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => OCTET_STREAM,
    }
}

/// Encode a candidate file, or report "no image"
pub async fn encode_image(file: Option<&CandidateFile>) -> Option<EncodedImage> {
    let file = file?;

    if !file.is_image() {
        debug!(file = %file.name(), content_type = %file.content_type(), "Ignoring non-image file");
        return None;
    }

    match file.read().await {
        Ok(bytes) => Some(EncodedImage::from_bytes(&bytes, file.content_type())),
        Err(e) => {
            warn!(file = %file.name(), error = %e, "Error converting file to base64");
            None
        }
    }
}
