//! Upload slot state: preview reference and drag highlighting

use serde::{Deserialize, Serialize};

use crate::backend::traits::EncodedImage;
use crate::intake::{encode_image, CandidateFile};

/// The two image inputs of a studio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSlot {
    /// The product being photographed
    Product,
    /// Optional picture whose look the result should borrow
    StyleReference,
}

impl ImageSlot {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Product => "Product Photo",
            Self::StyleReference => "Style Reference (Optional)",
        }
    }
}

/// Drag-and-drop events delivered to an upload slot
#[derive(Debug, Clone)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<CandidateFile>),
}

/// What a drag event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Presentational only, intake did not run
    Ignored,
    /// A dropped file went through intake
    Intake(Option<EncodedImage>),
}

/// One upload slot
#[derive(Debug, Clone)]
pub struct ImageUploader {
    slot: ImageSlot,
    preview: Option<String>,
    dragging: bool,
}

impl ImageUploader {
    pub fn new(slot: ImageSlot) -> Self {
        Self {
            slot,
            preview: None,
            dragging: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.slot.label()
    }

    /// Local preview of the last accepted file
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Explicit file selection; `None` means the selection was cleared
    pub async fn select(&mut self, file: Option<CandidateFile>) -> Option<EncodedImage> {
        let image = encode_image(file.as_ref()).await;
        self.preview = image.as_ref().map(EncodedImage::to_data_url);
        image
    }

    /// Drag-and-drop; only a drop carrying files runs intake
    pub async fn handle_drag(&mut self, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Enter => {
                self.dragging = true;
                DragOutcome::Ignored
            }
            DragEvent::Over => DragOutcome::Ignored,
            DragEvent::Leave => {
                self.dragging = false;
                DragOutcome::Ignored
            }
            DragEvent::Drop(files) => {
                self.dragging = false;
                match files.into_iter().next() {
                    Some(first) => DragOutcome::Intake(self.select(Some(first)).await),
                    None => DragOutcome::Ignored,
                }
            }
        }
    }
}
