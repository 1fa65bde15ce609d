//! Rendered snapshot of a session for the browser

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::intake::ImageUploader;
use crate::studio::state::StudioState;
use crate::studio::style::StyleSelection;

/// Text shown in the result panel before anything is generated
pub const RESULT_PLACEHOLDER: &str = "Your generated image will appear here";

/// One upload slot as displayed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub label: &'static str,
    pub preview: Option<String>,
    pub dragging: bool,
}

impl From<&ImageUploader> for SlotView {
    fn from(uploader: &ImageUploader) -> Self {
        Self {
            label: uploader.label(),
            preview: uploader.preview().map(str::to_string),
            dragging: uploader.is_dragging(),
        }
    }
}

/// The result panel shows exactly one of these
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ResultPanel {
    Loading,
    Image { src: String },
    Placeholder { message: &'static str },
}

impl ResultPanel {
    fn from_state(state: &StudioState) -> Self {
        match (&state.generated_image, state.image_loading) {
            (_, true) => Self::Loading,
            (Some(src), false) => Self::Image { src: src.clone() },
            (None, false) => Self::Placeholder {
                message: RESULT_PLACEHOLDER,
            },
        }
    }
}

/// Everything a page needs to draw a studio
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub style: StyleSelection,
    pub product_image: SlotView,
    pub style_reference: SlotView,
    pub prompt: String,
    pub prompt_loading: bool,
    pub can_generate: bool,
    pub image_loading: bool,
    pub result: ResultPanel,
    pub error: Option<String>,
}

impl StudioView {
    pub fn render(
        id: Uuid,
        created_at: DateTime<Utc>,
        state: &StudioState,
        product: &ImageUploader,
        style_reference: &ImageUploader,
    ) -> Self {
        Self {
            id,
            created_at,
            style: state.style,
            product_image: product.into(),
            style_reference: style_reference.into(),
            prompt: state.prompt.clone(),
            prompt_loading: state.prompt_loading,
            can_generate: state.can_generate(),
            image_loading: state.image_loading,
            result: ResultPanel::from_state(state),
            error: state.error.clone(),
        }
    }
}
