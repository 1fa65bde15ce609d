//! Mutable state of one studio session

use parking_lot::Mutex;
use std::sync::Arc;

use crate::backend::traits::EncodedImage;
use crate::studio::style::StyleSelection;

/// Everything the shell tracks for one session
#[derive(Debug, Clone, Default)]
pub struct StudioState {
    pub product_image: Option<EncodedImage>,
    pub style_reference: Option<EncodedImage>,
    pub style: StyleSelection,
    /// Last accepted prompt; empty until the first one arrives
    pub prompt: String,
    /// Data URL of the last generated image
    pub generated_image: Option<String>,
    pub prompt_loading: bool,
    pub image_loading: bool,
    /// Banner message, last failure wins
    pub error: Option<String>,
}

impl StudioState {
    /// Whether image generation has everything it needs
    pub fn can_generate(&self) -> bool {
        !self.image_loading && self.product_image.is_some() && !self.prompt.is_empty()
    }
}

/// State shared between a session and its in-flight requests
pub type SharedState = Arc<Mutex<StudioState>>;
