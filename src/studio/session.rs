//! A studio session: owns the state and wires intake to orchestration

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::traits::{EncodedImage, GenerativeBackend};
use crate::config::StudioConfig;
use crate::error::Result;
use crate::intake::{CandidateFile, DragEvent, DragOutcome, ImageSlot, ImageUploader};
use crate::studio::image::ImageOrchestrator;
use crate::studio::prompt::PromptOrchestrator;
use crate::studio::state::{SharedState, StudioState};
use crate::studio::style::{StyleSelection, StyleUpdate};
use crate::studio::view::StudioView;

/// One user's studio
pub struct StudioSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    state: SharedState,
    product: tokio::sync::Mutex<ImageUploader>,
    style_reference: tokio::sync::Mutex<ImageUploader>,
    prompts: PromptOrchestrator,
    images: ImageOrchestrator,
}

impl StudioSession {
    /// Create a session and schedule its first prompt.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(backend: Arc<dyn GenerativeBackend>, config: &StudioConfig) -> Self {
        let id = Uuid::new_v4();
        let state: SharedState = Arc::new(Mutex::new(StudioState::default()));

        let session = Self {
            id,
            created_at: Utc::now(),
            prompts: PromptOrchestrator::new(id, backend.clone(), state.clone(), config.debounce()),
            images: ImageOrchestrator::new(id, backend, state.clone()),
            state,
            product: tokio::sync::Mutex::new(ImageUploader::new(ImageSlot::Product)),
            style_reference: tokio::sync::Mutex::new(ImageUploader::new(ImageSlot::StyleReference)),
        };

        info!(session = %id, "Studio session created");
        session.prompts.schedule();
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> StudioState {
        self.state.lock().clone()
    }

    /// Change one style field
    pub fn update_style(&self, update: StyleUpdate) -> StyleSelection {
        let (changed, style) = {
            let mut state = self.state.lock();
            let changed = state.style.apply(update);
            (changed, state.style)
        };

        debug!(session = %self.id, ?update, changed, "Style updated");
        if changed {
            self.prompts.schedule();
        }
        style
    }

    fn uploader(&self, slot: ImageSlot) -> &tokio::sync::Mutex<ImageUploader> {
        match slot {
            ImageSlot::Product => &self.product,
            ImageSlot::StyleReference => &self.style_reference,
        }
    }

    /// File selection for a slot; `None` clears it. Returns whether an image was accepted
    pub async fn select_image(&self, slot: ImageSlot, file: Option<CandidateFile>) -> bool {
        let mut uploader = self.uploader(slot).lock().await;
        let image = uploader.select(file).await;
        let accepted = image.is_some();
        self.set_image(slot, image);
        accepted
    }

    /// Drag-and-drop on a slot
    pub async fn drag(&self, slot: ImageSlot, event: DragEvent) -> DragOutcome {
        let mut uploader = self.uploader(slot).lock().await;
        let outcome = uploader.handle_drag(event).await;
        if let DragOutcome::Intake(image) = &outcome {
            self.set_image(slot, image.clone());
        }
        outcome
    }

    fn set_image(&self, slot: ImageSlot, image: Option<EncodedImage>) {
        let reference_changed = {
            let mut state = self.state.lock();
            match slot {
                ImageSlot::Product => {
                    state.product_image = image;
                    false
                }
                ImageSlot::StyleReference => {
                    let changed = state.style_reference != image;
                    state.style_reference = image;
                    changed
                }
            }
        };

        if reference_changed {
            self.prompts.schedule();
        }
    }

    /// Generate the product photo from the current inputs
    pub async fn generate_image(&self) -> Result<String> {
        self.images.generate().await
    }

    /// Whether a prompt request is waiting for the quiet period
    pub fn prompt_pending(&self) -> bool {
        self.prompts.is_pending()
    }

    /// Render the current view
    pub async fn view(&self) -> StudioView {
        let product = self.product.lock().await;
        let style_reference = self.style_reference.lock().await;
        let state = self.state.lock();
        StudioView::render(self.id, self.created_at, &state, &product, &style_reference)
    }

    /// Stop scheduled work; in-flight requests still finish
    pub fn close(&self) {
        self.prompts.cancel();
        info!(session = %self.id, "Studio session closed");
    }
}
