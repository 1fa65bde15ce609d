//! Image orchestration: user-triggered product photo generation

use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::backend::traits::{ContentPart, EncodedImage, GenerativeBackend};
use crate::error::{AppError, Result};
use crate::studio::state::SharedState;

/// Banner shown when generation is attempted without its inputs
pub const MISSING_INPUTS_MESSAGE: &str = "Please upload a product image and ensure a prompt is generated.";

/// Banner shown when the image model call fails
pub const IMAGE_FAILURE_MESSAGE: &str = "Failed to generate image. Check the server logs for details.";

/// Product image, prompt, then the optional style reference
pub fn build_image_parts(
    product: &EncodedImage,
    prompt: &str,
    reference: Option<&EncodedImage>,
) -> Vec<ContentPart> {
    let mut parts = vec![
        ContentPart::InlineData(product.clone()),
        ContentPart::text(prompt),
    ];
    if let Some(reference) = reference {
        parts.push(ContentPart::InlineData(reference.clone()));
    }
    parts
}

/// Data URL of the first inline image among `parts`
pub fn extract_image(parts: &[ContentPart]) -> Result<String> {
    parts
        .iter()
        .find_map(ContentPart::as_image)
        .map(EncodedImage::to_data_url)
        .ok_or(AppError::NoImageProduced)
}

/// Runs image generation for one session
pub struct ImageOrchestrator {
    session_id: Uuid,
    backend: Arc<dyn GenerativeBackend>,
    state: SharedState,
}

impl ImageOrchestrator {
    pub fn new(session_id: Uuid, backend: Arc<dyn GenerativeBackend>, state: SharedState) -> Self {
        Self {
            session_id,
            backend,
            state,
        }
    }

    /// Generate an image from the current inputs, returning its data URL
    pub async fn generate(&self) -> Result<String> {
        let (product, prompt, reference) = {
            let mut state = self.state.lock();
            if state.image_loading {
                return Err(AppError::GenerationInProgress);
            }
            let product = match state.product_image.clone() {
                Some(product) if !state.prompt.is_empty() => product,
                _ => {
                    state.error = Some(MISSING_INPUTS_MESSAGE.to_string());
                    return Err(AppError::InvalidRequest(MISSING_INPUTS_MESSAGE.to_string()));
                }
            };

            state.generated_image = None;
            state.error = None;
            state.image_loading = true;
            (product, state.prompt.clone(), state.style_reference.clone())
        };

        let session_id = self.session_id;
        let backend = self.backend.clone();
        let state = self.state.clone();

        // Runs detached so the flags settle even if the caller goes away.
        let task = tokio::spawn(async move {
            let parts = build_image_parts(&product, &prompt, reference.as_ref());
            let result = match backend.generate_image(parts).await {
                Ok(parts) => extract_image(&parts),
                Err(e) => Err(e),
            };

            let mut state = state.lock();
            state.image_loading = false;
            match &result {
                Ok(data_url) => {
                    info!(session = %session_id, bytes = data_url.len(), "Image generated");
                    state.generated_image = Some(data_url.clone());
                }
                Err(e) => {
                    error!(session = %session_id, error = %e, "Error generating image");
                    state.error = Some(IMAGE_FAILURE_MESSAGE.to_string());
                }
            }
            result
        });

        task.await
            .map_err(|e| AppError::Internal(format!("Image generation task failed: {}", e)))?
    }
}
