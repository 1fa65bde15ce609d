//! Prompt orchestration: debounced, sequenced prompt generation

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::backend::traits::{ContentPart, EncodedImage, GenerativeBackend};
use crate::queue::{Debouncer, RequestSequencer};
use crate::studio::state::SharedState;
use crate::studio::style::StyleSelection;

/// Banner shown when the latest prompt request fails
pub const PROMPT_FAILURE_MESSAGE: &str = "Failed to generate prompt.";

const INTRO: &str = "Generate a super-detailed, professional photography prompt for an AI image generator. The goal is to create a photorealistic shot of a product.";
const DIRECTIVES_HEADER: &str = "\n**Key Directives:**\n";
const TASK_HEADER: &str = "\n**Task:**\n";
const TASK_LEAD: &str = "Based on the directives above";
const OUTPUT_RULES: &str = "The final prompt should be a single, cohesive paragraph that describes the desired image in vivid detail. Do not add any conversational text, just output the prompt itself.";

/// Build the text-model request for a style selection.
///
/// Every line is its own text part. With a reference image the task also asks
/// the model to describe the reference's look, and the image is attached last.
pub fn build_prompt_parts(
    style: &StyleSelection,
    reference: Option<&EncodedImage>,
) -> Vec<ContentPart> {
    let mut parts = vec![
        ContentPart::text(INTRO),
        ContentPart::text(DIRECTIVES_HEADER),
        ContentPart::text(format!("- Aspect Ratio: {}\n", style.aspect_ratio)),
        ContentPart::text(format!("- Lighting Style: {}\n", style.lighting_style)),
        ContentPart::text(format!("- Camera Perspective: {}\n", style.camera_perspective)),
        ContentPart::text(TASK_HEADER),
        ContentPart::text(TASK_LEAD),
    ];

    match reference {
        Some(image) => {
            parts.push(ContentPart::text(format!(
                " and the style of the provided reference image, create a prompt. Describe the reference image's key visual elements (e.g., color palette, mood, textures, composition, background) and incorporate them into the final prompt. {}",
                OUTPUT_RULES
            )));
            parts.push(ContentPart::InlineData(image.clone()));
        }
        None => {
            parts.push(ContentPart::text(format!(", create a prompt. {}", OUTPUT_RULES)));
        }
    }

    parts
}

/// Watches style and reference changes and keeps the prompt current
pub struct PromptOrchestrator {
    session_id: Uuid,
    backend: Arc<dyn GenerativeBackend>,
    state: SharedState,
    sequencer: Arc<RequestSequencer>,
    debouncer: Debouncer,
}

impl PromptOrchestrator {
    pub fn new(
        session_id: Uuid,
        backend: Arc<dyn GenerativeBackend>,
        state: SharedState,
        quiet_period: Duration,
    ) -> Self {
        Self {
            session_id,
            backend,
            state,
            sequencer: Arc::new(RequestSequencer::new()),
            debouncer: Debouncer::new(quiet_period),
        }
    }

    /// Note an observed change; the request goes out once input is quiet
    pub fn schedule(&self) {
        debug!(
            session = %self.session_id,
            delay_ms = self.debouncer.quiet_period().as_millis() as u64,
            "Scheduling prompt generation"
        );
        self.debouncer.schedule(Self::run(
            self.session_id,
            self.backend.clone(),
            self.state.clone(),
            self.sequencer.clone(),
        ));
    }

    /// Drop any pending request; requests already sent still complete
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    async fn run(
        session_id: Uuid,
        backend: Arc<dyn GenerativeBackend>,
        state: SharedState,
        sequencer: Arc<RequestSequencer>,
    ) {
        let seq = sequencer.issue();
        let (style, reference) = {
            let mut state = state.lock();
            state.prompt_loading = true;
            state.error = None;
            (state.style, state.style_reference.clone())
        };

        debug!(
            session = %session_id,
            seq,
            with_reference = reference.is_some(),
            "Requesting prompt"
        );
        let result = backend
            .generate_text(build_prompt_parts(&style, reference.as_ref()))
            .await;

        let mut state = state.lock();
        if !sequencer.is_current(seq) {
            debug!(
                session = %session_id,
                seq,
                latest = sequencer.latest(),
                "Discarding stale prompt response"
            );
            return;
        }

        state.prompt_loading = false;
        match result {
            Ok(prompt) => {
                info!(session = %session_id, seq, chars = prompt.len(), "Prompt generated");
                state.prompt = prompt;
            }
            Err(e) => {
                error!(session = %session_id, seq, error = %e, "Error generating prompt");
                state.error = Some(PROMPT_FAILURE_MESSAGE.to_string());
            }
        }
    }
}
