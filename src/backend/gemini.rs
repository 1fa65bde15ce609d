//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::traits::{ContentPart, EncodedImage, GenerativeBackend};
use crate::config::GeminiConfig;
use crate::error::{AppError, Result};

/// Longest upstream error body kept in error messages
const MAX_ERROR_BODY: usize = 512;

/// Gemini-backed text and image generation
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// A part in a Gemini request or response - text or inline data
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
    #[serde(default, skip_serializing)]
    thought: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

impl From<ContentPart> for GeminiPart {
    fn from(part: ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => GeminiPart {
                text: Some(text),
                ..Default::default()
            },
            ContentPart::InlineData(image) => GeminiPart {
                inline_data: Some(GeminiInlineData {
                    mime_type: image.media_type,
                    data: image.payload,
                }),
                ..Default::default()
            },
        }
    }
}

impl GeminiPart {
    fn into_content_part(self) -> Option<ContentPart> {
        if let Some(inline) = self.inline_data {
            return Some(ContentPart::InlineData(EncodedImage::new(
                inline.data,
                inline.mime_type,
            )));
        }
        self.text.map(ContentPart::Text)
    }
}

impl GeminiRequest {
    fn new(parts: Vec<ContentPart>, response_modalities: Option<Vec<String>>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: parts.into_iter().map(GeminiPart::from).collect(),
            }],
            generation_config: response_modalities
                .map(|response_modalities| GenerationConfig { response_modalities }),
        }
    }
}

impl GeminiResponse {
    /// Reject prompts the service refused outright
    fn check_blocked(&self) -> Result<()> {
        if let Some(ref feedback) = self.prompt_feedback {
            if let Some(ref reason) = feedback.block_reason {
                let message = feedback
                    .block_reason_message
                    .clone()
                    .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
                return Err(AppError::BackendError(message));
            }
        }
        Ok(())
    }

    fn into_first_candidate(self) -> Option<GeminiCandidate> {
        self.candidates.into_iter().next()
    }
}

impl GeminiBackend {
    /// Create a new Gemini backend from configuration
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Gemini API key is not set".to_string(),
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse> {
        let url = self.endpoint(model);
        debug!(
            model = %model,
            parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model = %model, status = %status, "generateContent failed");
            return Err(Self::parse_error(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = response.json().await?;
        parsed.check_blocked()?;
        Ok(parsed)
    }

    fn parse_error(status: u16, body: &str) -> AppError {
        let mut message = body.trim().to_string();
        if message.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
            message.push_str("...");
        }

        match status {
            401 | 403 => AppError::AuthenticationFailed(message),
            429 => AppError::RateLimitExceeded,
            _ => AppError::BackendError(format!("Gemini returned {}: {}", status, message)),
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_text(&self, parts: Vec<ContentPart>) -> Result<String> {
        let request = GeminiRequest::new(parts, None);
        let response = self.generate_content(&self.text_model, &request).await?;

        let candidate = response
            .into_first_candidate()
            .ok_or_else(|| AppError::BackendError("No candidates in Gemini response".to_string()))?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }

    async fn generate_image(&self, parts: Vec<ContentPart>) -> Result<Vec<ContentPart>> {
        let request = GeminiRequest::new(parts, Some(vec!["IMAGE".to_string()]));
        let response = self.generate_content(&self.image_model, &request).await?;

        let Some(candidate) = response.into_first_candidate() else {
            return Ok(Vec::new());
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if matches!(
                reason,
                "SAFETY"
                    | "IMAGE_SAFETY"
                    | "IMAGE_PROHIBITED_CONTENT"
                    | "PROHIBITED_CONTENT"
                    | "BLOCKLIST"
                    | "RECITATION"
                    | "IMAGE_RECITATION"
            ) {
                return Err(AppError::BackendError(format!(
                    "Content blocked by Gemini safety filter: {}",
                    reason
                )));
            }
        }

        Ok(candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| !part.thought)
                    .filter_map(GeminiPart::into_content_part)
                    .collect()
            })
            .unwrap_or_default())
    }
}
