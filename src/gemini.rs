//! Gemini `generateContent` client and the analyzer trait the endpoint calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::encoder::EncodedImage;
use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Instruction sent ahead of every image.
pub const ANALYSIS_PROMPT: &str = "Analyze this image and describe what you see in detail. \
    Include objects, people, activities, colors, and any other notable features.";

/// Produces a free-text description of one image.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn describe(&self, image: &EncodedImage) -> Result<String>;

    fn model_name(&self) -> &str;
}

/// Talks to the Gemini REST API. One outbound call per `describe`, no retries.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: &'a EncodedImage,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    fn into_text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(Error::ExternalService(format!(
                "Response was blocked: {}",
                reason
            )));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
            return Err(Error::ExternalService(format!(
                "No text in response (finish reason: {})",
                reason
            )));
        }

        Ok(text)
    }
}

/// Pulls `error.message` out of a Google error body, or falls back to the raw body.
fn provider_error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => format!("API Error {}: {}", status, body),
    }
}

#[async_trait]
impl ImageAnalyzer for GeminiClient {
    async fn describe(&self, image: &EncodedImage) -> Result<String> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: ANALYSIS_PROMPT,
                    },
                    Part::InlineData { inline_data: image },
                ],
            }],
        };

        info!(model = %self.model, mime_type = %image.mime_type, "Sending request to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let preview: String = body.chars().take(500).collect();
        debug!(%status, body = %preview, "Gemini response");

        if !status.is_success() {
            let message = provider_error_message(status, &body);
            warn!(%status, %message, "Gemini request failed");
            return Err(Error::ExternalService(message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| Error::ExternalService(format!("Malformed response: {}", e)))?;

        let text = parsed.into_text()?;
        info!(bytes = text.len(), "Received analysis from Gemini");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
