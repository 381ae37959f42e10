//! Summarization provider abstraction and the Cohere-backed client.
//!
//! The prompt is built locally from the extracted text and a length directive; only the first
//! [`MAX_PROMPT_CHARS`] characters of the text are sent. Long documents are not chunked.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::models::SummaryLength;

pub const MAX_PROMPT_CHARS: usize = 12_000;

const PROMPT_INSTRUCTION: &str = "Summarize the following document.";

/// Errors surfaced by a summarization provider.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Any provider-side failure: transport, auth, quota or an undecodable response.
    #[error("Cohere error: {0}")]
    Provider(String),
    /// The provider cannot summarise raw images; images go through OCR first.
    #[error("Image summarization not supported with Cohere yet.")]
    ImageUnsupported,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizerError>;

    async fn summarize_image(
        &self,
        _image_data: &[u8],
        _length: SummaryLength,
    ) -> Result<String, SummarizerError> {
        Err(SummarizerError::ImageUnsupported)
    }
}

/// Returns at most the first `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn build_prompt(text: &str, length: SummaryLength) -> String {
    format!(
        "{}\nStyle: {}\n\n{}",
        PROMPT_INSTRUCTION,
        length.style(),
        truncate_chars(text, MAX_PROMPT_CHARS)
    )
}

pub struct CohereClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CohereClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder()
            .user_agent(concat!("docsum/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SummarizerError::Provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl Summarizer for CohereClient {
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizerError> {
        let prompt = build_prompt(text, length);

        tracing::debug!(
            model = %self.model,
            length = length.as_str(),
            prompt_chars = prompt.chars().count(),
            "Sending summarization request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "message": prompt,
            }))
            .send()
            .await
            .map_err(|e| SummarizerError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Provider(format!("{status}: {}", body.trim())));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::Provider(format!("malformed response: {e}")))?;

        Ok(body.text.unwrap_or_default().trim().to_string())
    }
}
