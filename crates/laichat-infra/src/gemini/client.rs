//! GeminiClient -- concrete [`CompletionProvider`] implementation for Google Gemini.
//!
//! Sends requests to the Gemini `generateContent` API with the persona
//! system instruction attached to every call. Supports both non-streaming
//! (`complete`) and streaming (`stream_turn`) modes.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output. It travels in the `x-goog-api-key`
//! header rather than in the URL so it cannot leak through request logs.

use std::pin::Pin;
use std::time::Duration;

use futures_util::Stream;
use secrecy::{ExposeSecret, SecretString};

use laichat_core::provider::CompletionProvider;
use laichat_types::completion::{CompletionError, StreamEvent};
use laichat_types::turn::{Turn, TurnPayload};

use super::streaming::{check_status, create_gemini_stream};
use super::types::{
    contents_from_history, content_from_payload, Content, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part, SystemInstruction,
};

/// The persona system instruction sent with every request.
const SYSTEM_PROMPT: &str = include_str!("persona.md");

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google Gemini completion provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. It never appears in Debug output,
/// Display output, or tracing logs.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    temperature: f64,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash")
    /// * `temperature` - Sampling temperature for every request
    pub fn new(api_key: SecretString, model: String, temperature: f64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min timeout for long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            temperature,
        }
    }

    /// The configured model for this client.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a model action.
    fn url(&self, action: &str) -> String {
        format!("{}/{}:{}", self.base_url, self.model, action)
    }

    /// Assemble a request from sanitized history plus the outbound turn.
    fn chat_request(&self, history: &[Turn], payload: &TurnPayload) -> GenerateContentRequest {
        let mut contents = contents_from_history(history);
        contents.push(content_from_payload(payload));

        GenerateContentRequest {
            contents,
            system_instruction: Some(SystemInstruction::from_text(SYSTEM_PROMPT)),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
            }),
        }
    }
}

// No Debug impl: the client holds the API key.

impl CompletionProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Some(SystemInstruction::from_text(SYSTEM_PROMPT)),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
            }),
        };
        let url = self.url("generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let response = check_status(response).await?;

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            CompletionError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        Ok(payload.text())
    }

    fn stream_turn(
        &self,
        history: Vec<Turn>,
        payload: TurnPayload,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, CompletionError>> + Send + 'static>> {
        let body = self.chat_request(&history, &payload);
        let url = format!("{}?alt=sse", self.url("streamGenerateContent"));

        create_gemini_stream(&self.client, &url, body, &self.api_key)
    }
}
