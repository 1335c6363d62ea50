//! SSE stream adapter for the Gemini `streamGenerateContent` endpoint.
//!
//! With `alt=sse` the API frames each incremental response as one SSE
//! event whose `data` field is a full `GenerateContentResponse` JSON
//! body. Events arrive until the final chunk carries a `finishReason`;
//! there is no terminal sentinel event.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use laichat_types::completion::{CompletionError, StreamEvent};

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Map a non-success response to a [`CompletionError`], reading the error
/// body for context. Shared by the one-shot and streaming paths.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, CompletionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    tracing::warn!(status = %status, body = %error_body, "Gemini API error response");
    Err(match status.as_u16() {
        400 => CompletionError::InvalidRequest(error_body),
        401 | 403 => CompletionError::AuthenticationFailed,
        429 => CompletionError::RateLimited {
            retry_after_ms: None,
        },
        _ => CompletionError::Provider {
            message: format!("HTTP {status}: {error_body}"),
        },
    })
}

/// Create a streaming connection to the Gemini API.
///
/// Sends the HTTP request, checks the response status, then reads the SSE
/// body. Each event's data payload is parsed as a response chunk and its
/// text emitted as a [`StreamEvent::TextDelta`].
///
/// # Arguments
///
/// * `client` - Shared reqwest HTTP client
/// * `url` - Full streaming URL (e.g., `.../model:streamGenerateContent?alt=sse`)
/// * `body` - Serialized request
/// * `api_key` - API key wrapped in SecretString
pub fn create_gemini_stream(
    client: &reqwest::Client,
    url: &str,
    body: GenerateContentRequest,
    api_key: &secrecy::SecretString,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, CompletionError>> + Send + 'static>> {
    let client = client.clone();
    let url = url.to_string();
    let api_key_str = secrecy::ExposeSecret::expose_secret(api_key).to_string();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .header("x-goog-api-key", &api_key_str)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let response = check_status(response).await?;

        yield StreamEvent::Connected;

        let mut events = response.bytes_stream().eventsource();

        while let Some(event_result) = events.next().await {
            let event = event_result
                .map_err(|e| CompletionError::Stream(format!("SSE read: {e}")))?;

            let chunk: GenerateContentResponse = serde_json::from_str(&event.data)
                .map_err(|e| CompletionError::Deserialization(format!("stream chunk: {e}")))?;

            let text = chunk.text();
            if !text.is_empty() {
                yield StreamEvent::TextDelta { text };
            }

            if chunk.finish_reason().is_some() {
                break;
            }
        }

        yield StreamEvent::Done;
    })
}
