//! HTTP transport for the chat client.
//!
//! [`HttpCompletionTransport`] posts chat turns to the gateway's
//! `/api/chat` endpoint and exposes the raw streaming body to the session
//! controller. Gateway refusals arrive as JSON `{"error": "..."}` bodies;
//! a missing-credential refusal is distinguished so the controller can
//! surface the configuration message instead of a generic failure.

use std::time::Duration;

use futures_util::StreamExt;
use laichat_core::session::{ByteStream, CompletionTransport, TransportError};
use laichat_types::turn::ChatRequest;
use tokio_util::sync::CancellationToken;

/// Opens streaming chat turns against a Laichat gateway over HTTP.
#[derive(Clone)]
pub struct HttpCompletionTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCompletionTransport {
    /// Create a transport targeting the gateway at `base_url`
    /// (e.g., "http://127.0.0.1:8080").
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min ceiling for long turns
            .build()
            .expect("failed to create reqwest client");

        Self { client, base_url }
    }
}

/// Extract the error message from a gateway refusal body and classify it.
fn classify_refusal(status: reqwest::StatusCode, body: &str) -> TransportError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string());

    if message.contains("API Key") {
        TransportError::Configuration(message)
    } else {
        TransportError::Rejected(format!("HTTP {status}: {message}"))
    }
}

impl CompletionTransport for HttpCompletionTransport {
    async fn open(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> Result<ByteStream, TransportError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));

        let send = self.client.post(&url).json(&request).send();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(TransportError::Cancelled),
            result = send => result.map_err(|e| TransportError::Connect(e.to_string()))?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_refusal(status, &body));
        }

        let mut body = response.bytes_stream();
        let stream = async_stream::stream! {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        yield Err(TransportError::Cancelled);
                        break;
                    }
                    chunk = body.next() => match chunk {
                        Some(Ok(bytes)) => yield Ok(bytes.to_vec()),
                        Some(Err(e)) => {
                            yield Err(TransportError::Stream(e.to_string()));
                            break;
                        }
                        None => break,
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_refusal_missing_key_is_configuration() {
        let err = classify_refusal(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "API Key missing"}"#,
        );
        assert!(matches!(err, TransportError::Configuration(_)));
    }

    #[test]
    fn test_classify_refusal_other_error_is_rejected() {
        let err = classify_refusal(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "Failed to get response from AI"}"#,
        );
        match err {
            TransportError::Rejected(message) => {
                assert!(message.contains("Failed to get response from AI"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_refusal_plain_body_falls_through() {
        let err = classify_refusal(reqwest::StatusCode::BAD_GATEWAY, "Bad Gateway");
        match err {
            TransportError::Rejected(message) => {
                assert!(message.contains("502"));
                assert!(message.contains("Bad Gateway"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
