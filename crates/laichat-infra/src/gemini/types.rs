//! Wire types for the Gemini `generateContent` API.
//!
//! Request types serialize to the camelCase JSON the API expects; response
//! types model only the fields the client reads. The same response shape
//! is used for one-shot bodies and for individual SSE stream chunks.

use laichat_types::turn::{PayloadPart, Turn, TurnPayload};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One role-tagged content entry. Roles are "user" or "model".
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// A single content part: text, or inline binary data for attachments.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Base64-encoded file content, forwarded as received.
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Map sanitized history turns onto Gemini content entries.
pub fn contents_from_history(history: &[Turn]) -> Vec<Content> {
    history
        .iter()
        .map(|turn| Content {
            role: turn.role.to_string(),
            parts: turn
                .parts
                .iter()
                .map(|part| Part::Text {
                    text: part.text.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Build the outbound user content entry from a turn payload.
pub fn content_from_payload(payload: &TurnPayload) -> Content {
    let parts = match payload {
        TurnPayload::Text(text) => vec![Part::Text { text: text.clone() }],
        TurnPayload::Parts(parts) => parts
            .iter()
            .map(|part| match part {
                PayloadPart::Text(text) => Part::Text { text: text.clone() },
                PayloadPart::InlineData { mime_type, data } => Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.clone(),
                        data: data.clone(),
                    },
                },
            })
            .collect(),
    };

    Content {
        role: "user".to_string(),
        parts,
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Absent when generation was blocked (e.g. finishReason SAFETY).
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Finish reason of the first candidate, when present.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
    }
}
