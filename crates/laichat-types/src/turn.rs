//! Wire types for the completion gateway.
//!
//! `Turn` is the history element exchanged between client and gateway and
//! forwarded (sanitized) to the completion service. `TurnPayload` models
//! the outbound message as a tagged union instead of an untyped
//! text-or-parts value: a bare string when there are no attachments, an
//! ordered part list when there are.

use serde::{Deserialize, Serialize};

use crate::conversation::Role;

/// One role-tagged unit of conversation history on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<TurnPart>,
}

impl Turn {
    /// Construct a single-part text turn.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![TurnPart { text: text.into() }],
        }
    }

    /// Concatenated text of all parts.
    pub fn joined_text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// A text fragment within a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPart {
    pub text: String,
}

/// A file attached to a chat request. `data` is base64-encoded; the
/// gateway forwards it inline without decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub data: Option<String>,
}

/// Request body accepted by the completion gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default)]
    pub files: Option<Vec<FileAttachment>>,
}

/// The outbound turn handed to the completion service.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnPayload {
    /// Bare message text (no attachments).
    Text(String),
    /// Multimodal part list: optional leading text, then inline data.
    Parts(Vec<PayloadPart>),
}

/// One element of a multimodal payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadPart {
    Text(String),
    InlineData { mime_type: String, data: String },
}

impl TurnPayload {
    /// Build the payload from a message and its attachments.
    ///
    /// With no attachments the payload is the bare message text. Otherwise
    /// it is a part list: a leading text part when the message is
    /// non-empty, then one inline-data part per valid file. A file is
    /// valid iff it carries both `data` and `mimeType`; invalid files are
    /// silently skipped.
    pub fn build(message: &str, files: Option<&[FileAttachment]>) -> Self {
        let files = match files {
            Some(files) if !files.is_empty() => files,
            _ => return TurnPayload::Text(message.to_string()),
        };

        let mut parts = Vec::with_capacity(files.len() + 1);
        if !message.is_empty() {
            parts.push(PayloadPart::Text(message.to_string()));
        }
        for file in files {
            if let (Some(data), Some(mime_type)) = (&file.data, &file.mime_type) {
                parts.push(PayloadPart::InlineData {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                });
            }
        }
        TurnPayload::Parts(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(mime: Option<&str>, data: Option<&str>) -> FileAttachment {
        FileAttachment {
            name: "photo.png".to_string(),
            mime_type: mime.map(String::from),
            data: data.map(String::from),
        }
    }

    #[test]
    fn test_payload_without_files_is_bare_text() {
        let payload = TurnPayload::build("hi", None);
        assert_eq!(payload, TurnPayload::Text("hi".to_string()));

        let payload = TurnPayload::build("hi", Some(&[]));
        assert_eq!(payload, TurnPayload::Text("hi".to_string()));
    }

    #[test]
    fn test_payload_with_file_and_message_leads_with_text() {
        let files = [attachment(Some("image/png"), Some("aGVsbG8="))];
        let payload = TurnPayload::build("look at this", Some(&files));

        let TurnPayload::Parts(parts) = payload else {
            panic!("expected parts payload");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], PayloadPart::Text("look at this".to_string()));
        assert_eq!(
            parts[1],
            PayloadPart::InlineData {
                mime_type: "image/png".to_string(),
                data: "aGVsbG8=".to_string(),
            }
        );
    }

    #[test]
    fn test_payload_empty_message_has_no_text_part() {
        let files = [attachment(Some("image/jpeg"), Some("Zm9v"))];
        let payload = TurnPayload::build("", Some(&files));

        let TurnPayload::Parts(parts) = payload else {
            panic!("expected parts payload");
        };
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], PayloadPart::InlineData { .. }));
    }

    #[test]
    fn test_payload_skips_files_missing_data_or_mime() {
        let files = [
            attachment(Some("image/png"), None),
            attachment(None, Some("Zm9v")),
            attachment(Some("image/png"), Some("YmFy")),
        ];
        let payload = TurnPayload::build("msg", Some(&files));

        let TurnPayload::Parts(parts) = payload else {
            panic!("expected parts payload");
        };
        // Text part plus the single valid file.
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1],
            PayloadPart::InlineData {
                mime_type: "image/png".to_string(),
                data: "YmFy".to_string(),
            }
        );
    }

    #[test]
    fn test_chat_request_accepts_camel_case_files() {
        let body = r#"{
            "message": "hi",
            "history": [{"role": "user", "parts": [{"text": "earlier"}]}],
            "files": [{"name": "a.png", "mimeType": "image/png", "data": "Zm9v"}]
        }"#;
        let request: ChatRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.message, "hi");
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.history[0].role, Role::User);
        let files = request.files.unwrap();
        assert_eq!(files[0].mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_chat_request_defaults_optional_fields() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(request.history.is_empty());
        assert!(request.files.is_none());
    }

    #[test]
    fn test_turn_joined_text() {
        let turn = Turn {
            role: Role::Model,
            parts: vec![
                TurnPart {
                    text: "Na dam".to_string(),
                },
                TurnPart {
                    text: " maw?".to_string(),
                },
            ],
        };
        assert_eq!(turn.joined_text(), "Na dam maw?");
    }
}
