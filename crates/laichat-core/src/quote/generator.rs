//! LLM-backed quote generation.
//!
//! Asks the completion provider for a fresh bilingual quote as strict
//! JSON, tolerating the Markdown code fences models like to wrap JSON
//! in. Selection of when to regenerate (daily cache, explicit refresh)
//! is the caller's policy, not handled here.

use chrono::Utc;
use laichat_types::error::QuoteError;
use laichat_types::quote::{Quote, QuoteDraft};

use crate::provider::CompletionProvider;

/// Instruction sent verbatim to the completion provider.
const GENERATION_PROMPT: &str = r#"Generate a UNIQUE, short, inspiring, and positive quote in English and translate it to Lai Hakha (Chin).
Avoid common or overused quotes. Make it fresh and impactful.

STRICT OUTPUT FORMAT (JSON ONLY):
{
    "text": "English quote here",
    "translation": "Lai Hakha translation here",
    "author": "Author Name"
}

Ensure the translation uses deep, respectful Lai Hakha vocabulary as per your system instructions."#;

/// Generates quotes through a completion provider.
pub struct QuoteGenerator<P: CompletionProvider> {
    provider: P,
}

impl<P: CompletionProvider> QuoteGenerator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Ask the provider for a fresh quote.
    ///
    /// The generated id is the current timestamp in milliseconds, which
    /// keeps it distinct from the catalog's small fixed ids.
    pub async fn generate(&self) -> Result<Quote, QuoteError> {
        let raw = self
            .provider
            .complete(GENERATION_PROMPT)
            .await
            .map_err(|e| QuoteError::Generation(e.to_string()))?;

        let cleaned = strip_code_fences(&raw);
        let draft: QuoteDraft =
            serde_json::from_str(&cleaned).map_err(|e| QuoteError::Parse(e.to_string()))?;

        Ok(Quote {
            id: Utc::now().timestamp_millis(),
            text: draft.text,
            translation: draft.translation,
            author: draft.author,
        })
    }
}

/// Remove Markdown code-fence wrapping from a model reply.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}
