//! Daily quote types.

use serde::{Deserialize, Serialize};

/// An inspirational quote with its Lai Hakha translation.
///
/// Catalog entries carry small fixed ids; generated quotes get a
/// synthetic id from the generation timestamp (millis).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub translation: String,
    pub author: String,
}

/// The raw shape emitted by the completion service when asked for a
/// quote; the generator stamps the id.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteDraft {
    pub text: String,
    pub translation: String,
    pub author: String,
}
