//! Client-local persisted state.
//!
//! The chat client keeps one JSON file in the data directory holding its
//! local identity, the date-keyed daily-quote cache, and the settings
//! blob. This is client state, deliberately segregated from the server
//! database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quote::Quote;

/// User-tunable client settings. One flag today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_show_quote_ticker")]
    pub show_quote_ticker: bool,
}

fn default_show_quote_ticker() -> bool {
    true
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            show_quote_ticker: default_show_quote_ticker(),
        }
    }
}

/// A cached quote valid for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyQuoteCache {
    pub date: NaiveDate,
    pub quote: Quote,
}

/// The whole client-local state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientState {
    /// Local identity; provisioned on first use.
    pub user_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_quote: Option<DailyQuoteCache>,
    #[serde(default)]
    pub settings: ClientSettings,
}
