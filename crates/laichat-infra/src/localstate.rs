//! Client-local state file.
//!
//! One JSON document at `{data_dir}/state.json` holding the local user
//! identity, the date-keyed daily-quote cache, and client settings.
//! Reads are lenient: a missing or corrupt file degrades to defaults so
//! the client never refuses to start over its own cache.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use laichat_types::client::{ClientSettings, ClientState, DailyQuoteCache};
use laichat_types::quote::Quote;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state file io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Handle on the state file. Stateless between calls; every operation
/// reads the file fresh and writes it back whole.
#[derive(Debug, Clone)]
pub struct LocalState {
    path: PathBuf,
}

impl LocalState {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("state.json"),
        }
    }

    /// Read the state file, tolerating absence and corruption.
    pub async fn load(&self) -> ClientState {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return ClientState::default();
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to read {}: {err}, starting with empty state",
                    self.path.display()
                );
                return ClientState::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, starting with empty state",
                    self.path.display()
                );
                ClientState::default()
            }
        }
    }

    async fn save(&self, state: &ClientState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Return the local user id, minting and persisting one on first use.
    pub async fn ensure_user_id(&self) -> Result<Uuid, StateError> {
        let mut state = self.load().await;
        if let Some(id) = state.user_id {
            return Ok(id);
        }

        let id = Uuid::now_v7();
        state.user_id = Some(id);
        self.save(&state).await?;
        tracing::debug!(user_id = %id, "Provisioned local user identity");
        Ok(id)
    }

    /// Return the cached daily quote if one is stored for `date`.
    /// A cache entry from any other date is stale and ignored.
    pub async fn cached_quote(&self, date: NaiveDate) -> Option<Quote> {
        let state = self.load().await;
        state
            .daily_quote
            .filter(|cache| cache.date == date)
            .map(|cache| cache.quote)
    }

    /// Replace the daily-quote cache entry.
    pub async fn cache_quote(&self, date: NaiveDate, quote: &Quote) -> Result<(), StateError> {
        let mut state = self.load().await;
        state.daily_quote = Some(DailyQuoteCache {
            date,
            quote: quote.clone(),
        });
        self.save(&state).await
    }

    pub async fn settings(&self) -> ClientSettings {
        self.load().await.settings
    }

    pub async fn update_settings(&self, settings: ClientSettings) -> Result<(), StateError> {
        let mut state = self.load().await;
        state.settings = settings;
        self.save(&state).await
    }
}
