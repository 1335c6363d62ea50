//! Shared application state wiring services to their SQLite backends.

use std::path::PathBuf;
use std::sync::Arc;

use laichat_core::chat::service::ConversationService;
use laichat_core::profile::ProfileService;
use laichat_infra::config::{load_global_config, resolve_api_key, resolve_data_dir};
use laichat_infra::gemini::GeminiClient;
use laichat_infra::localstate::LocalState;
use laichat_infra::sqlite::pool::database_url;
use laichat_infra::sqlite::{DatabasePool, SqliteConversationRepository, SqliteProfileRepository};

/// Concrete service types used by the application.
pub type ConcreteConversationService = ConversationService<SqliteConversationRepository>;
pub type ConcreteProfileService = ProfileService<SqliteProfileRepository>;

/// Application state shared across HTTP handlers and CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<ConcreteConversationService>,
    pub profiles: Arc<ConcreteProfileService>,
    /// Completion provider; `None` when no API key was resolvable at
    /// startup. Routes that need it fail closed per request.
    pub provider: Option<GeminiClient>,
    pub config: laichat_types::config::GlobalConfig,
    pub local_state: LocalState,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application: resolve the data directory, open the
    /// database (running migrations), and wire up services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let local_state = LocalState::new(&data_dir);

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let conversations = Arc::new(ConversationService::new(SqliteConversationRepository::new(
            db_pool.clone(),
        )));
        let profiles = Arc::new(ProfileService::new(SqliteProfileRepository::new(db_pool)));

        let provider = resolve_api_key().map(|key| {
            GeminiClient::new(
                key,
                config.gateway.model.clone(),
                config.gateway.temperature,
            )
        });
        if provider.is_none() {
            tracing::warn!(
                "no GEMINI_API_KEY or GOOGLE_API_KEY set; chat and quote generation will refuse requests"
            );
        }

        Ok(Self {
            conversations,
            profiles,
            provider,
            config,
            local_state,
            data_dir,
        })
    }
}
