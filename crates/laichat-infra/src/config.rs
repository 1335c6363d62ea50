//! Configuration and environment resolution for Laichat.
//!
//! Reads `config.toml` from the data directory (`~/.laichat/` in
//! production) and deserializes it into [`GlobalConfig`]. Falls back to
//! defaults when the file is missing or malformed. The provider API key
//! never lives in the file; it is resolved from the environment and
//! wrapped in [`SecretString`] immediately.

use std::path::{Path, PathBuf};

use laichat_types::config::GlobalConfig;
use secrecy::SecretString;

/// Environment variables checked for the provider credential, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `LAICHAT_DATA_DIR` environment variable
/// 2. `~/.laichat`
/// 3. `./.laichat` as a last resort
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LAICHAT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".laichat");
    }

    PathBuf::from(".laichat")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the Gemini API key from the environment.
///
/// Checks `GEMINI_API_KEY`, then `GOOGLE_API_KEY`. Returns `None` when
/// neither is set; the gateway then refuses chat turns with a
/// configuration error instead of failing at startup, so the rest of the
/// app (history browsing, catalog quotes) keeps working.
pub fn resolve_api_key() -> Option<SecretString> {
    for var in API_KEY_VARS {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                return Some(SecretString::from(value));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gateway.model, "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 9999

[gateway]
model = "gemini-2.5-pro"
temperature = 0.5
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.gateway.model, "gemini-2.5-pro");
        assert_eq!(config.gateway.temperature, 0.5);
    }

    #[tokio::test]
    async fn test_load_global_config_partial_toml_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "[server]\nport = 3000\n")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.gateway.temperature, 0.9);
    }

    #[tokio::test]
    async fn test_load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
    }
}
