//! Global configuration types for Laichat.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data
//! directory. All fields have working defaults; the API key is resolved
//! from the environment separately and never lives in this file.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Model identifier passed to the completion service.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature for chat turns.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f64 {
    0.9
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gateway.model, "gemini-2.5-flash");
        assert_eq!(config.gateway.temperature, 0.9);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
[server]
port = 9090

[gateway]
model = "gemini-2.5-pro"
temperature = 0.4
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.gateway.model, "gemini-2.5-pro");
        assert_eq!(config.gateway.temperature, 0.4);
    }
}
