use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the
/// `SARCASTIC_` prefix. For example: `SARCASTIC_SERVER__PORT=3001`,
/// `SARCASTIC_SOURCES__PRIMARY__API_KEY=gsk_...`
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Response source configuration (remote LLM tiers + analyzer)
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Local inference microservice configuration
    #[serde(default)]
    pub local_ml: LocalMlConfig,

    /// Song catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Chat pipeline tuning
    #[serde(default)]
    pub chat: ChatConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// A single OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSourceConfig {
    /// Bearer token for the API. The source is disabled when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (the `/chat/completions` path is appended)
    pub base_url: String,

    /// Model name sent in the request body
    pub model: String,

    /// Per-request timeout in seconds
    pub timeout_s: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Primary generation tier
    #[serde(default = "default_primary")]
    pub primary: RemoteSourceConfig,

    /// Secondary generation tier, tried when the primary fails
    #[serde(default = "default_secondary")]
    pub secondary: RemoteSourceConfig,

    /// Message analyzer (low-temperature JSON analysis pass)
    #[serde(default = "default_analyzer")]
    pub analyzer: RemoteSourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            analyzer: default_analyzer(),
        }
    }
}

fn default_primary() -> RemoteSourceConfig {
    RemoteSourceConfig {
        api_key: None,
        base_url: "https://api.groq.com/openai/v1".to_string(),
        model: "llama-3.1-8b-instant".to_string(),
        timeout_s: 15,
    }
}

fn default_secondary() -> RemoteSourceConfig {
    RemoteSourceConfig {
        api_key: None,
        base_url: "https://api.x.ai/v1".to_string(),
        model: "grok-beta".to_string(),
        timeout_s: 15,
    }
}

fn default_analyzer() -> RemoteSourceConfig {
    RemoteSourceConfig {
        api_key: None,
        base_url: "https://api.openai.com/v1".to_string(),
        model: "gpt-4o-mini".to_string(),
        timeout_s: 10,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalMlConfig {
    /// Base URL of the local inference service (`/health`, `/chat`)
    #[serde(default = "default_ml_url")]
    pub base_url: String,

    /// Timeout for `/chat` generation calls in seconds
    #[serde(default = "default_ml_chat_timeout")]
    pub chat_timeout_s: u64,

    /// Timeout for `/health` probes in seconds
    #[serde(default = "default_ml_health_timeout")]
    pub health_timeout_s: u64,

    /// Interval between background health probes in seconds
    #[serde(default = "default_health_interval")]
    pub health_interval_s: u64,
}

impl Default for LocalMlConfig {
    fn default() -> Self {
        Self {
            base_url: default_ml_url(),
            chat_timeout_s: default_ml_chat_timeout(),
            health_timeout_s: default_ml_health_timeout(),
            health_interval_s: default_health_interval(),
        }
    }
}

fn default_ml_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_ml_chat_timeout() -> u64 {
    30
}

fn default_ml_health_timeout() -> u64 {
    5
}

fn default_health_interval() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the songs JSON file, loaded once at startup
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "data/songs.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Number of most-recent conversation turns forwarded to remote sources
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
        }
    }
}

fn default_history_window() -> usize {
    15
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            local_ml: LocalMlConfig::default(),
            catalog: CatalogConfig::default(),
            chat: ChatConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `SARCASTIC_` and use
    /// double underscores for nested values:
    /// - `SARCASTIC_SERVER__PORT` -> server.port
    /// - `SARCASTIC_SOURCES__PRIMARY__API_KEY` -> sources.primary.api_key
    /// - `SARCASTIC_LOCAL_ML__BASE_URL` -> local_ml.base_url
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SARCASTIC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.chat.history_window, 15);
        assert_eq!(config.local_ml.health_interval_s, 30);
        assert!(config.sources.primary.api_key.is_none());
        assert!(config.sources.primary.base_url.contains("groq"));
        assert!(config.sources.secondary.base_url.contains("x.ai"));
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        let addr = server.socket_addr();
        assert_eq!(addr.port(), 3001);
    }
}
