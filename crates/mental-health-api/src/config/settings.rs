use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const LANGSMITH_API_KEY_VAR: &str = "LANGSMITH_API_KEY";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("API keys are missing. Please set {0} in the environment or .env file")]
    MissingCredential(&'static str),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub tracing_sink: TracingSinkConfig,
    pub conversation: ConversationConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TracingSinkConfig {
    pub endpoint: String,
    pub project: String,
    pub enabled: bool,
    pub queue_capacity: usize,
    pub batch_size: usize,
    pub batch_timeout_ms: u64,
    pub worker_count: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConversationConfig {
    /// Turns kept per user; the oldest turn is dropped past this. 0 = unbounded.
    pub max_turns: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            timeout_seconds: 120,
        }
    }
}

impl Default for TracingSinkConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.smith.langchain.com".to_string(),
            project: "mental-health-agent".to_string(),
            enabled: true,
            queue_capacity: 1_000,
            batch_size: 20,
            batch_timeout_ms: 1_000,
            worker_count: 1,
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self { max_turns: 50 }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            tracing_sink: TracingSinkConfig::default(),
            conversation: ConversationConfig::default(),
        }
    }
}

impl Settings {
    /// Defaults, then `config/settings.toml` if present, then `APP__*` env vars.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let defaults = Config::try_from(&Settings::default())?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

/// Provider and tracing-sink API keys. Both are mandatory.
#[derive(Clone)]
pub struct Credentials {
    pub google_api_key: String,
    pub langsmith_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(SettingsError::MissingCredential(name))
        };

        Ok(Self {
            google_api_key: require(GOOGLE_API_KEY_VAR)?,
            langsmith_api_key: require(LANGSMITH_API_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("google_api_key", &"<redacted>")
            .field("langsmith_api_key", &"<redacted>")
            .finish()
    }
}
