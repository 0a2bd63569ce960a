pub mod settings;

pub use settings::{
    ConversationConfig, Credentials, LlmConfig, ServerConfig, Settings, SettingsError,
    TracingSinkConfig,
};
