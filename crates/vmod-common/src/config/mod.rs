//! Connection, persisted settings and process configuration

mod connection;
mod console_config;
mod settings;

pub use connection::{default_base_url, ConnectionConfig, SharedConnection, FALLBACK_BASE_URL};
pub use console_config::{ConfigError, ConsoleConfig, LogFormat, ENV_PREFIX};
pub use settings::{
    FileSettingsStore, MemorySettingsStore, SettingsError, SettingsStore, API_KEY_SETTING,
    BASE_URL_SETTING,
};
