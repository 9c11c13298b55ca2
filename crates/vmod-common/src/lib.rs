//! # vmod-common
//!
//! Shared utilities: engine connection and persisted settings, process
//! configuration, the console error type, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    ConfigError, ConnectionConfig, ConsoleConfig, FileSettingsStore, LogFormat,
    MemorySettingsStore, SettingsError, SettingsStore, SharedConnection, API_KEY_SETTING,
    BASE_URL_SETTING,
};
pub use error::{ConsoleError, ConsoleResult, ErrorReport};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
