//! Engine connection: base URL and API key

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use super::settings::{SettingsError, SettingsStore, API_KEY_SETTING, BASE_URL_SETTING};

/// Used when neither the settings nor the build environment name an engine
pub const FALLBACK_BASE_URL: &str = "http://localhost:8000";

/// Base URL baked in at build time, or the local engine
pub fn default_base_url() -> &'static str {
    option_env!("VOICE_BOT_API_BASE_URL")
        .filter(|url| !url.is_empty())
        .unwrap_or(FALLBACK_BASE_URL)
}

/// Where the engine lives and how to authenticate against it
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub base_url: String,
    /// Sent as `X-API-Key`; `None` means requests go out unauthenticated
    pub api_key: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url().to_string(),
            api_key: None,
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ConnectionConfig {
    /// Blank values fall back to the default URL and no key
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.trim().is_empty() {
            default_base_url().to_string()
        } else {
            base_url.trim().to_string()
        };
        Self {
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Read the persisted connection, falling back to defaults
    pub fn load(store: &dyn SettingsStore) -> Result<Self, SettingsError> {
        let base_url = store.get(BASE_URL_SETTING)?.unwrap_or_default();
        let api_key = store.get(API_KEY_SETTING)?;
        Ok(Self::new(base_url, api_key))
    }

    /// Persist both values; a missing key is removed from the store
    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        store.set(BASE_URL_SETTING, &self.base_url)?;
        store.set(API_KEY_SETTING, self.api_key.as_deref().unwrap_or(""))
    }

    #[inline]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Last four characters of the key, for display
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let skip = key.chars().count().saturating_sub(4);
            let tail: String = key.chars().skip(skip).collect();
            format!("****{tail}")
        })
    }
}

/// Connection shared by the gateway client and the live monitor.
///
/// Every request reads a fresh snapshot, so an update applies to the next
/// call without rebuilding anything.
#[derive(Clone, Default)]
pub struct SharedConnection {
    inner: Arc<RwLock<ConnectionConfig>>,
}

impl fmt::Debug for SharedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedConnection").field(&*self.inner.read()).finish()
    }
}

impl SharedConnection {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn snapshot(&self) -> ConnectionConfig {
        self.inner.read().clone()
    }

    pub fn base_url(&self) -> String {
        self.inner.read().base_url.clone()
    }

    pub fn api_key(&self) -> Option<String> {
        self.inner.read().api_key.clone()
    }

    /// Replace the whole connection
    pub fn update(&self, config: ConnectionConfig) {
        *self.inner.write() = config;
    }

    pub fn set_api_key(&self, api_key: Option<String>) {
        self.inner.write().api_key = api_key.filter(|k| !k.trim().is_empty());
    }

    pub fn set_base_url(&self, base_url: &str) {
        let current = self.snapshot();
        self.update(ConnectionConfig::new(base_url, current.api_key));
    }
}

impl From<ConnectionConfig> for SharedConnection {
    fn from(config: ConnectionConfig) -> Self {
        Self::new(config)
    }
}
