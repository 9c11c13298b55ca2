//! Connection settings command handlers.

use serde::Serialize;
use vmod_common::{ConnectionConfig, ConsoleError, SettingsStore, SharedConnection};

use super::commands::ConfigCommands;
use super::output::Output;

/// What `config show` prints; the key itself never leaves the store
#[derive(Debug, Serialize)]
struct ConnectionView {
    base_url: String,
    api_key_set: bool,
    api_key: Option<String>,
}

impl From<&ConnectionConfig> for ConnectionView {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key_set: config.has_api_key(),
            api_key: config.masked_api_key(),
        }
    }
}

/// Handle connection settings commands.
pub fn handle_config_command(
    cmd: ConfigCommands,
    store: &dyn SettingsStore,
    connection: &SharedConnection,
    out: Output,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {}

        ConfigCommands::Set { api_key, base_url } => {
            if api_key.is_none() && base_url.is_none() {
                anyhow::bail!("Nothing to change; pass --api-key and/or --base-url");
            }
            if let Some(url) = base_url {
                connection.set_base_url(&url);
            }
            if let Some(key) = api_key {
                connection.set_api_key(Some(key));
            }
            connection.snapshot().save(store).map_err(ConsoleError::from)?;
        }

        ConfigCommands::Clear => {
            connection.set_api_key(None);
            connection.snapshot().save(store).map_err(ConsoleError::from)?;
        }
    }

    let view = ConnectionView::from(&connection.snapshot());
    out.render(&view, |v| {
        println!("Engine:  {}", v.base_url);
        match &v.api_key {
            Some(masked) => println!("API key: {masked}"),
            None => println!("API key: not set"),
        }
    })
}
