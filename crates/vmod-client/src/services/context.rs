//! Service context - what every service needs to reach the engine

use vmod_common::{ConsoleConfig, ConsoleResult, SharedConnection};

use crate::gateway::ApiClient;

/// Service context passed to all services
///
/// Cheap to clone; clones share the connection, so a key change made
/// through one is seen by all.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    api: ApiClient,
}

impl ServiceContext {
    pub fn new(connection: SharedConnection, config: &ConsoleConfig) -> ConsoleResult<Self> {
        Ok(Self {
            api: ApiClient::new(connection, config.http_timeout())?,
        })
    }

    pub fn from_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get the gateway client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn connection(&self) -> &SharedConnection {
        self.api.connection()
    }
}
