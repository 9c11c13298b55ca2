//! Engine HTTP client
//!
//! The only place the console performs HTTP I/O. Every call reads the shared
//! connection, so a changed key or base URL applies to the next request.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use vmod_common::{ConnectionConfig, ConsoleError, ConsoleResult, SharedConnection};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the engine's JSON API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    connection: SharedConnection,
}

impl ApiClient {
    /// Create a client with a whole-request timeout
    pub fn new(connection: SharedConnection, timeout: Duration) -> ConsoleResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConsoleError::Config(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self { http, connection })
    }

    pub fn connection(&self) -> &SharedConnection {
        &self.connection
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<T> {
        self.get_with_query(path, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ConsoleResult<T> {
        let body = self.request::<()>(Method::GET, path, query, None).await?;
        decode(body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ConsoleResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.request(Method::POST, path, &[], Some(body)).await?;
        decode(body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ConsoleResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.request(Method::PUT, path, &[], Some(body)).await?;
        decode(body)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ConsoleResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.request(Method::PATCH, path, &[], Some(body)).await?;
        decode(body)
    }

    /// PATCH without a body, for server-side toggles
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<T> {
        let body = self.request::<()>(Method::PATCH, path, &[], None).await?;
        decode(body)
    }

    /// Send a request and decode the JSON reply; 204 No Content yields `None`
    pub async fn request_json<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ConsoleResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(method, path, query, body)
            .await?
            .map(|bytes| parse_json(&bytes))
            .transpose()
    }

    /// DELETE; any success body is ignored
    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> ConsoleResult<()> {
        self.request::<()>(Method::DELETE, path, query, None).await?;
        Ok(())
    }

    /// Send one request.
    ///
    /// Returns `None` for 204 No Content, the raw body otherwise. 401 maps to
    /// [`ConsoleError::Unauthorized`]; any other failure status carries the
    /// engine's `detail` (or the raw body).
    #[instrument(skip(self, query, body))]
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ConsoleResult<Option<Vec<u8>>> {
        let ConnectionConfig { base_url, api_key } = self.connection.snapshot();
        let url = join_url(&base_url, path);
        debug!(%url, "Sending request");

        let mut req = self
            .http
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(key) = api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(ConsoleError::internal)?;
            req = req.body(payload);
        }

        let response = req.send().await.map_err(|e| {
            warn!(%url, error = %e, "Request did not complete");
            ConsoleError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Response received");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ConsoleError::Unauthorized);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &text));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConsoleError::Transport(e.to_string()))?;
        Ok(Some(bytes.to_vec()))
    }
}

/// Decode a reply for the typed helpers. 204 No Content decodes as JSON
/// `null`, so `()` and `Option<_>` accept it and body types report `Decode`.
fn decode<T: DeserializeOwned>(body: Option<Vec<u8>>) -> ConsoleResult<T> {
    match body {
        Some(bytes) => parse_json(&bytes),
        None => T::deserialize(serde_json::Value::Null)
            .map_err(|e| ConsoleError::Decode(format!("engine returned no content: {e}"))),
    }
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> ConsoleResult<T> {
    serde_json::from_slice(bytes).map_err(|e| ConsoleError::Decode(e.to_string()))
}

/// Join the base URL and a path. Absolute URLs pass through unchanged.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Build the failure for a non-2xx, non-401 response
pub fn error_from_body(status: StatusCode, body: &str) -> ConsoleError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| match json.get("detail") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Null | serde_json::Value::String(_)) | None => None,
            // Structured details (e.g. field errors) are shown as JSON
            Some(other) => Some(other.to_string()),
        });

    let message = match detail {
        Some(detail) => detail,
        None if !body.trim().is_empty() => body.to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    ConsoleError::request_failed(status.as_u16(), message)
}
