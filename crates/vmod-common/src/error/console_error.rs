//! Console error types
//!
//! Unified error handling for every console operation. Each failure ends up
//! as one user-visible message at the operation boundary.

use serde::Serialize;
use std::fmt;
use vmod_core::DomainError;

use crate::config::{ConfigError, SettingsError};

/// Console-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    // Engine responses
    #[error("Invalid or missing API key")]
    Unauthorized,

    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    // Local precondition not met; nothing was sent
    #[error(transparent)]
    LocalValidation(#[from] DomainError),

    // Network errors
    #[error("Cannot reach engine: {0}")]
    Transport(String),

    #[error("Unexpected response from engine: {0}")]
    Decode(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl ConsoleError {
    /// HTTP status the engine answered with, if the failure came from it
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error code for display and JSON output
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RequestFailed { .. } => "REQUEST_FAILED",
            Self::LocalValidation(e) => e.code(),
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Settings(_) => "SETTINGS_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if the failure was raised before any request went out
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalValidation(_))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Create a request failure from a status and the engine's detail
    #[must_use]
    pub fn request_failed(status: u16, message: impl fmt::Display) -> Self {
        Self::RequestFailed {
            status,
            message: message.to_string(),
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Machine-readable error report for JSON output
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&ConsoleError> for ErrorReport {
    fn from(err: &ConsoleError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            status: err.status_code(),
        }
    }
}

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;
