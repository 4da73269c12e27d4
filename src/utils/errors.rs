//! Error handling for Code Legends
//!
//! This module defines the crate-level error type, the typed failure taxonomy
//! returned by every API call, and the `{success, message}` result handed back
//! to UI actions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Code Legends client core
#[derive(Error, Debug)]
pub enum CodeLegendsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failure kinds of a single REST call.
///
/// Every HTTP 404 becomes `NotFound`. By-identifier lookups made through
/// [`crate::services::ApiClient::find_json`] turn it into `Ok(None)` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("remote error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("session is invalid, sign-in required")]
    AuthInvalid,

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Result type alias for Code Legends operations
pub type Result<T> = std::result::Result<T, CodeLegendsError>;

/// Result type alias for API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Short, stable label used as the `kind` field in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network_failure",
            ApiError::NotFound(_) => "not_found",
            ApiError::Remote { .. } => "remote_error",
            ApiError::AuthInvalid => "auth_invalid",
            ApiError::Decode(_) => "decode_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// HTTP status carried by the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the person who triggered the action
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Try again later.".to_string(),
            ApiError::NotFound(what) => format!("{} was not found", what),
            ApiError::Remote { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Remote { status, .. } => format!("The server answered with HTTP {}", status),
            ApiError::AuthInvalid => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

impl CodeLegendsError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CodeLegendsError::Config(_) => false,
            CodeLegendsError::ConfigSource(_) => false,
            CodeLegendsError::Api(ApiError::Network(_)) => true,
            CodeLegendsError::Api(ApiError::Remote { status, .. }) => *status >= 500,
            CodeLegendsError::Api(_) => false,
            CodeLegendsError::Cache(_) => true,
            CodeLegendsError::Http(_) => true,
            CodeLegendsError::Serialization(_) => false,
            CodeLegendsError::Io(_) => true,
            CodeLegendsError::UrlParse(_) => false,
            CodeLegendsError::Logging(_) => false,
            CodeLegendsError::Authentication(_) => false,
            CodeLegendsError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CodeLegendsError::Config(_) => ErrorSeverity::Critical,
            CodeLegendsError::ConfigSource(_) => ErrorSeverity::Critical,
            CodeLegendsError::Logging(_) => ErrorSeverity::Critical,
            CodeLegendsError::Api(ApiError::NotFound(_)) => ErrorSeverity::Info,
            CodeLegendsError::Api(ApiError::AuthInvalid) => ErrorSeverity::Warning,
            CodeLegendsError::Authentication(_) => ErrorSeverity::Warning,
            CodeLegendsError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Outcome of a mutating UI action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Collapse an API result into an action result, using `success_message`
    /// when the call went through
    pub fn from_api<T>(result: &ApiResult<T>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self::ok(success_message),
            Err(e) => Self::failed(e.user_message()),
        }
    }
}
