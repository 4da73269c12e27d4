//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Code Legends client core.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{ApiError, CodeLegendsError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive for as long as the process logs to a file.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| CodeLegendsError::Logging(e.to_string()))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "code-legends.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CodeLegendsError::Logging(e.to_string()))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a failed API call.
///
/// Not-found outcomes are expected during lookups and stay at debug level so
/// they remain distinguishable from real failures.
pub fn log_api_failure(operation: &str, error: &ApiError) {
    match error {
        ApiError::NotFound(resource) => {
            debug!(operation = operation, kind = error.kind(), resource = %resource, "API lookup found nothing");
        }
        ApiError::AuthInvalid => {
            warn!(operation = operation, kind = error.kind(), "API call rejected, session invalid");
        }
        ApiError::Remote { status, message } => {
            warn!(
                operation = operation,
                kind = error.kind(),
                status = status,
                message = %message,
                "API call failed with remote error"
            );
        }
        ApiError::Network(cause) | ApiError::Decode(cause) => {
            error!(operation = operation, kind = error.kind(), cause = %cause, "API call failed");
        }
    }
}

/// Log session lifecycle events
pub fn log_session_event(user_id: Option<&str>, event: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        event = event,
        details = details,
        "Session event"
    );
}

/// Log cache invalidation
pub fn log_cache_invalidation(tag: &str, removed: u64) {
    debug!(tag = tag, removed = removed, "Cache tag invalidated");
}
