//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CodeLegendsError, Result};
use super::{CacheBackendKind, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_auth_config(&settings.auth)?;
    validate_cache_config(&settings.cache)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate REST API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(CodeLegendsError::Config(
            "API base URL is required".to_string()
        ));
    }

    let url = url::Url::parse(&config.base_url).map_err(|e| {
        CodeLegendsError::Config(format!("API base URL is invalid: {}", e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(CodeLegendsError::Config(
            format!("API base URL must use http or https, got {}", url.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(CodeLegendsError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if !config.login_path.starts_with('/') {
        return Err(CodeLegendsError::Config(
            "Login path must start with '/'".to_string()
        ));
    }

    if config.refresh_leeway_seconds < 0 {
        return Err(CodeLegendsError::Config(
            "Refresh leeway cannot be negative".to_string()
        ));
    }

    Ok(())
}

/// Validate cache configuration
fn validate_cache_config(config: &super::CacheConfig) -> Result<()> {
    if config.ttl_seconds == 0 {
        return Err(CodeLegendsError::Config(
            "Cache TTL must be greater than 0".to_string()
        ));
    }

    if config.backend == CacheBackendKind::Redis {
        match config.redis_url.as_deref() {
            Some(url) if !url.is_empty() => {}
            _ => {
                return Err(CodeLegendsError::Config(
                    "Redis URL is required when the cache backend is redis".to_string()
                ));
            }
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CodeLegendsError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CodeLegendsError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
