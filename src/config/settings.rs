//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// REST API client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Session and token refresh configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Where the learner is sent after a forced sign-out
    pub login_path: String,
    /// Refresh the access token this many seconds before it expires
    pub refresh_leeway_seconds: i64,
}

/// Which store backs the roadmap/progress response cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    Memory,
    Redis,
}

/// Response cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    pub redis_url: Option<String>,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rolling log files; stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub show_top_banner: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Load settings from an explicit TOML file, still honouring environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::builder()
            .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Toml))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CodeLegendsError> {
        super::validation::validate_settings(self)
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        let builder = config::Config::builder();
        match config::Config::try_from(&Settings::default()) {
            Ok(defaults) => builder.add_source(defaults),
            Err(_) => builder,
        }
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("CODELEGENDS")
            .prefix_separator("_")
            .separator("__")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3333".to_string(),
                timeout_seconds: 10,
                user_agent: "CodeLegends-Client/1.0".to_string(),
            },
            auth: AuthConfig {
                login_path: "/login".to_string(),
                refresh_leeway_seconds: 60,
            },
            cache: CacheConfig {
                backend: CacheBackendKind::Memory,
                redis_url: None,
                prefix: "codelegends:".to_string(),
                ttl_seconds: 300,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
            features: FeaturesConfig {
                show_top_banner: false,
            },
        }
    }
}
