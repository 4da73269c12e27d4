//! Test context for unified test setup
//!
//! This module provides a unified test context that starts the mock API and
//! builds an application context pointed at it.

use code_legends::config::Settings;
use code_legends::models::Session;
use code_legends::services::{ResponseCache, ServiceFactory};
use code_legends::state::AppContext;
use std::time::Duration;

use super::api_mock::LegendsMockServer;

/// Unified test context that manages all test components
pub struct TestContext {
    pub api: LegendsMockServer,
    pub app: AppContext,
    pub settings: Settings,
}

/// Configuration for test context
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub show_top_banner: bool,
    pub cache_ttl: Duration,
    pub setup_layout_mocks: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            show_top_banner: false,
            cache_ttl: Duration::from_secs(300),
            setup_layout_mocks: false,
        }
    }
}

impl TestContext {
    /// Create a new test context with default configuration
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Create a new test context with custom configuration
    pub async fn new_with_config(config: TestConfig) -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let api = LegendsMockServer::new().await;
        if config.setup_layout_mocks {
            api.setup_layout_mocks().await;
        }

        let settings = Self::create_test_settings(&api, &config);
        let cache = ResponseCache::in_memory("test:", config.cache_ttl);
        let services = ServiceFactory::with_cache(&settings, cache).expect("Failed to build services");
        let app = AppContext::from_services(settings.clone(), services);

        Self { api, app, settings }
    }

    fn create_test_settings(api: &LegendsMockServer, config: &TestConfig) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = api.base_url();
        settings.api.timeout_seconds = 5;
        settings.features.show_top_banner = config.show_top_banner;
        settings
    }

    /// Make `session` the current session
    pub fn sign_in(&self, session: Session) {
        self.app.sign_in(session);
    }
}
