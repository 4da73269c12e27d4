//! Integration test to verify test infrastructure setup
//!
//! This test file verifies that the mock API, configuration loading and the
//! application context work together.

mod helpers;

use code_legends::config::{CacheBackendKind, Settings};
use helpers::*;
use serial_test::serial;
use std::io::Write;

#[tokio::test]
async fn test_infrastructure_setup() {
    let ctx = TestContext::new().await;

    assert!(ctx.app.services.api.base_url().as_str().starts_with(&ctx.api.base_url()));
    assert_eq!(ctx.app.services.cache.backend_name(), "memory");
    assert!(ctx.app.sidebar.is_open());
    assert!(!ctx.app.mobile_nav.is_open());
    assert!(ctx.app.session.status().is_loading);
}

#[tokio::test]
async fn test_mock_server_reset() {
    let mock = LegendsMockServer::new().await;
    mock.setup_layout_mocks().await;
    mock.reset().await;
    assert_eq!(mock.requests_to("/").await, 0);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[api]\nbase_url = \"https://api.codelegends.dev\"\n\n[cache]\nbackend = \"redis\"\nredis_url = \"redis://cache:6379\""
    )
    .unwrap();

    std::env::set_var("CODELEGENDS_API__TIMEOUT_SECONDS", "3");
    std::env::set_var("CODELEGENDS_FEATURES__SHOW_TOP_BANNER", "true");
    let settings = Settings::from_file(file.path());
    std::env::remove_var("CODELEGENDS_API__TIMEOUT_SECONDS");
    std::env::remove_var("CODELEGENDS_FEATURES__SHOW_TOP_BANNER");

    let settings = settings.unwrap();
    assert_eq!(settings.api.base_url, "https://api.codelegends.dev");
    assert_eq!(settings.api.timeout_seconds, 3);
    assert!(settings.features.show_top_banner);
    assert_eq!(settings.cache.backend, CacheBackendKind::Redis);
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_library_info() {
    assert!(code_legends::info().starts_with("code-legends v"));
}
