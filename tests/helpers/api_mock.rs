//! Mock Code Legends API server for testing
//!
//! This module provides a mock HTTP server that simulates the Code Legends
//! REST API. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{bearer_token, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use super::test_data::TEST_ACCESS_TOKEN;

/// Mock Code Legends API server for testing
pub struct LegendsMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub body: Option<Value>,
    /// Exact number of calls the endpoint must receive
    pub expect: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            body: None,
            expect: None,
        }
    }
}

impl MockResponseConfig {
    pub fn ok(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Some(json!({ "statusCode": status, "message": message })),
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn times(mut self, calls: u64) -> Self {
        self.expect = Some(calls);
        self
    }

    fn response(&self) -> ResponseTemplate {
        let mut response = ResponseTemplate::new(self.status);
        if let Some(body) = &self.body {
            response = response.set_body_json(body.clone());
        }
        if let Some(delay) = self.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }
        response
    }
}

impl LegendsMockServer {
    /// Create a new mock API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Mount a public endpoint
    pub async fn mock_public(&self, http_method: &str, endpoint: &str, config: MockResponseConfig) {
        let mut mock = Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(config.response());
        if let Some(calls) = config.expect {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    /// Mount an endpoint that only answers requests carrying the test bearer token
    pub async fn mock_authenticated(&self, http_method: &str, endpoint: &str, config: MockResponseConfig) {
        let mut mock = Mock::given(method(http_method))
            .and(path(endpoint))
            .and(bearer_token(TEST_ACCESS_TOKEN))
            .respond_with(config.response());
        if let Some(calls) = config.expect {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    pub async fn mock_enrolled_courses(&self, config: MockResponseConfig) {
        self.mock_authenticated("GET", "/users/me/courses", config).await;
    }

    pub async fn mock_active_course(&self, config: MockResponseConfig) {
        self.mock_authenticated("GET", "/users/me/active-course", config).await;
    }

    pub async fn mock_roadmap(&self, course_slug: &str, config: MockResponseConfig) {
        self.mock_authenticated("GET", &format!("/courses/{}/roadmap", course_slug), config).await;
    }

    pub async fn mock_progress(&self, course_slug: &str, config: MockResponseConfig) {
        self.mock_authenticated("GET", &format!("/courses/{}/progress", course_slug), config).await;
    }

    pub async fn mock_complete_lesson(&self, lesson_id: &str, config: MockResponseConfig) {
        self.mock_authenticated("POST", &format!("/progress/lessons/{}/complete", lesson_id), config).await;
    }

    pub async fn mock_search(&self, query: &str, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path("/courses/search"))
            .and(query_param("q", query))
            .respond_with(config.response())
            .mount(&self.server)
            .await;
    }

    pub async fn mock_refresh(&self, config: MockResponseConfig) {
        self.mock_public("POST", "/auth/refresh", config).await;
    }

    pub async fn mock_logout(&self, config: MockResponseConfig) {
        self.mock_public("POST", "/auth/logout", config).await;
    }

    /// Mount the endpoints a healthy layout render needs
    pub async fn setup_layout_mocks(&self) {
        self.mock_enrolled_courses(MockResponseConfig::ok(super::test_data::enrolled_courses_json()))
            .await;
        self.mock_active_course(MockResponseConfig::ok(super::test_data::active_course_json()))
            .await;
    }

    /// Number of received requests whose path starts with `prefix`
    pub async fn requests_to(&self, prefix: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path().starts_with(prefix))
            .count()
    }

    /// Check that the endpoint was called the expected number of times
    pub async fn verify_endpoint_called(&self, endpoint: &str, times: usize) {
        let calls = self
            .server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == endpoint)
            .count();
        assert_eq!(calls, times, "unexpected number of calls to {}", endpoint);
    }

    /// Reset all mocks and recorded requests
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
