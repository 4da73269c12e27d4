//! REST API client
//!
//! Thin wrapper over `reqwest` for the Code Legends API: URL building,
//! bearer authentication, request correlation ids and mapping of transport
//! and HTTP failures onto [`ApiError`].

use std::time::Duration;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;
use crate::config::ApiConfig;
use crate::utils::errors::{ApiError, ApiResult, CodeLegendsError, Result};
use crate::utils::helpers::{normalize_whitespace, truncate_text};

const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

/// Error body shape returned by the API (`message` may be a list of
/// validation messages)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<ErrorMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiClient {
    /// Create a new ApiClient from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(CodeLegendsError::Config(format!(
                "API base URL {} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CodeLegendsError::Http)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON document
    pub async fn get_json<T>(&self, url: Url, token: Option<&str>) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(self.request(Method::GET, url, token)).await?;
        read_json(response).await
    }

    /// GET a JSON document by identifier; HTTP 404 yields `Ok(None)`
    pub async fn find_json<T>(&self, url: Url, token: Option<&str>) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get_json(url, token).await {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Send a JSON body and decode a JSON response
    pub async fn send_json<B, T>(&self, method: Method, url: Url, body: &B, token: Option<&str>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, url, token).json(body);
        let response = self.execute(builder).await?;
        read_json(response).await
    }

    /// Send a request whose response body is ignored
    pub async fn send_empty(&self, method: Method, url: Url, token: Option<&str>) -> ApiResult<()> {
        self.execute(self.request(method, url, token)).await?;
        Ok(())
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send the request and turn non-2xx statuses into errors
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let request = builder
            .header("X-Request-Id", request_id.as_str())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(request_id = %request_id, method = %method, url = %url, "Sending API request");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(request_id = %request_id, method = %method, url = %url, error = %e, "API request could not be completed");
            map_transport_error(&e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(request_id = %request_id, status = status.as_u16(), "API request succeeded");
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            debug!(request_id = %request_id, url = %url, "API resource not found");
            return Err(ApiError::NotFound(url.path().to_string()));
        }

        let error = status_error(status, response).await;
        warn!(
            request_id = %request_id,
            method = %method,
            url = %url,
            status = status.as_u16(),
            "API request returned an error status"
        );
        Err(error)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn status_error(status: StatusCode, response: Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    ApiError::Remote {
        status: status.as_u16(),
        message: extract_error_message(&body),
    }
}

fn map_transport_error(error: &reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Network("request timed out".to_string())
    } else if error.is_connect() {
        ApiError::Network(format!("connection failed: {}", error))
    } else if error.is_decode() {
        ApiError::Decode(error.to_string())
    } else {
        ApiError::Network(error.to_string())
    }
}

/// Pull a human-readable message out of an error body
fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match parsed.message {
            Some(ErrorMessage::One(message)) => return message,
            Some(ErrorMessage::Many(messages)) if !messages.is_empty() => return messages.join("; "),
            _ => {}
        }
        if let Some(error) = parsed.error {
            return error;
        }
    }

    truncate_text(&normalize_whitespace(body), MAX_ERROR_MESSAGE_CHARS)
}
