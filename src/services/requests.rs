//! Moderation request service implementation
//!
//! Learners raise requests; hub admins list and answer them. Any status may
//! be set after any other.

use reqwest::Method;
use tracing::info;
use crate::middleware::auth::require_valid_session;
use crate::models::{CreateRequestPayload, Request, RequestStatus, Session, UpdateRequestPayload};
use crate::utils::errors::ApiResult;
use super::api::ApiClient;

/// Request service for the moderation workflow
#[derive(Debug, Clone)]
pub struct RequestService {
    api: ApiClient,
}

impl RequestService {
    /// Create a new RequestService instance
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All requests, optionally filtered by status
    pub async fn list(&self, session: &Session, status: Option<RequestStatus>) -> ApiResult<Vec<Request>> {
        let token = require_valid_session(session)?;
        let mut url = self.api.endpoint(&["requests"]);
        if let Some(status) = status {
            url.query_pairs_mut().append_pair("status", status.as_str());
        }
        self.api.get_json(url, Some(token)).await
    }

    pub async fn get(&self, session: &Session, id: &str) -> ApiResult<Option<Request>> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["requests", id]);
        self.api.find_json(url, Some(token)).await
    }

    pub async fn create(&self, session: &Session, payload: &CreateRequestPayload) -> ApiResult<Request> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["requests"]);
        let request: Request = self.api.send_json(Method::POST, url, payload, Some(token)).await?;

        info!(request_id = %request.id, user_id = %session.user_id, "Request created");
        Ok(request)
    }

    /// Set status and response of a request
    pub async fn update(&self, session: &Session, id: &str, payload: &UpdateRequestPayload) -> ApiResult<Request> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["requests", id]);
        let request: Request = self.api.send_json(Method::PUT, url, payload, Some(token)).await?;

        info!(request_id = %request.id, status = %request.status, admin = %session.user_id, "Request updated");
        Ok(request)
    }
}
