//! Authentication service implementation
//!
//! This service handles silent access-token refresh, the current-user lookup
//! and sign-out against the Code Legends API.

use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use tracing::{debug, error, info};
use crate::config::AuthConfig;
use crate::middleware::auth::require_valid_session;
use crate::models::{expiry_after, RefreshTokenRequest, Session, SessionUser, TokenPair};
use crate::utils::errors::ApiResult;
use crate::utils::helpers::format_timestamp;
use crate::utils::logging::log_session_event;
use super::api::ApiClient;

/// Authentication service for session refresh and sign-out
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(api: ApiClient, config: AuthConfig) -> Self {
        Self { api, config }
    }

    /// Login entry point used after a forced sign-out
    pub fn login_path(&self) -> &str {
        &self.config.login_path
    }

    fn refresh_leeway(&self) -> Duration {
        Duration::try_seconds(self.config.refresh_leeway_seconds).unwrap_or(Duration::MAX)
    }

    /// Refresh the access token if it is due, otherwise return the session unchanged.
    /// Sessions already marked invalid are returned as they are.
    pub async fn ensure_fresh(&self, session: &Session) -> Session {
        self.ensure_fresh_at(session, Utc::now()).await
    }

    pub async fn ensure_fresh_at(&self, session: &Session, now: DateTime<Utc>) -> Session {
        if !session.is_valid() || !session.needs_refresh(now, self.refresh_leeway()) {
            return session.clone();
        }

        debug!(user_id = %session.user_id, expires = %format_timestamp(session.access_token_expires), "Access token due for refresh");
        self.refresh_access_token(session).await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Never fails: on any error the returned session carries
    /// `RefreshAccessTokenError`, which forces a sign-out downstream.
    pub async fn refresh_access_token(&self, session: &Session) -> Session {
        let url = self.api.endpoint(&["auth", "refresh"]);
        let body = RefreshTokenRequest {
            refresh_token: session.refresh_token.clone(),
        };

        match self.api.send_json::<_, TokenPair>(Method::POST, url, &body, None).await {
            Ok(tokens) => {
                let refreshed = Session {
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token.unwrap_or_else(|| session.refresh_token.clone()),
                    access_token_expires: expiry_after(Utc::now(), tokens.expires_in),
                    error: None,
                    ..session.clone()
                };
                log_session_event(Some(&session.user_id), "token_refreshed", None);
                refreshed
            }
            Err(e) => {
                error!(user_id = %session.user_id, kind = e.kind(), error = %e, "Failed to refresh access token");
                session.with_refresh_error()
            }
        }
    }

    /// Fetch the signed-in learner
    pub async fn current_user(&self, session: &Session) -> ApiResult<SessionUser> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["auth", "me"]);
        self.api.get_json(url, Some(token)).await
    }

    /// Tell the API to revoke the session. Best effort: the local session is
    /// cleared by the caller regardless of the outcome.
    pub async fn sign_out(&self, session: &Session) -> ApiResult<()> {
        let url = self.api.endpoint(&["auth", "logout"]);
        let result = self
            .api
            .send_empty(Method::POST, url, Some(&session.access_token))
            .await;

        match &result {
            Ok(()) => log_session_event(Some(&session.user_id), "signed_out", None),
            Err(e) => info!(user_id = %session.user_id, error = %e, "Remote sign-out failed, clearing session locally"),
        }

        result
    }
}
