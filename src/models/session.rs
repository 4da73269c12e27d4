//! Session model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};

/// Marker carried by a session whose silent token refresh failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    RefreshAccessTokenError,
}

/// Authenticated learner's credential bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub access_token_expires: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionError>,
}

impl Session {
    /// A session is valid unless its last refresh failed
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Whether the access token expires within `leeway` of `now`
    pub fn needs_refresh(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        now.checked_add_signed(leeway)
            .map_or(true, |deadline| deadline >= self.access_token_expires)
    }

    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            image: None,
        }
    }

    /// Copy of this session marked as failed to refresh
    pub fn with_refresh_error(&self) -> Self {
        Self {
            error: Some(SessionError::RefreshAccessTokenError),
            ..self.clone()
        }
    }
}

/// Expiry instant `seconds` after `now`.
///
/// Saturates instead of overflowing: lifetimes past the representable range
/// end at `DateTime::MAX_UTC`, and negative out-of-range values at `now`.
pub fn expiry_after(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    match Duration::try_seconds(seconds).and_then(|lifetime| now.checked_add_signed(lifetime)) {
        Some(expires) => expires,
        None if seconds > 0 => DateTime::<Utc>::MAX_UTC,
        None => now,
    }
}

/// Public view of the signed-in learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Response of `POST /auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the new access token in seconds
    pub expires_in: i64,
}
