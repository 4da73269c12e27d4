//! Middleware module
//!
//! This module contains checks that run around authenticated requests

pub mod auth;

// Re-export commonly used middleware
pub use auth::{require_valid_session, SessionGuard, SignOutEvent};
