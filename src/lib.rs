//! Code Legends client core
//!
//! The client-side core of the Code Legends e-learning platform. This library
//! provides a typed REST API client, session refresh and forced sign-out,
//! observable course stores, roadmap slug and URL utilities, and the page
//! handlers that tie them together.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod roadmap;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ApiError, ApiResult, CodeLegendsError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::AppContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
