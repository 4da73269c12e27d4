//! Services module
//!
//! This module contains the clients of the Code Legends REST API

pub mod api;
pub mod auth;
pub mod cache;
pub mod certificates;
pub mod courses;
pub mod progress;
pub mod requests;
pub mod tag;

// Re-export commonly used services
pub use api::ApiClient;
pub use auth::AuthService;
pub use cache::ResponseCache;
pub use certificates::CertificateService;
pub use courses::CourseService;
pub use progress::ProgressService;
pub use requests::RequestService;
pub use tag::TagService;

use tracing::info;
use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub course_service: CourseService,
    pub progress_service: ProgressService,
    pub request_service: RequestService,
    pub certificate_service: CertificateService,
    pub tag_service: TagService,
    pub cache: ResponseCache,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub async fn new(settings: &Settings) -> Result<Self> {
        let cache = ResponseCache::from_config(&settings.cache).await?;
        Self::with_cache(settings, cache)
    }

    /// Create a ServiceFactory around an existing cache
    pub fn with_cache(settings: &Settings, cache: ResponseCache) -> Result<Self> {
        let api = ApiClient::new(&settings.api)?;

        info!(base_url = %api.base_url(), cache = cache.backend_name(), "Services initialized");

        Ok(Self {
            auth_service: AuthService::new(api.clone(), settings.auth.clone()),
            course_service: CourseService::new(api.clone()),
            progress_service: ProgressService::new(api.clone(), cache.clone()),
            request_service: RequestService::new(api.clone()),
            certificate_service: CertificateService::new(api.clone()),
            tag_service: TagService::new(api.clone()),
            api,
            cache,
        })
    }
}
