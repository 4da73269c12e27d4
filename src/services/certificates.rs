//! Certificate verification service

use crate::models::CertificateVerification;
use crate::utils::errors::ApiResult;
use super::api::ApiClient;

#[derive(Debug, Clone)]
pub struct CertificateService {
    api: ApiClient,
}

impl CertificateService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Public lookup of a certificate by id; `None` when it does not exist
    pub async fn verify(&self, certificate_id: &str) -> ApiResult<Option<CertificateVerification>> {
        let url = self.api.endpoint(&["certificates", "verify", certificate_id]);
        self.api.find_json(url, None).await
    }
}
