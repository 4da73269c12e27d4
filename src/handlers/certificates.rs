//! Public certificate verification page

use serde::Serialize;
use crate::models::CertificateVerification;
use crate::state::AppContext;
use crate::utils::helpers::format_timestamp;
use crate::utils::logging::log_api_failure;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "certificate", rename_all = "snake_case")]
pub enum CertificateView {
    Verified(CertificateVerification),
    /// Issued once, no longer valid
    Revoked(CertificateVerification),
    NotFound,
    /// The verification service could not be reached
    Unavailable,
}

impl CertificateView {
    /// One-line headline for the page
    pub fn headline(&self) -> String {
        match self {
            CertificateView::Verified(cert) => format!(
                "{} completed {} on {}",
                cert.student_name,
                cert.course_title,
                format_timestamp(cert.issued_at)
            ),
            CertificateView::Revoked(cert) => format!("Certificate {} has been revoked", cert.id),
            CertificateView::NotFound => "No certificate matches this identifier".to_string(),
            CertificateView::Unavailable => "Verification is temporarily unavailable".to_string(),
        }
    }
}

pub async fn handle_certificate_verification(ctx: &AppContext, certificate_id: &str) -> CertificateView {
    let certificate_id = certificate_id.trim();
    if certificate_id.is_empty() {
        return CertificateView::NotFound;
    }

    match ctx.services.certificate_service.verify(certificate_id).await {
        Ok(Some(cert)) if cert.valid => CertificateView::Verified(cert),
        Ok(Some(cert)) => CertificateView::Revoked(cert),
        Ok(None) => CertificateView::NotFound,
        Err(e) => {
            log_api_failure("verify_certificate", &e);
            CertificateView::Unavailable
        }
    }
}
