//! Certificate model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Public verification record for an issued certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateVerification {
    pub id: String,
    pub student_name: String,
    pub course_title: String,
    pub issued_at: DateTime<Utc>,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}
