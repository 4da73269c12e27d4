//! Tag service

use crate::models::Tag;
use crate::utils::errors::ApiResult;
use super::api::ApiClient;

#[derive(Debug, Clone)]
pub struct TagService {
    api: ApiClient,
}

impl TagService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<Vec<Tag>> {
        let url = self.api.endpoint(&["tags"]);
        self.api.get_json(url, None).await
    }
}
