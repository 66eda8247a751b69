//! Avatar object store client for the hosted object endpoint
//!
//! Uploads go to the public avatar bucket with overwrite enabled so a
//! repeated save replaces the object at the same path. Public URL
//! resolution is pure string construction; the bucket is public-read by
//! policy.

use std::sync::Arc;

use async_trait::async_trait;
use personadesk_core::profile::ports::AvatarStore;
use personadesk_domain::{Result, StorageConfig};
use reqwest::Method;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::encode_object_path;
use crate::errors::status_to_error;
use crate::http::HttpClient;

/// REST implementation of [`AvatarStore`]
pub struct BucketAvatarStore {
    http: Arc<HttpClient>,
    base_url: String,
    bucket: String,
    auth: Arc<dyn AccessTokenProvider>,
}

impl BucketAvatarStore {
    pub fn new(
        http: Arc<HttpClient>,
        base_url: impl Into<String>,
        storage: &StorageConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bucket: storage.bucket.clone(),
            auth,
        }
    }
}

#[async_trait]
impl AvatarStore for BucketAvatarStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let token = self.auth.access_token().await?;
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            encode_object_path(path)
        );

        let request = self
            .http
            .request(Method::POST, &url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes);

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, body));
        }

        debug!(path, "avatar object stored");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            encode_object_path(path)
        )
    }
}
