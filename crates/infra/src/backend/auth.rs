//! Per-request authorization for the backend adapters

use async_trait::async_trait;
use personadesk_domain::Result;

/// Source of the bearer token attached to row and object requests.
///
/// Implemented by the identity adapter from its live session; tests inject
/// static providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// The current access token, or `NotAuthenticated` if no session is live
    async fn access_token(&self) -> Result<String>;
}
