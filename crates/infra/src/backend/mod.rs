//! Hosted backend adapters
//!
//! Implementations of the core ports against the hosted platform's REST
//! surface: the auth endpoint (identity), the row endpoint (profiles), and
//! the object endpoint (avatars). All three share one [`HttpClient`]
//! carrying the platform's `apikey` as a default header; per-user
//! authorization is a bearer token obtained through [`AccessTokenProvider`].

mod auth;
mod avatars;
mod identity;
mod profiles;
mod session_store;

pub use auth::AccessTokenProvider;
pub use avatars::BucketAvatarStore;
pub use identity::HostedIdentityProvider;
pub use profiles::RestProfileRepository;
pub use session_store::SessionStore;

use std::sync::Arc;
use std::time::Duration;

use personadesk_domain::{BackendConfig, PersonaDeskError, Result};

use crate::http::HttpClient;

/// Build the shared HTTP client for a backend configuration.
///
/// The platform's anonymous key rides along as a default header on every
/// request; user authorization is added per request by the adapters.
pub fn build_http_client(config: &BackendConfig) -> Result<Arc<HttpClient>> {
    let mut headers = reqwest::header::HeaderMap::new();
    let mut anon_key: reqwest::header::HeaderValue = config
        .anon_key
        .parse()
        .map_err(|_| PersonaDeskError::Config("anon key is not a valid header value".into()))?;
    anon_key.set_sensitive(true);
    headers.insert("apikey", anon_key);

    let client = HttpClient::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .max_attempts(config.max_retries)
        .user_agent(concat!("personadesk/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()?;

    Ok(Arc::new(client))
}

/// Percent-encode an object path, segment by segment, preserving `/`.
pub(crate) fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
