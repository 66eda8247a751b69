//! Profile row store client for the hosted row endpoint
//!
//! Speaks the platform's REST row surface. Fetches request the explicit,
//! versioned column list (`PROFILE_COLUMNS`) rather than a wildcard, so a
//! remote schema change cannot silently reshape the entity; upserts rely on
//! the endpoint's merge-on-conflict semantics over the primary key.

use std::sync::Arc;

use async_trait::async_trait;
use personadesk_core::profile::ports::ProfileRepository;
use personadesk_domain::constants::{PROFILES_TABLE, PROFILE_COLUMNS};
use personadesk_domain::{PersonaDeskError, Profile, Result};
use reqwest::Method;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use crate::errors::status_to_error;
use crate::http::HttpClient;

/// REST implementation of [`ProfileRepository`]
pub struct RestProfileRepository {
    http: Arc<HttpClient>,
    base_url: String,
    auth: Arc<dyn AccessTokenProvider>,
}

impl RestProfileRepository {
    pub fn new(
        http: Arc<HttpClient>,
        base_url: impl Into<String>,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, PROFILES_TABLE)
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    #[instrument(skip(self))]
    async fn fetch(&self, owner_id: &str) -> Result<Option<Profile>> {
        let token = self.auth.access_token().await?;
        let id_filter = format!("eq.{owner_id}");

        let request = self
            .http
            .request(Method::GET, self.rows_url())
            .query(&[
                ("select", PROFILE_COLUMNS),
                ("id", id_filter.as_str()),
                ("limit", "1"),
            ])
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", "application/json");

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, body));
        }

        let mut rows: Vec<Profile> = response.json().await.map_err(|err| {
            PersonaDeskError::Internal(format!("failed to parse profile rows: {err}"))
        })?;

        debug!(owner_id, found = !rows.is_empty(), "profile fetch complete");
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    #[instrument(skip(self, profile), fields(owner_id = %profile.owner_id))]
    async fn upsert(&self, profile: Profile) -> Result<()> {
        let token = self.auth.access_token().await?;

        let request = self
            .http
            .request(Method::POST, self.rows_url())
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&profile);

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, body));
        }

        debug!("profile upsert complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct StaticTokenProvider(&'static str);

    #[async_trait]
    impl AccessTokenProvider for StaticTokenProvider {
        async fn access_token(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct NoTokenProvider;

    #[async_trait]
    impl AccessTokenProvider for NoTokenProvider {
        async fn access_token(&self) -> Result<String> {
            Err(PersonaDeskError::NotAuthenticated)
        }
    }

    fn repository(base_url: &str, auth: Arc<dyn AccessTokenProvider>) -> RestProfileRepository {
        let http = Arc::new(
            HttpClient::builder()
                .max_attempts(1)
                .build()
                .expect("http client"),
        );
        RestProfileRepository::new(http, base_url, auth)
    }

    fn row_json() -> serde_json::Value {
        serde_json::json!({
            "id": "U1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "date_of_birth": "1815-12-10",
            "country": "UK",
            "religion": null,
            "blood_group": "O-",
            "marital_status": "married",
            "institution": null,
            "hobbies": ["mathematics"],
            "avatar_url": null,
        })
    }

    #[tokio::test]
    async fn fetch_requests_explicit_columns_and_parses_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("select", PROFILE_COLUMNS))
            .and(query_param("id", "eq.U1"))
            .and(query_param("limit", "1"))
            .and(header("Authorization", "Bearer jwt"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([row_json()])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let repo = repository(&server.uri(), Arc::new(StaticTokenProvider("jwt")));
        let profile = repo.fetch("U1").await.expect("fetch").expect("row");

        assert_eq!(profile.owner_id, "U1");
        assert_eq!(
            profile.date_of_birth,
            NaiveDate::from_ymd_opt(1815, 12, 10).unwrap()
        );
        assert_eq!(profile.hobbies, vec!["mathematics"]);
    }

    #[tokio::test]
    async fn fetch_with_no_row_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let repo = repository(&server.uri(), Arc::new(StaticTokenProvider("jwt")));
        let profile = repo.fetch("U1").await.expect("fetch");

        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_maps_to_domain_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(500).set_body_string("storage exploded"))
            .mount(&server)
            .await;

        let repo = repository(&server.uri(), Arc::new(StaticTokenProvider("jwt")));
        let err = repo.fetch("U1").await.expect_err("should fail");

        assert!(matches!(err, PersonaDeskError::Network(msg) if msg.contains("storage exploded")));
    }

    #[tokio::test]
    async fn fetch_without_token_never_reaches_the_server() {
        let server = MockServer::start().await;
        let repo = repository(&server.uri(), Arc::new(NoTokenProvider));

        let err = repo.fetch("U1").await.expect_err("should fail");

        assert!(matches!(err, PersonaDeskError::NotAuthenticated));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_posts_with_merge_duplicates_preference() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/profiles"))
            .and(header("Prefer", "resolution=merge-duplicates,return=minimal"))
            .and(header("Authorization", "Bearer jwt"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let repo = repository(&server.uri(), Arc::new(StaticTokenProvider("jwt")));
        let profile: Profile = serde_json::from_value(row_json()).unwrap();
        repo.upsert(profile).await.expect("upsert");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["id"], "U1");
        assert_eq!(body["date_of_birth"], "1815-12-10");
    }

    #[tokio::test]
    async fn upsert_conflict_maps_to_persist_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(409).set_body_string("duplicate key"))
            .mount(&server)
            .await;

        let repo = repository(&server.uri(), Arc::new(StaticTokenProvider("jwt")));
        let profile: Profile = serde_json::from_value(row_json()).unwrap();
        let err = repo.upsert(profile).await.expect_err("should fail");

        assert!(matches!(err, PersonaDeskError::Persist(msg) if msg.contains("duplicate key")));
    }
}
