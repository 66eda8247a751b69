//! Identity provider client for the hosted auth endpoint
//!
//! Holds the current session behind a watch channel and resolves the
//! authenticated user via `GET /auth/v1/user`. The sign-in ceremony itself
//! is external; this adapter only consumes sessions: it restores one from
//! the keychain on startup, answers "who is signed in", and notifies
//! subscribers when the session changes.

use std::sync::Arc;

use async_trait::async_trait;
use personadesk_core::profile::ports::{IdentityProvider, SessionEvents};
use personadesk_domain::{AuthenticatedUser, PersonaDeskError, Result, Session};
use reqwest::Method;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::auth::AccessTokenProvider;
use super::session_store::SessionStore;
use crate::errors::status_to_error;
use crate::http::HttpClient;

/// Identity client against the hosted platform's auth endpoint
pub struct HostedIdentityProvider {
    http: Arc<HttpClient>,
    base_url: String,
    changes: watch::Sender<Option<Session>>,
    store: Option<SessionStore>,
}

impl HostedIdentityProvider {
    pub fn new(http: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            http,
            base_url: trim_base_url(base_url.into()),
            changes,
            store: None,
        }
    }

    /// Persist sessions to (and restore them from) the given store
    pub fn with_session_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Restore a previously persisted session, if one exists.
    ///
    /// Keychain failures degrade to the signed-out state with a warning;
    /// a missing keychain must never keep the application from starting.
    pub fn restore_session(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        match store.load() {
            Ok(Some(session)) => {
                info!(owner_id = %session.owner_id(), "session restored from keychain");
                self.changes.send_replace(Some(session));
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to restore session from keychain");
                false
            }
        }
    }

    /// Replace the current session and notify subscribers.
    ///
    /// Called by the external sign-in flow on success and by `sign_out`;
    /// also used to drop a session the platform has rejected.
    pub fn set_session(&self, session: Option<Session>) {
        if let Some(store) = &self.store {
            let persisted = match &session {
                Some(session) => store.save(session),
                None => store.clear(),
            };
            if let Err(err) = persisted {
                warn!(error = %err, "failed to persist session to keychain");
            }
        }
        self.changes.send_replace(session);
    }

    fn cached_session(&self) -> Option<Session> {
        self.changes.borrow().clone()
    }

    async fn fetch_user(&self, access_token: &str) -> Result<AuthenticatedUser> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let request = self
            .http
            .request(Method::GET, &url)
            .header("Authorization", format!("Bearer {access_token}"));

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|err| PersonaDeskError::Auth(format!("failed to parse user response: {err}")))
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentityProvider {
    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.cached_session())
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>> {
        let Some(session) = self.cached_session() else {
            debug!("no session, current user is none");
            return Ok(None);
        };

        match self.fetch_user(&session.access_token).await {
            Ok(user) => Ok(Some(user)),
            Err(PersonaDeskError::Auth(reason)) => {
                // The platform rejected the token: the session is dead.
                // Reading as signed-out keeps Load's lenient no-op policy.
                warn!(%reason, "session token rejected, clearing session");
                self.set_session(None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn subscribe(&self) -> SessionEvents {
        self.changes.subscribe()
    }
}

#[async_trait]
impl AccessTokenProvider for HostedIdentityProvider {
    async fn access_token(&self) -> Result<String> {
        self.cached_session()
            .map(|session| session.access_token)
            .ok_or(PersonaDeskError::NotAuthenticated)
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn session(owner_id: &str) -> Session {
        Session {
            access_token: format!("token-{owner_id}"),
            refresh_token: None,
            user: AuthenticatedUser { id: owner_id.to_string(), email: None },
        }
    }

    fn provider(base_url: &str) -> HostedIdentityProvider {
        let http = Arc::new(
            HttpClient::builder()
                .max_attempts(1)
                .build()
                .expect("http client"),
        );
        HostedIdentityProvider::new(http, base_url)
    }

    #[tokio::test]
    async fn current_user_without_session_skips_the_network() {
        let server = MockServer::start().await;
        let identity = provider(&server.uri());

        let user = identity.current_user().await.expect("current_user");

        assert!(user.is_none());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn current_user_resolves_via_auth_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("Authorization", "Bearer token-U1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "U1",
                "email": "ada@example.com",
                "aud": "authenticated",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let identity = provider(&server.uri());
        identity.set_session(Some(session("U1")));

        let user = identity.current_user().await.expect("current_user").expect("user");
        assert_eq!(user.id, "U1");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn rejected_token_clears_session_and_reads_as_signed_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let identity = provider(&server.uri());
        identity.set_session(Some(session("U1")));
        let mut events = identity.subscribe();

        let user = identity.current_user().await.expect("current_user");

        assert!(user.is_none());
        assert!(identity.current_session().await.unwrap().is_none());
        events.changed().await.expect("change notification");
        assert!(events.borrow().is_none());
    }

    #[tokio::test]
    async fn server_failure_propagates_instead_of_clearing_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let identity = provider(&server.uri());
        identity.set_session(Some(session("U1")));

        let err = identity.current_user().await.expect_err("should fail");
        assert!(matches!(err, PersonaDeskError::Network(_)));
        assert!(identity.current_session().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn access_token_requires_a_session() {
        let server = MockServer::start().await;
        let identity = provider(&server.uri());

        let err = identity.access_token().await.expect_err("no session");
        assert!(matches!(err, PersonaDeskError::NotAuthenticated));

        identity.set_session(Some(session("U1")));
        assert_eq!(identity.access_token().await.unwrap(), "token-U1");
    }
}
