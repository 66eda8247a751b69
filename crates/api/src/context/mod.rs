//! Application context - dependency injection container

use std::sync::Arc;

use personadesk_core::profile::ports::{AvatarStore, IdentityProvider, ProfileRepository};
use personadesk_core::ProfileWorkflow;
use personadesk_domain::{Config, Result};
use personadesk_infra::backend::{
    build_http_client, AccessTokenProvider, BucketAvatarStore, HostedIdentityProvider,
    RestProfileRepository, SessionStore,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub avatars: Arc<dyn AvatarStore>,
    /// The one profile workflow behind this window. Commands serialize on
    /// the lock; two in-flight saves still race at the store, where the
    /// last upsert wins.
    pub workflow: Arc<Mutex<ProfileWorkflow>>,
}

impl AppContext {
    /// Create a new application context wired against the hosted backend.
    ///
    /// Restores a persisted session from the keychain so a returning user
    /// stays signed in. Must be called within an async runtime: the context
    /// spawns a listener task that resets workflow state when the session
    /// ends.
    pub async fn new(config: Config) -> Result<Self> {
        let http = build_http_client(&config.backend)?;

        let identity = Arc::new(
            HostedIdentityProvider::new(Arc::clone(&http), config.backend.url.as_str())
                .with_session_store(SessionStore::new()),
        );
        identity.restore_session();

        let token_provider: Arc<dyn AccessTokenProvider> = identity.clone();
        let profiles = Arc::new(RestProfileRepository::new(
            Arc::clone(&http),
            config.backend.url.as_str(),
            Arc::clone(&token_provider),
        ));
        let avatars = Arc::new(BucketAvatarStore::new(
            http,
            config.backend.url.as_str(),
            &config.storage,
            token_provider,
        ));

        Ok(Self::with_clients(config, identity, profiles, avatars))
    }

    /// Create a context from explicit client instances.
    ///
    /// This is the test seam: integration tests inject fake identity, row
    /// store, and object store clients here.
    pub fn with_clients(
        config: Config,
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        avatars: Arc<dyn AvatarStore>,
    ) -> Self {
        let workflow = Arc::new(Mutex::new(ProfileWorkflow::new(
            identity.clone(),
            profiles.clone(),
            avatars.clone(),
        )));

        let context = Self { config, identity, profiles, avatars, workflow };
        context.spawn_session_listener();
        context
    }

    /// Watch the identity provider for session changes.
    ///
    /// Sign-out (or a rejected token) drops every trace of the previous
    /// user's draft from memory. The task ends when the identity provider
    /// is dropped.
    fn spawn_session_listener(&self) {
        let mut events = self.identity.subscribe();
        let workflow = Arc::clone(&self.workflow);

        tokio::spawn(async move {
            while events.changed().await.is_ok() {
                let signed_in = events.borrow_and_update().is_some();
                if signed_in {
                    info!("session established");
                } else {
                    info!("session ended, resetting workflow state");
                    workflow.lock().await.reset();
                }
            }
            debug!("session subscription closed");
        });
    }

    /// Check health of all application components
    ///
    /// Returns a HealthStatus with individual component health checks and
    /// an overall health score. The application is considered healthy when
    /// the score is at least 0.8.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        status = status.add_component(self.check_identity_health().await);
        status = status.add_component(self.check_configuration_health());

        // Row and object clients are stateless wrappers over the shared
        // HTTP client; they are exercised on demand.
        status = status.add_component(ComponentHealth::healthy("profile_store"));
        status = status.add_component(ComponentHealth::healthy("avatar_store"));

        status.calculate_score();
        status
    }

    async fn check_identity_health(&self) -> ComponentHealth {
        match self.identity.current_session().await {
            Ok(_) => ComponentHealth::healthy("identity"),
            Err(err) => ComponentHealth::unhealthy("identity", err.to_string()),
        }
    }

    fn check_configuration_health(&self) -> ComponentHealth {
        if self.config.backend.url.is_empty() {
            ComponentHealth::unhealthy("configuration", "backend url is empty")
        } else if self.config.backend.anon_key.is_empty() {
            ComponentHealth::unhealthy("configuration", "anon key is empty")
        } else {
            ComponentHealth::healthy("configuration")
        }
    }
}
