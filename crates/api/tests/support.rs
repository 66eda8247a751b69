//! Shared test support for command integration tests
//!
//! In-memory fakes for the three external clients, injected through the
//! `AppContext::with_clients` seam.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use personadesk_core::profile::ports::{
    AvatarStore, IdentityProvider, ProfileRepository, SessionEvents,
};
use personadesk_domain::{
    AuthenticatedUser, BackendConfig, Config, PersonaDeskError, Profile, Result as DomainResult,
    Session, StorageConfig,
};
use personadesk_lib::AppContext;
use tokio::sync::watch;

pub fn test_config() -> Config {
    Config {
        backend: BackendConfig {
            url: "https://backend.test".into(),
            anon_key: "anon".into(),
            timeout_seconds: 5,
            max_retries: 1,
        },
        storage: StorageConfig::default(),
    }
}

pub fn session(owner_id: &str) -> Session {
    Session {
        access_token: format!("token-{owner_id}"),
        refresh_token: None,
        user: AuthenticatedUser { id: owner_id.to_string(), email: None },
    }
}

/// Fake identity provider holding an optional in-memory session
pub struct FakeIdentity {
    session: Mutex<Option<Session>>,
    changes: watch::Sender<Option<Session>>,
}

impl FakeIdentity {
    pub fn signed_in(owner_id: &str) -> Self {
        let session = session(owner_id);
        let (changes, _) = watch::channel(Some(session.clone()));
        Self { session: Mutex::new(Some(session)), changes }
    }

    pub fn signed_out() -> Self {
        let (changes, _) = watch::channel(None);
        Self { session: Mutex::new(None), changes }
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session.clone();
        self.changes.send_replace(session);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn current_session(&self) -> DomainResult<Option<Session>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn current_user(&self) -> DomainResult<Option<AuthenticatedUser>> {
        Ok(self.session.lock().unwrap().as_ref().map(|s| s.user.clone()))
    }

    fn subscribe(&self) -> SessionEvents {
        self.changes.subscribe()
    }
}

/// In-memory profile row store keyed by owner id
#[derive(Default)]
pub struct InMemoryProfileRepository {
    rows: Mutex<HashMap<String, Profile>>,
    fail_fetch: AtomicBool,
    fail_upsert: AtomicBool,
}

impl InMemoryProfileRepository {
    pub fn with_row(self, profile: Profile) -> Self {
        self.rows.lock().unwrap().insert(profile.owner_id.clone(), profile);
        self
    }

    pub fn row(&self, owner_id: &str) -> Option<Profile> {
        self.rows.lock().unwrap().get(owner_id).cloned()
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_upsert(&self, fail: bool) {
        self.fail_upsert.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn fetch(&self, owner_id: &str) -> DomainResult<Option<Profile>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(PersonaDeskError::Network("row fetch refused".into()));
        }
        Ok(self.rows.lock().unwrap().get(owner_id).cloned())
    }

    async fn upsert(&self, profile: Profile) -> DomainResult<()> {
        if self.fail_upsert.load(Ordering::SeqCst) {
            return Err(PersonaDeskError::Network("upsert refused".into()));
        }
        self.rows.lock().unwrap().insert(profile.owner_id.clone(), profile);
        Ok(())
    }
}

/// Avatar store that records uploads instead of talking to a bucket
#[derive(Default)]
pub struct RecordingAvatarStore {
    uploads: Mutex<Vec<String>>,
}

impl RecordingAvatarStore {
    pub fn uploaded_paths(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl AvatarStore for RecordingAvatarStore {
    async fn upload(&self, path: &str, _bytes: Vec<u8>, _content_type: &str) -> DomainResult<()> {
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://objects.test/storage/v1/object/public/avatars/{path}")
    }
}

pub struct TestContext {
    pub ctx: Arc<AppContext>,
    pub identity: Arc<FakeIdentity>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub avatars: Arc<RecordingAvatarStore>,
}

/// Build a test context around the given identity fake
pub fn test_context(identity: FakeIdentity) -> TestContext {
    test_context_with_rows(identity, Vec::new())
}

/// Build a test context with pre-seeded profile rows
pub fn test_context_with_rows(identity: FakeIdentity, rows: Vec<Profile>) -> TestContext {
    let identity = Arc::new(identity);
    let mut repository = InMemoryProfileRepository::default();
    for row in rows {
        repository = repository.with_row(row);
    }
    let profiles = Arc::new(repository);
    let avatars = Arc::new(RecordingAvatarStore::default());

    let ctx = Arc::new(AppContext::with_clients(
        test_config(),
        identity.clone(),
        profiles.clone(),
        avatars.clone(),
    ));

    TestContext { ctx, identity, profiles, avatars }
}
