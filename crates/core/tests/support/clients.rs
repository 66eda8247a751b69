//! In-memory fake implementations of the core ports
//!
//! Deterministic fakes for the identity provider, the profile row store,
//! and the avatar object store. A shared operation log records the order of
//! external calls so tests can assert sequencing (upload strictly before
//! upsert, nothing at all when unauthenticated).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use personadesk_core::profile::ports::{
    AvatarStore, IdentityProvider, ProfileRepository, SessionEvents,
};
use personadesk_domain::{
    AuthenticatedUser, PersonaDeskError, Profile, Result as DomainResult, Session,
};
use tokio::sync::watch;

/// Ordered log of external calls, shared between fakes
pub type OpLog = Arc<Mutex<Vec<String>>>;

pub fn new_op_log() -> OpLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn record(ops: &OpLog, entry: String) {
    ops.lock().unwrap().push(entry);
}

/// Fake identity provider holding an optional in-memory session
pub struct FakeIdentity {
    session: Mutex<Option<Session>>,
    changes: watch::Sender<Option<Session>>,
}

impl FakeIdentity {
    pub fn signed_in(owner_id: &str) -> Self {
        let session = Session {
            access_token: format!("token-{owner_id}"),
            refresh_token: None,
            user: AuthenticatedUser { id: owner_id.to_string(), email: None },
        };
        let (changes, _) = watch::channel(Some(session.clone()));
        Self { session: Mutex::new(Some(session)), changes }
    }

    pub fn signed_out() -> Self {
        let (changes, _) = watch::channel(None);
        Self { session: Mutex::new(None), changes }
    }

    /// Replace the current session and notify subscribers
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
    ops: OpLog,
}

impl InMemoryProfileRepository {
    pub fn new(ops: OpLog) -> Self {
        Self { ops, ..Self::default() }
    }

    pub fn with_row(self, profile: Profile) -> Self {
        self.rows.lock().unwrap().insert(profile.owner_id.clone(), profile);
        self
    }

    pub fn row(&self, owner_id: &str) -> Option<Profile> {
        self.rows.lock().unwrap().get(owner_id).cloned()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
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
        record(&self.ops, format!("fetch:{owner_id}"));
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(PersonaDeskError::Network("row fetch refused".into()));
        }
        Ok(self.rows.lock().unwrap().get(owner_id).cloned())
    }

    async fn upsert(&self, profile: Profile) -> DomainResult<()> {
        record(&self.ops, format!("upsert:{}", profile.owner_id));
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
    uploads: Mutex<Vec<(String, usize, String)>>,
    fail_uploads: AtomicBool,
    ops: OpLog,
}

impl RecordingAvatarStore {
    pub fn new(ops: OpLog) -> Self {
        Self { ops, ..Self::default() }
    }

    pub fn uploads(&self) -> Vec<(String, usize, String)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvatarStore for RecordingAvatarStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> DomainResult<()> {
        record(&self.ops, format!("upload:{path}"));
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(PersonaDeskError::Network("bucket refused object".into()));
        }
        self.uploads.lock().unwrap().push((
            path.to_string(),
            bytes.len(),
            content_type.to_string(),
        ));
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://objects.test/storage/v1/object/public/avatars/{path}")
    }
}
