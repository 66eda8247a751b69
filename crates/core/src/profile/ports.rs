//! Port interfaces for profile management
//!
//! These traits define the boundaries between core business logic and the
//! hosted platform's client implementations: identity, the profile row
//! store, and the avatar object store.

use async_trait::async_trait;
use personadesk_domain::{AuthenticatedUser, Profile, Result, Session};
use tokio::sync::watch;

/// Session-change notifications.
///
/// Receivers observe the session as it changes (sign-in delivers
/// `Some(session)`, sign-out delivers `None`). Dropping the receiver
/// unregisters the subscription.
pub type SessionEvents = watch::Receiver<Option<Session>>;

/// Trait for the external identity provider client
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Get the current session, if one is live
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Resolve the currently authenticated user, if any
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>>;

    /// Subscribe to session changes
    fn subscribe(&self) -> SessionEvents;
}

/// Trait for profile row persistence and retrieval
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile row for an owner; `Ok(None)` means no row yet
    async fn fetch(&self, owner_id: &str) -> Result<Option<Profile>>;

    /// Insert-or-update the row keyed by the profile's owner id
    async fn upsert(&self, profile: Profile) -> Result<()>;
}

/// Trait for the avatar object store
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Upload bytes to `path`, overwriting any existing object
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Resolve a path in the public bucket to its public URL.
    ///
    /// Pure string construction; always succeeds.
    fn public_url(&self, path: &str) -> String;
}
