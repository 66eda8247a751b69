//! Profile workflow - core business logic
//!
//! Mediates between the authenticated identity, the form's in-memory draft,
//! the avatar object store, and the profile row. All state is scoped to one
//! workflow instance; the application layer owns exactly one per window.

use std::sync::Arc;

use personadesk_domain::constants::AVATAR_OBJECT_STEM;
use personadesk_domain::{
    PendingAvatar, PersonaDeskError, Profile, ProfileDraft, ProfileFieldUpdate, Result,
};
use tracing::{debug, info, warn};

use super::ports::{AvatarStore, IdentityProvider, ProfileRepository};

/// Whether the form renders as read-only or editable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Read,
    Edit,
}

/// Whether the first load has completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
}

/// Deterministic object path for an owner's avatar.
///
/// The first path segment is the owner id so the bucket's write policy can
/// match it; the same path is reused across uploads for a given owner and
/// extension, so repeated saves overwrite rather than accumulate objects.
pub fn avatar_object_path(owner_id: &str, extension: &str) -> String {
    format!("{owner_id}/{AVATAR_OBJECT_STEM}.{extension}")
}

/// Profile workflow service
pub struct ProfileWorkflow {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    avatars: Arc<dyn AvatarStore>,
    draft: ProfileDraft,
    mode: EditorMode,
    load_state: LoadState,
    pending_avatar: Option<PendingAvatar>,
    stored: Option<Profile>,
}

impl ProfileWorkflow {
    /// Create a new workflow. A fresh workflow starts in edit mode with an
    /// empty draft, matching the "no row yet" presentation.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        avatars: Arc<dyn AvatarStore>,
    ) -> Self {
        Self {
            identity,
            profiles,
            avatars,
            draft: ProfileDraft::default(),
            mode: EditorMode::Edit,
            load_state: LoadState::Pending,
            pending_avatar: None,
            stored: None,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// The last-loaded stored row, if any
    pub fn stored(&self) -> Option<&Profile> {
        self.stored.as_ref()
    }

    pub fn pending_avatar(&self) -> Option<&PendingAvatar> {
        self.pending_avatar.as_ref()
    }

    /// Drop all per-session state, returning to the fresh-workflow shape.
    ///
    /// Called when the session ends; the next load repopulates from the
    /// store if a user signs back in.
    pub fn reset(&mut self) {
        self.draft = ProfileDraft::default();
        self.mode = EditorMode::Edit;
        self.load_state = LoadState::Pending;
        self.pending_avatar = None;
        self.stored = None;
    }

    /// Load the profile row for the current user.
    ///
    /// With no resolvable user no fetch is attempted and the empty draft
    /// stays editable. With a user but no row yet, the draft keeps its
    /// defaults and edit mode stays active. A fetch failure leaves the
    /// draft unchanged and is returned for the caller to log.
    pub async fn load(&mut self) -> Result<()> {
        let Some(user) = self.identity.current_user().await? else {
            debug!("load skipped, no authenticated user");
            self.load_state = LoadState::Ready;
            return Ok(());
        };

        match self.profiles.fetch(&user.id).await? {
            Some(profile) => {
                debug!(owner_id = %user.id, "profile row loaded");
                self.draft = ProfileDraft::from_profile(&profile);
                self.stored = Some(profile);
                self.mode = EditorMode::Read;
            }
            None => {
                debug!(owner_id = %user.id, "no profile row yet, keeping edit mode");
                self.stored = None;
                self.mode = EditorMode::Edit;
            }
        }

        self.load_state = LoadState::Ready;
        Ok(())
    }

    /// Switch to edit mode without altering the draft's field values
    pub fn begin_edit(&mut self) {
        self.mode = EditorMode::Edit;
    }

    /// Apply one field update to the draft
    pub fn update_field(&mut self, update: ProfileFieldUpdate) {
        self.draft.apply(update);
    }

    /// Hold a pending avatar file without uploading it yet.
    ///
    /// At most one pending file is held; a new selection replaces the
    /// previous reference.
    pub fn select_avatar(&mut self, file: PendingAvatar) {
        debug!(file_name = %file.file_name, size = file.bytes.len(), "avatar file selected");
        self.pending_avatar = Some(file);
    }

    /// Validate and persist the draft, uploading any pending avatar first.
    ///
    /// The upload completes (successfully or not) strictly before the
    /// upsert is attempted. On any failure the draft is preserved and the
    /// workflow stays in edit mode.
    pub async fn save(&mut self) -> Result<()> {
        let user = self
            .identity
            .current_user()
            .await?
            .ok_or(PersonaDeskError::NotAuthenticated)?;

        let mut profile = self.draft.clone().into_profile(&user.id)?;

        if let Some(pending) = self.pending_avatar.take() {
            let path = avatar_object_path(&user.id, &pending.extension);
            let uploaded = self
                .avatars
                .upload(&path, pending.bytes.clone(), &pending.content_type)
                .await;

            if let Err(err) = uploaded {
                warn!(owner_id = %user.id, path = %path, error = %err, "avatar upload failed");
                // Keep the selection so the user can retry the save.
                self.pending_avatar = Some(pending);
                return Err(PersonaDeskError::Upload(err.to_string()));
            }

            let url = self.avatars.public_url(&path);
            info!(owner_id = %user.id, url = %url, "avatar uploaded");
            profile.avatar_url = Some(url.clone());
            self.draft.avatar_url = Some(url);
        }

        self.profiles
            .upsert(profile)
            .await
            .map_err(|err| PersonaDeskError::Persist(err.to_string()))?;

        info!(owner_id = %user.id, "profile saved");
        self.mode = EditorMode::Read;

        // Reload so the views reflect exactly what the store now holds,
        // not just the optimistic local draft. The save itself succeeded;
        // a reload failure is logged, not surfaced.
        if let Err(err) = self.load().await {
            warn!(error = %err, "reload after save failed");
        }

        Ok(())
    }
}
