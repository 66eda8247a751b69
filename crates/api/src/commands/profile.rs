//! Profile commands
//!
//! The frontend drives the profile workflow exclusively through these
//! commands. Each Tauri wrapper delegates to a public inner function that
//! integration tests call directly; errors cross the bridge as
//! human-readable strings for the edit view's inline message.

use std::sync::Arc;
use std::time::Instant;

use personadesk_domain::{
    PendingAvatar, PersonaDeskError, ProfileFieldUpdate, Result as DomainResult,
};
use tauri::State;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};
use crate::views::{form_view, summary_view, ProfileFormView, ProfileSummaryView};

// =============================================================================
// Command 1: load_profile
// =============================================================================

/// Load the current user's profile row into the form.
///
/// Mounting the edit view calls this. Fetch failures other than "no row
/// yet" are logged and swallowed; the form stays usable in its pre-load
/// state either way.
#[tauri::command]
pub async fn load_profile(ctx: State<'_, Arc<AppContext>>) -> Result<ProfileFormView, String> {
    let start = Instant::now();
    let view = run_load_profile(ctx.inner()).await;
    log_command_execution("profile::load_profile", start.elapsed(), true);
    Ok(view)
}

/// Inner implementation (public for integration tests)
pub async fn run_load_profile(ctx: &AppContext) -> ProfileFormView {
    let mut workflow = ctx.workflow.lock().await;

    if let Err(err) = workflow.load().await {
        // Lenient by design: the form remains usable without the row.
        warn!(error = %err, error_type = error_label(&err), "profile load failed");
    }

    form_view(&workflow)
}

// =============================================================================
// Command 2: begin_profile_edit
// =============================================================================

/// Switch the form from read mode to edit mode.
///
/// Field values are untouched; only the affordances change.
#[tauri::command]
pub async fn begin_profile_edit(
    ctx: State<'_, Arc<AppContext>>,
) -> Result<ProfileFormView, String> {
    let start = Instant::now();
    let view = run_begin_profile_edit(ctx.inner()).await;
    log_command_execution("profile::begin_profile_edit", start.elapsed(), true);
    Ok(view)
}

/// Inner implementation (public for integration tests)
pub async fn run_begin_profile_edit(ctx: &AppContext) -> ProfileFormView {
    let mut workflow = ctx.workflow.lock().await;
    workflow.begin_edit();
    form_view(&workflow)
}

// =============================================================================
// Command 3: update_profile_field
// =============================================================================

/// Apply a single field update to the draft.
///
/// The update is a closed enum; the hobbies variant carries raw
/// comma-separated text and is split here, not in the frontend.
#[tauri::command]
pub async fn update_profile_field(
    ctx: State<'_, Arc<AppContext>>,
    update: ProfileFieldUpdate,
) -> Result<ProfileFormView, String> {
    let start = Instant::now();
    let view = run_update_profile_field(ctx.inner(), update).await;
    log_command_execution("profile::update_profile_field", start.elapsed(), true);
    Ok(view)
}

/// Inner implementation (public for integration tests)
pub async fn run_update_profile_field(
    ctx: &AppContext,
    update: ProfileFieldUpdate,
) -> ProfileFormView {
    let mut workflow = ctx.workflow.lock().await;
    workflow.update_field(update);
    form_view(&workflow)
}

// =============================================================================
// Command 4: select_avatar
// =============================================================================

/// Hold a selected avatar file for upload on the next save.
///
/// The bytes are sniffed: the storage extension and content type come from
/// the actual image format, never from the client file name. Rejects
/// anything that is not a recognized image.
#[tauri::command]
pub async fn select_avatar(
    ctx: State<'_, Arc<AppContext>>,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<ProfileFormView, String> {
    let start = Instant::now();
    let result = run_select_avatar(ctx.inner(), file_name, bytes).await;
    log_command_execution("profile::select_avatar", start.elapsed(), result.is_ok());
    result.map_err(|e| e.to_string())
}

/// Inner implementation (public for integration tests)
pub async fn run_select_avatar(
    ctx: &AppContext,
    file_name: String,
    bytes: Vec<u8>,
) -> DomainResult<ProfileFormView> {
    let format = image::guess_format(&bytes).map_err(|_| {
        PersonaDeskError::InvalidInput("selected file is not a recognized image".into())
    })?;
    let extension = format.extensions_str().first().copied().ok_or_else(|| {
        PersonaDeskError::InvalidInput("selected image format has no known extension".into())
    })?;
    let content_type = format.to_mime_type();

    let mut workflow = ctx.workflow.lock().await;
    workflow.select_avatar(PendingAvatar {
        file_name,
        content_type: content_type.to_string(),
        extension: extension.to_string(),
        bytes,
    });

    Ok(form_view(&workflow))
}

// =============================================================================
// Command 5: save_profile
// =============================================================================

/// Validate and persist the draft, uploading any pending avatar first.
///
/// On failure the workflow stays in edit mode with the draft untouched and
/// the error message is surfaced inline; on success the form switches to
/// read mode showing exactly what the store now holds.
#[tauri::command]
pub async fn save_profile(ctx: State<'_, Arc<AppContext>>) -> Result<ProfileFormView, String> {
    let start = Instant::now();
    let result = run_save_profile(ctx.inner()).await;
    log_command_execution("profile::save_profile", start.elapsed(), result.is_ok());
    result.map_err(|e| e.to_string())
}

/// Inner implementation (public for integration tests)
pub async fn run_save_profile(ctx: &AppContext) -> DomainResult<ProfileFormView> {
    let mut workflow = ctx.workflow.lock().await;

    match workflow.save().await {
        Ok(()) => {
            info!("profile saved");
            Ok(form_view(&workflow))
        }
        Err(err) => {
            warn!(error = %err, error_type = error_label(&err), "profile save failed");
            Err(err)
        }
    }
}

// =============================================================================
// Command 6: view_profile
// =============================================================================

/// Load and render the read-only profile view.
///
/// `locale` is the viewer's BCP-47 tag (`navigator.language`); the date of
/// birth is formatted for it. Every absent optional field renders its
/// fallback label.
#[tauri::command]
pub async fn view_profile(
    ctx: State<'_, Arc<AppContext>>,
    locale: Option<String>,
) -> Result<ProfileSummaryView, String> {
    let start = Instant::now();
    let view = run_view_profile(ctx.inner(), locale.as_deref()).await;
    log_command_execution("profile::view_profile", start.elapsed(), true);
    Ok(view)
}

/// Inner implementation (public for integration tests)
pub async fn run_view_profile(ctx: &AppContext, locale: Option<&str>) -> ProfileSummaryView {
    let mut workflow = ctx.workflow.lock().await;

    if let Err(err) = workflow.load().await {
        warn!(error = %err, error_type = error_label(&err), "profile load failed");
    }

    summary_view(&workflow, locale)
}
