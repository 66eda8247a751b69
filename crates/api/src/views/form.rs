//! Edit/summary form view-model

use personadesk_core::{EditorMode, LoadState, ProfileWorkflow};
use personadesk_domain::ProfileDraft;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// The profile form as the frontend renders it.
///
/// While `loading` is set the frontend shows a loading indicator and none
/// of the field content. Inputs are editable exactly when `editing`; the
/// save action shows only while editing, the edit/view navigation actions
/// only while reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ProfileFormView {
    pub loading: bool,
    pub editing: bool,
    pub draft: ProfileDraft,
    /// Display name of the selected-but-not-yet-uploaded avatar file
    pub pending_avatar_name: Option<String>,
    pub can_save: bool,
    pub show_edit_action: bool,
    pub show_view_action: bool,
}

/// Build the form view from the workflow's current state
pub fn form_view(workflow: &ProfileWorkflow) -> ProfileFormView {
    let loading = workflow.load_state() == LoadState::Pending;
    let editing = workflow.mode() == EditorMode::Edit;

    ProfileFormView {
        loading,
        editing,
        draft: workflow.draft().clone(),
        pending_avatar_name: workflow.pending_avatar().map(|file| file.file_name.clone()),
        can_save: !loading && editing,
        show_edit_action: !loading && !editing,
        show_view_action: !loading && !editing,
    }
}
