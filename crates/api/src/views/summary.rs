//! Read-only summary view-model

use chrono::{Locale, NaiveDate};
use personadesk_core::{LoadState, ProfileWorkflow};
use personadesk_domain::constants::{NOT_SPECIFIED_LABEL, NO_HOBBIES_LABEL};
use personadesk_domain::Profile;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// The read-only profile rendering.
///
/// Optional fields carry the literal fallback label when absent; hobbies
/// list only the non-empty entries, with `hobbies_fallback` set when there
/// are none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ProfileSummaryView {
    pub loading: bool,
    pub full_name: String,
    /// Date of birth formatted for the viewer's locale
    pub date_of_birth: String,
    pub country: String,
    pub religion: String,
    pub blood_group: String,
    pub marital_status: String,
    pub institution: String,
    pub hobbies: Vec<String>,
    pub hobbies_fallback: Option<String>,
    pub avatar_url: Option<String>,
}

/// Build the summary view from the workflow's last-loaded row.
///
/// `locale` is the viewer's BCP-47 tag (e.g. `en-US`); unknown tags fall
/// back to the POSIX locale.
pub fn summary_view(workflow: &ProfileWorkflow, locale: Option<&str>) -> ProfileSummaryView {
    if workflow.load_state() == LoadState::Pending {
        return loading_view();
    }

    match workflow.stored() {
        Some(profile) => rendered_view(profile, locale),
        None => empty_view(),
    }
}

fn rendered_view(profile: &Profile, locale: Option<&str>) -> ProfileSummaryView {
    let hobbies = visible_hobbies(&profile.hobbies);
    let hobbies_fallback =
        if hobbies.is_empty() { Some(NO_HOBBIES_LABEL.to_string()) } else { None };

    ProfileSummaryView {
        loading: false,
        full_name: format!("{} {}", profile.first_name, profile.last_name).trim().to_string(),
        date_of_birth: format_birth_date(profile.date_of_birth, locale),
        country: profile.country.clone(),
        religion: optional_text(profile.religion.as_deref()),
        blood_group: optional_text(profile.blood_group.map(|g| g.as_str())),
        marital_status: optional_text(profile.marital_status.map(|s| s.as_str())),
        institution: optional_text(profile.institution.as_deref()),
        hobbies,
        hobbies_fallback,
        avatar_url: profile.avatar_url.clone(),
    }
}

fn loading_view() -> ProfileSummaryView {
    ProfileSummaryView {
        loading: true,
        full_name: String::new(),
        date_of_birth: String::new(),
        country: String::new(),
        religion: String::new(),
        blood_group: String::new(),
        marital_status: String::new(),
        institution: String::new(),
        hobbies: Vec::new(),
        hobbies_fallback: None,
        avatar_url: None,
    }
}

/// No row yet: everything reads as unspecified
fn empty_view() -> ProfileSummaryView {
    ProfileSummaryView {
        loading: false,
        full_name: String::new(),
        date_of_birth: NOT_SPECIFIED_LABEL.to_string(),
        country: NOT_SPECIFIED_LABEL.to_string(),
        religion: NOT_SPECIFIED_LABEL.to_string(),
        blood_group: NOT_SPECIFIED_LABEL.to_string(),
        marital_status: NOT_SPECIFIED_LABEL.to_string(),
        institution: NOT_SPECIFIED_LABEL.to_string(),
        hobbies: Vec::new(),
        hobbies_fallback: Some(NO_HOBBIES_LABEL.to_string()),
        avatar_url: None,
    }
}

fn optional_text(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_SPECIFIED_LABEL.to_string(),
    }
}

/// Entries that actually render; rows persisted by older clients may hold
/// empty strings, which read as "no hobbies" rather than as blank bullets.
fn visible_hobbies(hobbies: &[String]) -> Vec<String> {
    hobbies.iter().filter(|hobby| !hobby.trim().is_empty()).cloned().collect()
}

/// Format a calendar date for the viewer's locale tag
fn format_birth_date(date: NaiveDate, locale_tag: Option<&str>) -> String {
    let locale = resolve_locale(locale_tag);
    date.format_localized("%e %B %Y", locale).to_string().trim().to_string()
}

fn resolve_locale(tag: Option<&str>) -> Locale {
    tag.and_then(|tag| Locale::try_from(tag.replace('-', "_").as_str()).ok())
        .unwrap_or(Locale::POSIX)
}
