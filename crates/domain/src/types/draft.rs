//! Form draft types
//!
//! The draft is the in-memory, possibly-unsaved copy of a profile held by
//! the edit view. Every field is the raw text the form produced; validation
//! into a [`Profile`] happens once, at save time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::profile::{parse_hobbies, Profile};
use crate::errors::{PersonaDeskError, Result};

/// In-memory form state for the profile editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    /// Raw ISO date text from the date input
    pub date_of_birth: String,
    pub country: String,
    pub religion: String,
    pub blood_group: String,
    pub marital_status: String,
    pub institution: String,
    pub hobbies: Vec<String>,
    /// Carried through from the stored row; replaced only by a successful
    /// upload
    pub avatar_url: Option<String>,
}

impl ProfileDraft {
    /// Build a draft mirroring a stored profile row
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            date_of_birth: profile.date_of_birth.format("%Y-%m-%d").to_string(),
            country: profile.country.clone(),
            religion: profile.religion.clone().unwrap_or_default(),
            blood_group: profile.blood_group.map(|g| g.to_string()).unwrap_or_default(),
            marital_status: profile.marital_status.map(|s| s.to_string()).unwrap_or_default(),
            institution: profile.institution.clone().unwrap_or_default(),
            hobbies: profile.hobbies.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }

    /// Apply a single field update to the draft
    pub fn apply(&mut self, update: ProfileFieldUpdate) {
        match update {
            ProfileFieldUpdate::FirstName(value) => self.first_name = value,
            ProfileFieldUpdate::LastName(value) => self.last_name = value,
            ProfileFieldUpdate::DateOfBirth(value) => self.date_of_birth = value,
            ProfileFieldUpdate::Country(value) => self.country = value,
            ProfileFieldUpdate::Religion(value) => self.religion = value,
            ProfileFieldUpdate::BloodGroup(value) => self.blood_group = value,
            ProfileFieldUpdate::MaritalStatus(value) => self.marital_status = value,
            ProfileFieldUpdate::Institution(value) => self.institution = value,
            ProfileFieldUpdate::Hobbies(raw) => self.hobbies = parse_hobbies(&raw),
        }
    }

    /// Validate the draft into a profile row keyed by `owner_id`.
    ///
    /// Required fields must be non-empty after trimming; the date must be a
    /// valid ISO calendar date; enumerated fields must hold a known literal
    /// when non-empty. Fails with `InvalidInput` naming the offending field
    /// before any external call is made.
    pub fn into_profile(self, owner_id: &str) -> Result<Profile> {
        let first_name = required(&self.first_name, "first name")?;
        let last_name = required(&self.last_name, "last name")?;
        let country = required(&self.country, "country")?;

        let dob_text = required(&self.date_of_birth, "date of birth")?;
        let date_of_birth = NaiveDate::parse_from_str(&dob_text, "%Y-%m-%d").map_err(|_| {
            PersonaDeskError::InvalidInput(format!(
                "date of birth must be an ISO date (YYYY-MM-DD), got '{dob_text}'"
            ))
        })?;

        let blood_group = optional(&self.blood_group).map(|s| s.parse()).transpose()?;
        let marital_status = optional(&self.marital_status).map(|s| s.parse()).transpose()?;

        Ok(Profile {
            owner_id: owner_id.to_string(),
            first_name,
            last_name,
            date_of_birth,
            country,
            religion: optional(&self.religion),
            blood_group,
            marital_status,
            institution: optional(&self.institution),
            hobbies: self.hobbies,
            avatar_url: self.avatar_url,
        })
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PersonaDeskError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One form-field mutation.
///
/// A closed set of update variants: invalid field names are
/// unrepresentable, and each field's transform is explicit. `Hobbies`
/// carries the raw comma-separated text and is the only place hobby
/// splitting occurs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum ProfileFieldUpdate {
    FirstName(String),
    LastName(String),
    DateOfBirth(String),
    Country(String),
    Religion(String),
    BloodGroup(String),
    MaritalStatus(String),
    Institution(String),
    Hobbies(String),
}

/// A selected-but-not-yet-uploaded avatar file.
///
/// At most one pending file exists per workflow; selecting a new one
/// replaces the previous reference. The storage extension comes from the
/// sniffed image format rather than the client file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAvatar {
    /// Original file name, kept for display only
    pub file_name: String,
    /// Sniffed MIME type (e.g. `image/png`)
    pub content_type: String,
    /// Storage extension without the dot (e.g. `png`)
    pub extension: String,
    pub bytes: Vec<u8>,
}
