//! Profile entity types
//!
//! The single profile row stored in the hosted backend, keyed by the
//! authenticated owner's id.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::PersonaDeskError;

/// Profile row stored in the hosted backend
///
/// Field names match the remote column names; `owner_id` maps to the `id`
/// primary key column, which is the authenticated user's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Profile {
    #[serde(rename = "id")]
    pub owner_id: String,
    pub first_name: String,
    pub last_name: String,
    /// ISO calendar date (`YYYY-MM-DD`) on the wire
    pub date_of_birth: NaiveDate,
    pub country: String,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    /// Issued by the object store after an avatar upload; never user-typed
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Blood group enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
}

impl BloodGroup {
    /// The stored literal for this blood group
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = PersonaDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Self::APositive),
            "A-" => Ok(Self::ANegative),
            "B+" => Ok(Self::BPositive),
            "B-" => Ok(Self::BNegative),
            "O+" => Ok(Self::OPositive),
            "O-" => Ok(Self::ONegative),
            "AB+" => Ok(Self::AbPositive),
            "AB-" => Ok(Self::AbNegative),
            other => Err(PersonaDeskError::InvalidInput(format!(
                "unknown blood group: {other}"
            ))),
        }
    }
}

/// Marital status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    /// The stored literal for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::Divorced => "divorced",
            Self::Widowed => "widowed",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaritalStatus {
    type Err = PersonaDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "married" => Ok(Self::Married),
            "divorced" => Ok(Self::Divorced),
            "widowed" => Ok(Self::Widowed),
            other => Err(PersonaDeskError::InvalidInput(format!(
                "unknown marital status: {other}"
            ))),
        }
    }
}

/// Split comma-separated hobby text into an ordered sequence.
///
/// Segments are trimmed of surrounding whitespace; segments that are empty
/// after trimming are dropped, so empty or whitespace-only input yields an
/// empty sequence.
pub fn parse_hobbies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
