//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Explicit, versioned column list for profile row fetches.
///
/// The repository adapter must request exactly these columns; a wildcard
/// select would silently change the entity shape when the remote schema
/// evolves.
pub const PROFILE_COLUMNS: &str = "id,first_name,last_name,date_of_birth,country,religion,blood_group,marital_status,institution,hobbies,avatar_url";

/// Table holding profile rows in the hosted store.
pub const PROFILES_TABLE: &str = "profiles";

/// Public bucket holding avatar objects.
pub const DEFAULT_AVATAR_BUCKET: &str = "avatars";

/// Object name under the owner's path segment. The full object path is
/// `{owner_id}/{AVATAR_OBJECT_STEM}.{ext}`.
pub const AVATAR_OBJECT_STEM: &str = "avatar";

// Presentation fallback labels
pub const NOT_SPECIFIED_LABEL: &str = "Not specified";
pub const NO_HOBBIES_LABEL: &str = "No hobbies specified";

// Backend defaults
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_MAX_RETRIES: usize = 3;

// Keychain storage for the restored session
pub const KEYCHAIN_SERVICE: &str = "PersonaDesk";
pub const KEYCHAIN_SESSION_ACCOUNT: &str = "session";
