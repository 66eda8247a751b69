//! Domain types and models

pub mod draft;
pub mod profile;
pub mod session;

pub use draft::{PendingAvatar, ProfileDraft, ProfileFieldUpdate};
pub use profile::{parse_hobbies, BloodGroup, MaritalStatus, Profile};
pub use session::{AuthenticatedUser, Session};
