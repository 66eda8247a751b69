//! Presentation view-models
//!
//! The webview frontend renders these shapes verbatim; every rendering
//! policy the views own (fallback labels, locale date formatting, loading
//! states, edit/read affordances) is encoded here so it is testable on the
//! Rust side.

mod form;
mod summary;

pub use form::{form_view, ProfileFormView};
pub use summary::{summary_view, ProfileSummaryView};
