//! # PersonaDesk API
//!
//! Tauri application layer - commands and main entry point.
//!
//! This crate contains:
//! - Tauri commands (frontend → backend bridge)
//! - Application context (dependency injection)
//! - Presentation view-models for the form and summary views
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Provides Tauri commands for the frontend

pub mod commands;
pub mod context;
pub mod utils;
pub mod views;

// Re-export for convenience
pub use commands::*;
pub use context::*;
pub use views::{ProfileFormView, ProfileSummaryView};
