//! PersonaDesk - profile manager for the hosted backend
//!
//! Main entry point for the Tauri application.

use std::sync::Arc;

use personadesk_infra::config as config_loader;
use tauri::Manager;
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging FIRST so config loading is visible
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    // A missing configuration must not keep the window from opening; the
    // health command reports the degraded state to the frontend.
    let config = match config_loader::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "configuration not found, using defaults");
            personadesk_domain::Config::default()
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(move |app| {
            tracing::info!("PersonaDesk starting...");

            // Initialize application context (restores any persisted session)
            let ctx = tauri::async_runtime::block_on(personadesk_lib::AppContext::new(config))?;
            app.manage(Arc::new(ctx));

            tracing::info!("PersonaDesk initialized successfully");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Profile workflow
            personadesk_lib::load_profile,
            personadesk_lib::begin_profile_edit,
            personadesk_lib::update_profile_field,
            personadesk_lib::select_avatar,
            personadesk_lib::save_profile,
            personadesk_lib::view_profile,
            // Session
            personadesk_lib::get_current_user,
            // Health
            personadesk_lib::get_app_health,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn main() {
    run();
}
