//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PERSONADESK_BACKEND_URL`: Base URL of the hosted platform
//! - `PERSONADESK_ANON_KEY`: Public (anonymous) API key
//! - `PERSONADESK_BACKEND_TIMEOUT`: Request timeout in seconds (optional)
//! - `PERSONADESK_BACKEND_MAX_RETRIES`: HTTP attempts per request (optional)
//! - `PERSONADESK_AVATAR_BUCKET`: Avatar bucket name (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` or `./config.json` (current working directory)
//! 2. `./personadesk.toml` or `./personadesk.json` (current working directory)
//! 3. `../config.toml` or `../config.json` (parent directory)

use std::path::{Path, PathBuf};

use personadesk_domain::constants::{DEFAULT_BACKEND_MAX_RETRIES, DEFAULT_BACKEND_TIMEOUT_SECS};
use personadesk_domain::{BackendConfig, Config, PersonaDeskError, Result, StorageConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PersonaDeskError::Config` if configuration cannot be loaded
/// from either source, the file format is invalid, or required fields are
/// missing.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `PERSONADESK_BACKEND_URL` and `PERSONADESK_ANON_KEY` must be present;
/// the remaining variables fall back to defaults.
///
/// # Errors
/// Returns `PersonaDeskError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let url = env_var("PERSONADESK_BACKEND_URL")?;
    let anon_key = env_var("PERSONADESK_ANON_KEY")?;

    let timeout_seconds = match std::env::var("PERSONADESK_BACKEND_TIMEOUT") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| PersonaDeskError::Config(format!("Invalid backend timeout: {e}")))?,
        Err(_) => DEFAULT_BACKEND_TIMEOUT_SECS,
    };

    let max_retries = match std::env::var("PERSONADESK_BACKEND_MAX_RETRIES") {
        Ok(raw) => raw
            .parse::<usize>()
            .map_err(|e| PersonaDeskError::Config(format!("Invalid retry count: {e}")))?,
        Err(_) => DEFAULT_BACKEND_MAX_RETRIES,
    };

    let storage = match std::env::var("PERSONADESK_AVATAR_BUCKET") {
        Ok(bucket) => StorageConfig { bucket },
        Err(_) => StorageConfig::default(),
    };

    Ok(Config {
        backend: BackendConfig { url, anon_key, timeout_seconds, max_retries },
        storage,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both TOML and JSON formats (detected by file extension).
///
/// # Errors
/// Returns `PersonaDeskError::Config` if the file is missing or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PersonaDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PersonaDeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PersonaDeskError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, dispatching on file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PersonaDeskError::Config(format!("Invalid TOML config: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PersonaDeskError::Config(format!("Invalid JSON config: {e}"))),
        other => Err(PersonaDeskError::Config(format!(
            "Unsupported config format '{other}' (expected toml or json)"
        ))),
    }
}

/// Probe the standard locations for a config file
fn probe_config_paths() -> Option<PathBuf> {
    let candidates = [
        "config.toml",
        "config.json",
        "personadesk.toml",
        "personadesk.json",
        "../config.toml",
        "../config.json",
    ];

    candidates.iter().map(PathBuf::from).find(|path| path.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| PersonaDeskError::Config(format!("Missing environment variable: {name}")))
}
