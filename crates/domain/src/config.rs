//! Configuration structures
//!
//! Shapes for application configuration. Loading (environment variables,
//! config files) lives in the infra crate.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AVATAR_BUCKET, DEFAULT_BACKEND_MAX_RETRIES, DEFAULT_BACKEND_TIMEOUT_SECS,
};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Hosted backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the hosted platform (e.g. `https://xyz.example.co`)
    pub url: String,
    /// Public (anonymous) API key sent with every request
    pub anon_key: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Total HTTP attempts per request (initial try + retries)
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

/// Object storage settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Public bucket receiving avatar uploads
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_BACKEND_TIMEOUT_SECS
}

fn default_max_retries() -> usize {
    DEFAULT_BACKEND_MAX_RETRIES
}

fn default_bucket() -> String {
    DEFAULT_AVATAR_BUCKET.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { bucket: default_bucket() }
    }
}
