use std::time::Duration;

use personadesk_domain::PersonaDeskError;
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"profile::save_profile"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
///
/// The helper keeps the command wrappers concise and the log shape
/// consistent. Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `PersonaDeskError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &PersonaDeskError) -> &'static str {
    match error {
        PersonaDeskError::NotAuthenticated => "not_authenticated",
        PersonaDeskError::NotFound(_) => "not_found",
        PersonaDeskError::Upload(_) => "upload",
        PersonaDeskError::Persist(_) => "persist",
        PersonaDeskError::Auth(_) => "auth",
        PersonaDeskError::Network(_) => "network",
        PersonaDeskError::Config(_) => "config",
        PersonaDeskError::InvalidInput(_) => "invalid_input",
        PersonaDeskError::Security(_) => "security",
        PersonaDeskError::Internal(_) => "internal",
    }
}
