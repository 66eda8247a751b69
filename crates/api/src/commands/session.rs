//! Session commands

use std::sync::Arc;
use std::time::Instant;

use personadesk_domain::{AuthenticatedUser, Result as DomainResult};
use tauri::State;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Resolve the currently authenticated user, if any.
///
/// The frontend uses this to decide between the sign-in prompt and the
/// profile views. `None` is a normal answer, not an error.
#[tauri::command]
pub async fn get_current_user(
    ctx: State<'_, Arc<AppContext>>,
) -> Result<Option<AuthenticatedUser>, String> {
    let start = Instant::now();
    let result = run_get_current_user(ctx.inner()).await;
    log_command_execution("session::get_current_user", start.elapsed(), result.is_ok());
    result.map_err(|e| e.to_string())
}

/// Inner implementation (public for integration tests)
pub async fn run_get_current_user(ctx: &AppContext) -> DomainResult<Option<AuthenticatedUser>> {
    ctx.identity.current_user().await
}
