//! Health check command for frontend monitoring

use std::sync::Arc;

use tauri::State;

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// Get application health status
///
/// Returns overall health information including:
/// - Overall health score (0.0 - 1.0)
/// - Individual component health checks (identity, configuration, stores)
/// - Timestamp of the health check
#[tauri::command]
pub async fn get_app_health(ctx: State<'_, Arc<AppContext>>) -> Result<HealthStatus, String> {
    Ok(ctx.health_check().await)
}
