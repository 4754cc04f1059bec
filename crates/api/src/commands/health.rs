//! Health check command for monitoring

use crate::context::AppContext;
use crate::utils::health::HealthReport;

/// Probe the client's stores and the public site.
///
/// Serialized, a report looks like
/// ```json
/// {
///   "healthy": false,
///   "score": 0.75,
///   "components": [
///     { "component": "token_store", "error": null },
///     { "component": "cart", "error": null },
///     { "component": "search_history", "error": null },
///     { "component": "public_site", "error": "Network error: connection refused" }
///   ],
///   "checked_at": "2024-05-01T08:30:00Z"
/// }
/// ```
pub async fn get_app_health(ctx: &AppContext) -> HealthReport {
    ctx.health_check().await
}
