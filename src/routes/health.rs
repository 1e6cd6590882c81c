//! Liveness endpoint.

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(liveness))]
pub struct HealthApi;

/// Register the liveness route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(liveness))
}

/// Plain-text heartbeat.
///
/// Uptime monitors and load-balancers poll this; it touches no state, so a
/// 200 here means only that the process is up and serving.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain")
    )
)]
pub async fn liveness() -> &'static str {
    "Portfolio backend is running"
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn liveness_reports_running() {
        assert!(liveness().await.contains("running"));
    }
}
