//! CORS policy for the browser frontend.

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::state::AppState;

/// Build the CORS layer from `PORTFOLIO_CORS_ORIGINS`.
///
/// With no allowlist configured every origin is accepted, which suits local
/// development where the frontend runs on an arbitrary dev-server port.
pub fn cors_layer(state: Arc<AppState>) -> CorsLayer {
    let Some(raw) = state.config.cors_allowed_origins.as_deref() else {
        return wildcard();
    };

    let origins: Vec<HeaderValue> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return wildcard();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn wildcard() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
