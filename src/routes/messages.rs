//! Message archive, gated behind the admin bearer token.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::middleware;
use axum::routing::get;
use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::db::{ContactMessage, MessageStore};
use crate::error::ApiError;
use crate::middleware::auth;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_messages), components(schemas(MessageResponse)))]
pub struct MessagesApi;

/// Register the archive route. The credential check sits on this router
/// alone, so nothing else inherits it and no unauthenticated alias of the
/// archive can exist.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/messages", get(list_messages))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}

/// A stored message as returned to the operator.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Submission time, RFC 3339.
    pub created_at: String,
}

fn to_response(record: ContactMessage) -> MessageResponse {
    MessageResponse {
        id: record.id,
        name: record.name,
        email: record.email,
        message: record.message,
        created_at: record.created_at.to_rfc3339(),
    }
}

/// Every stored message, newest first.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    responses(
        (status = 200, description = "All stored messages, newest first", body = Vec<MessageResponse>),
        (status = 401, description = "No credentials presented"),
        (status = 403, description = "Credentials presented but rejected"),
        (status = 500, description = "Storage failed"),
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let records = state.store.list_messages().await?;
    Ok(Json(records.into_iter().map(to_response).collect()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn response_carries_rfc3339_timestamp() {
        let record = ContactMessage {
            id: 7,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            message: "Hello".to_owned(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let response = to_response(record);
        assert_eq!(response.id, 7);
        assert_eq!(response.created_at, "2026-01-02T03:04:05+00:00");
    }
}
