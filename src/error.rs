//! API error type and its HTTP mapping.
//!
//! Every fallible handler returns [`ApiError`]; the [`IntoResponse`] impl is
//! the single place where errors become status codes and JSON bodies, so a
//! failure class can never leak an inconsistent shape to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request was understood but the payload is unacceptable (400).
    #[error("{0}")]
    Validation(String),

    /// No credentials were presented at all (401).
    #[error("Unauthorized")]
    Unauthenticated,

    /// Credentials were presented but do not match (403).
    #[error("Forbidden")]
    Forbidden,

    /// Persistence failed (500). The cause is logged server-side; the client
    /// only ever sees a generic message.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Unauthorized".to_owned()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_owned()),
            ApiError::Database(e) => {
                error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = ApiError::Validation("All fields are required".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthenticated_maps_to_401() {
        let response = ApiError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = ApiError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_maps_to_500() {
        let response = ApiError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
