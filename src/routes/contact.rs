//! Contact form submission.

use std::sync::Arc;

use axum::Router;
use axum::extract::{State, rejection::JsonRejection};
use axum::routing::post;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::db::{MessageStore, NewContactMessage};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(submit_contact),
    components(schemas(ContactRequest, ContactResponse))
)]
pub struct ContactApi;

/// Register the contact submission route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/contact", post(submit_contact))
}

/// Contact form payload. Fields are optional at the type level so that a
/// missing field reaches validation (and its stable error message) instead of
/// being rejected by deserialization.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    /// Require all three fields to be present and non-empty.
    fn into_new_message(self) -> Result<NewContactMessage, ApiError> {
        match (self.name, self.email, self.message) {
            (Some(name), Some(email), Some(message))
                if !name.is_empty() && !email.is_empty() && !message.is_empty() =>
            {
                Ok(NewContactMessage { name, email, message })
            }
            _ => Err(ApiError::Validation("All fields are required".to_owned())),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Accept a contact form submission.
///
/// The message is stored first; the response reflects the stored row alone.
/// Email notification happens afterwards in a background task and can never
/// change the outcome the client sees.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored", body = ContactResponse),
        (status = 400, description = "Missing or empty field, or malformed body"),
        (status = 500, description = "Storage failed"),
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let new_message = request.into_new_message()?;

    let record = state.store.insert_message(new_message).await?;
    info!(id = record.id, "contact message stored");

    match state.mailer.clone() {
        Some(mailer) => {
            // Fire-and-forget: the row is already durable, so a failure here
            // is logged and otherwise ignored.
            tokio::spawn(async move {
                if let Err(e) = mailer.send_contact_notification(&record).await {
                    warn!(id = record.id, error = %e, "contact notification failed");
                }
            });
        }
        None => debug!("mail transport not configured; skipping contact notification"),
    }

    Ok(Json(ContactResponse {
        success: true,
        message: "Message received".to_owned(),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>, message: Option<&str>) -> ContactRequest {
        ContactRequest {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
            message: message.map(str::to_owned),
        }
    }

    #[test]
    fn complete_payload_passes_validation() {
        let new_message = request(Some("Ada"), Some("ada@example.com"), Some("Hi"))
            .into_new_message()
            .unwrap();
        assert_eq!(new_message.name, "Ada");
        assert_eq!(new_message.email, "ada@example.com");
        assert_eq!(new_message.message, "Hi");
    }

    #[test]
    fn missing_field_is_rejected() {
        let result = request(Some("Ada"), None, Some("Hi")).into_new_message();
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn empty_field_is_rejected() {
        let result = request(Some("Ada"), Some(""), Some("Hi")).into_new_message();
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn rejection_uses_the_stable_message() {
        let Err(ApiError::Validation(message)) = request(None, None, None).into_new_message()
        else {
            panic!("expected validation error");
        };
        assert_eq!(message, "All fields are required");
    }

    #[test]
    fn whitespace_only_fields_are_accepted() {
        // Presence-only validation: content checks are out of scope.
        assert!(request(Some(" "), Some(" "), Some(" ")).into_new_message().is_ok());
    }
}
