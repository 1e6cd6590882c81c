//! Bearer-token guard for the message archive.
//!
//! [`CredentialCheck`] is the seam for authentication schemes: implement it
//! for a new scheme (per-user tokens, signed cookies, …) and change the
//! concrete type held in `AppState`; the middleware and routes stay as they
//! are. [`SharedSecret`] is the only implementation today.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, state::AppState};

pub trait CredentialCheck: Send + Sync + 'static {
    /// Decide whether the presented token grants access.
    ///
    /// `None` means no credentials were sent at all; `Some` carries whatever
    /// token the client managed to present, possibly empty.
    fn verify(&self, presented: Option<&str>) -> Result<(), ApiError>;
}

/// Compare against a single server-wide secret.
#[derive(Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl CredentialCheck for SharedSecret {
    fn verify(&self, presented: Option<&str>) -> Result<(), ApiError> {
        match presented {
            None => Err(ApiError::Unauthenticated),
            Some(token) if token == self.secret => Ok(()),
            Some(_) => Err(ApiError::Forbidden),
        }
    }
}

/// The token is the second whitespace-delimited segment of the header, so
/// `Bearer abc` and `Token abc` both yield `abc`. A scheme with no token at
/// all yields `None`.
fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().nth(1)
}

/// Reject requests that fail the credential check.
///
/// A present-but-unusable header (not valid ASCII, or missing the token
/// segment) still counts as "credentials presented" and is checked as an
/// empty token, so it is rejected as forbidden rather than unauthenticated.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = match req.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().ok().and_then(bearer_token).unwrap_or_default()),
    };

    state.admin.verify(presented)?;
    Ok(next.run(req).await)
}
