//! Shared application state.

use std::sync::Arc;

use crate::{config::Config, db::sqlite::SqliteStore, mailer::Mailer, middleware::auth::SharedSecret};

/// Everything handlers need, assembled once at startup and passed down
/// explicitly. Tests build their own instance with whatever store, mailer and
/// credentials the scenario calls for.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<SqliteStore>,
    /// `None` when no SMTP relay is configured; submissions then skip the
    /// notification step entirely.
    pub mailer: Option<Mailer>,
    pub admin: SharedSecret,
}
