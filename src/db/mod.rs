//! Persistence layer for contact messages.
//!
//! [`MessageStore`] is the seam between handlers and the database: handlers
//! only ever talk to the trait, so swapping SQLite for another backend means
//! implementing the trait for it and changing the concrete type held in
//! `AppState`, with no handler changes.

pub mod sqlite;

use chrono::{DateTime, Utc};

/// A persisted contact message.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    /// Surrogate key, strictly increasing with insertion order.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Insertion time, assigned by the server clock. Immutable after insert.
    pub created_at: DateTime<Utc>,
}

/// A contact message as submitted, before the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Storage operations for the contact archive. The archive is append-only:
/// there is no update or delete.
pub trait MessageStore: Send + Sync + 'static {
    /// Persist a new message, returning the stored row with its assigned id
    /// and timestamp.
    fn insert_message(
        &self,
        message: NewContactMessage,
    ) -> impl Future<Output = Result<ContactMessage, sqlx::Error>> + Send;

    /// All stored messages, newest first.
    fn list_messages(&self) -> impl Future<Output = Result<Vec<ContactMessage>, sqlx::Error>> + Send;
}
