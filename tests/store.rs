//! Integration tests for the SQLite-backed message store.
//!
//! Covers id assignment, newest-first ordering, and timestamp handling using
//! an in-memory database.

use portfolio_server::db::{MessageStore, NewContactMessage, sqlite::SqliteStore};

async fn store() -> SqliteStore {
    SqliteStore::connect_in_memory()
        .await
        .expect("Failed to open in-memory store")
}

fn new_message(tag: &str) -> NewContactMessage {
    NewContactMessage {
        name: format!("name-{tag}"),
        email: format!("{tag}@example.com"),
        message: format!("message body {tag}"),
    }
}

#[tokio::test]
async fn empty_archive_lists_nothing() {
    let store = store().await;
    let messages = store.list_messages().await.expect("Failed to list");
    assert!(messages.is_empty());
}

/// The stored row echoes the submitted fields and carries an assigned id.
#[tokio::test]
async fn insert_returns_the_full_record() {
    let store = store().await;

    let record = store
        .insert_message(new_message("a"))
        .await
        .expect("Failed to insert");

    assert!(record.id > 0);
    assert_eq!(record.name, "name-a");
    assert_eq!(record.email, "a@example.com");
    assert_eq!(record.message, "message body a");
}

#[tokio::test]
async fn ids_increase_with_insertion_order() {
    let store = store().await;

    let first = store.insert_message(new_message("a")).await.expect("Failed to insert");
    let second = store.insert_message(new_message("b")).await.expect("Failed to insert");
    let third = store.insert_message(new_message("c")).await.expect("Failed to insert");

    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

/// **Setup:** three inserts in order a, b, c.
/// **Expected:** listing returns c, b, a (newest first), even when all three
/// share a timestamp.
#[tokio::test]
async fn listing_is_newest_first() {
    let store = store().await;

    let a = store.insert_message(new_message("a")).await.expect("Failed to insert");
    let b = store.insert_message(new_message("b")).await.expect("Failed to insert");
    let c = store.insert_message(new_message("c")).await.expect("Failed to insert");

    let listed = store.list_messages().await.expect("Failed to list");
    let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

/// Timestamps survive the text round-trip through the database unchanged.
#[tokio::test]
async fn listing_round_trips_the_record() {
    let store = store().await;

    let inserted = store.insert_message(new_message("a")).await.expect("Failed to insert");
    let listed = store.list_messages().await.expect("Failed to list");

    assert_eq!(listed, vec![inserted]);
}

#[tokio::test]
async fn created_at_falls_within_the_call_window() {
    let store = store().await;

    let before = chrono::Utc::now();
    let record = store.insert_message(new_message("a")).await.expect("Failed to insert");
    let after = chrono::Utc::now();

    assert!(record.created_at >= before);
    assert!(record.created_at <= after);
}

/// Two submissions racing each other still get distinct rows and ids.
#[tokio::test]
async fn concurrent_inserts_get_distinct_ids() {
    let store = store().await;

    let (left, right) = tokio::join!(
        store.insert_message(new_message("left")),
        store.insert_message(new_message("right")),
    );

    let left = left.expect("Failed to insert");
    let right = right.expect("Failed to insert");
    assert_ne!(left.id, right.id);

    let listed = store.list_messages().await.expect("Failed to list");
    assert_eq!(listed.len(), 2);
}
