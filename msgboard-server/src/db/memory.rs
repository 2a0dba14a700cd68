//! In-memory message store
//!
//! Process-local storage for tests and `--in-memory` development runs.
//! Data is lost on restart.
//!
//! ## Thread Safety
//!
//! All state sits behind one `Arc<RwLock<>>`; every operation holds the lock
//! for its whole duration, so operations on the same id never interleave.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::db::store::{Message, MessageStore, StoreError};
use crate::models::{MessageBody, NewMessage};

#[derive(Debug, Default)]
struct Inner {
    /// Last id handed out; ids are never reused, even after deletes
    last_id: i64,
    last_created_at: Option<DateTime<Utc>>,
    messages: BTreeMap<i64, Message>,
}

impl Inner {
    fn insert(&mut self, message: NewMessage) -> Message {
        self.last_id += 1;

        // Keep created_at monotonic with insertion order even if the wall
        // clock steps backwards
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(created_at);

        let stored = Message {
            id: self.last_id,
            body: message.body.into_string(),
            username: message.username.into_string(),
            created_at,
        };
        self.messages.insert(stored.id, stored.clone());
        stored
    }
}

/// In-memory message store
#[derive(Debug, Clone, Default)]
pub struct MemoryMessageStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryMessageStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let inner = self.inner.read().await;
        let mut messages: Vec<Message> = inner.messages.values().cloned().collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn create(&self, message: NewMessage) -> Result<Message, StoreError> {
        Ok(self.inner.write().await.insert(message))
    }

    async fn get(&self, id: i64) -> Result<Message, StoreError> {
        self.inner
            .read()
            .await
            .messages
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn update_body(&self, id: i64, body: MessageBody) -> Result<Message, StoreError> {
        let mut inner = self.inner.write().await;
        let message = inner
            .messages
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;
        message.body = body.into_string();
        Ok(message.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .messages
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    async fn seed_if_empty(&self, message: NewMessage) -> Result<Option<Message>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.messages.is_empty() {
            return Ok(None);
        }
        Ok(Some(inner.insert(message)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(body: &str, username: &str) -> NewMessage {
        NewMessage::parse(body, username).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryMessageStore::new();
        let before = Utc::now();

        let created = store.create(new_message("x", "y")).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched.body, "x");
        assert_eq!(fetched.username, "y");
        assert!(fetched.created_at >= before);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryMessageStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(store.create(new_message(&format!("m{i}"), "u")).await.unwrap().id);
        }

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.iter().map(|m| m.id).collect::<Vec<_>>(), ids);
        assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn update_changes_only_body() {
        let store = MemoryMessageStore::new();
        let created = store.create(new_message("old", "alice")).await.unwrap();

        let updated = store
            .update_body(created.id, MessageBody::new("new").unwrap())
            .await
            .unwrap();

        assert_eq!(updated.body, "new");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.username, created.username);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.get(created.id).await.unwrap().body, "new");
    }

    #[tokio::test]
    async fn delete_is_final() {
        let store = MemoryMessageStore::new();
        let created = store.create(new_message("bye", "bob")).await.unwrap();

        store.delete(created.id).await.unwrap();

        assert!(matches!(
            store.get(created.id).await,
            Err(StoreError::NotFound { id }) if id == created.id
        ));
        assert!(matches!(
            store
                .update_body(created.id, MessageBody::new("again").unwrap())
                .await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(created.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = MemoryMessageStore::new();
        let first = store.create(new_message("a", "u")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(new_message("b", "u")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = MemoryMessageStore::new();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(new_message(&format!("m{i}"), "u"))
                        .await
                        .expect("create failed")
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("task panicked"));
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 20);
        assert_eq!(store.list_all().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn seed_only_when_empty() {
        let store = MemoryMessageStore::new();

        let seeded = store.seed_if_empty(NewMessage::demo()).await.unwrap();
        let seeded = seeded.expect("empty store should be seeded");
        assert_eq!(seeded.body, "Hello");
        assert_eq!(seeded.username, "Liza");

        assert!(store.seed_if_empty(NewMessage::demo()).await.unwrap().is_none());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
