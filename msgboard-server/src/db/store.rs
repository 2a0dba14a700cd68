//! The message store abstraction shared by every backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::{MessageBody, NewMessage};

/// Message record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Message {
    pub id: i64,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("message {id} not found")]
    NotFound { id: i64 },
}

/// Durable mapping from message id to [`Message`].
///
/// Every method is a single atomic operation; mutations are persisted
/// before the future resolves.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// All messages, oldest first (`created_at`, then `id`).
    async fn list_all(&self) -> Result<Vec<Message>, StoreError>;

    /// Insert a message, assigning a fresh id and the current timestamp.
    async fn create(&self, message: NewMessage) -> Result<Message, StoreError>;

    async fn get(&self, id: i64) -> Result<Message, StoreError>;

    /// Replace the body of an existing message. Other fields are untouched.
    async fn update_body(&self, id: i64, body: MessageBody) -> Result<Message, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Insert `message` only if the store holds no messages at all.
    ///
    /// Returns the inserted message, or `None` when the store was not empty.
    async fn seed_if_empty(&self, message: NewMessage) -> Result<Option<Message>, StoreError>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
