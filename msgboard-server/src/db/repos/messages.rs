//! PostgreSQL message store

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::store::{Message, MessageStore, StoreError};
use crate::models::{MessageBody, NewMessage};

/// Message store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, body, username, created_at
            FROM messages
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn create(&self, message: NewMessage) -> Result<Message, StoreError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (body, username)
            VALUES ($1, $2)
            RETURNING id, body, username, created_at
            "#,
        )
        .bind(message.body.as_str())
        .bind(message.username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn get(&self, id: i64) -> Result<Message, StoreError> {
        sqlx::query_as::<_, Message>(
            "SELECT id, body, username, created_at FROM messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })
    }

    async fn update_body(&self, id: i64, body: MessageBody) -> Result<Message, StoreError> {
        sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages
            SET body = $2
            WHERE id = $1
            RETURNING id, body, username, created_at
            "#,
        )
        .bind(id)
        .bind(body.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        Ok(())
    }

    async fn seed_if_empty(&self, message: NewMessage) -> Result<Option<Message>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent seeders; readers are not blocked
        sqlx::query("LOCK TABLE messages IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let seeded = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (body, username)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM messages)
            RETURNING id, body, username, created_at
            "#,
        )
        .bind(message.body.as_str())
        .bind(message.username.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(seeded)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
