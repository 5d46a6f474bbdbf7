use async_trait::async_trait;
use sqlx::PgPool;

use super::{Message, MessageStore, NewMessage, StoreError};

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
    async fn insert(&self, message: NewMessage) -> Result<Message, StoreError> {
        let saved = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (username, content)
            VALUES ($1, $2)
            RETURNING id, username, content, created_at
            "#,
        )
        .bind(&message.username)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, username, content, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
