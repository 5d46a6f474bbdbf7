use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod memstore;
pub mod pgstore;

pub use memstore::MemoryMessageStore;
pub use pgstore::PgMessageStore;

/// Hard cap on how many rows a single list read returns.
pub const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Validated insert payload. Text is stored exactly as given.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub username: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),

    #[error("message store query failed: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Storage backend for the message board.
///
/// Implementations must order `list_recent` newest first (`created_at`
/// descending, ties broken by `id` descending) and must never reuse an id.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append one message; `id` and `created_at` are assigned by the store.
    async fn insert(&self, message: NewMessage) -> Result<Message, StoreError>;

    /// Read at most `limit` of the most recent messages. An empty store is
    /// an empty vector, not an error.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Message>, StoreError>;
}
