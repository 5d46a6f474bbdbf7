use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Message, MessageStore, NewMessage, StoreError};

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<Message>,
}

/// Process-local store used when no database is configured. Contents are
/// lost when the process exits.
pub struct MemoryMessageStore {
    inner: RwLock<Inner>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }

    /// Store pre-populated with a single sample message.
    pub fn with_welcome_message() -> Self {
        let now = Utc::now();
        Self {
            inner: RwLock::new(Inner {
                next_id: 2,
                rows: vec![Message {
                    id: 1,
                    username: "Sample user".to_string(),
                    content: "Welcome to the message board! This is a sample message.".to_string(),
                    created_at: now,
                }],
            }),
        }
    }
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn insert(&self, message: NewMessage) -> Result<Message, StoreError> {
        let mut inner = self.inner.write().await;

        // Never step behind the previous row, so rows stay sorted by
        // (created_at, id) even if the wall clock goes backwards.
        let now = Utc::now();
        let created_at = inner
            .rows
            .last()
            .map_or(now, |last| last.created_at.max(now));

        let saved = Message {
            id: inner.next_id,
            username: message.username,
            content: message.content,
            created_at,
        };
        inner.next_id += 1;
        inner.rows.push(saved.clone());

        Ok(saved)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Message>, StoreError> {
        let inner = self.inner.read().await;
        let limit = usize::try_from(limit.max(0)).unwrap_or(0);

        Ok(inner.rows.iter().rev().take(limit).cloned().collect())
    }
}
