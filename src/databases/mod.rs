use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use std::sync::Arc;

use crate::config::{Config, StoreMode};

pub mod messages;

use messages::{MemoryMessageStore, MessageStore, PgMessageStore};

const MESSAGES_SCHEMA: &str = include_str!("messages/schema.sql");

async fn check_tables_exist(pool: &PgPool, tables: &[&str]) -> Result<bool> {
    for &table in tables {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists.0 {
            log::info!("Table '{}' does not exist", table);
            return Ok(false);
        }
    }
    Ok(true)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    let required_tables = ["messages"];

    if check_tables_exist(pool, &required_tables).await? {
        log::info!("All required tables exist");
        return Ok(());
    }

    log::info!("Some tables missing, running schema SQL");
    pool.execute(MESSAGES_SCHEMA)
        .await
        .context("Failed to execute schema SQL")?;
    log::info!("Schema SQL executed successfully");

    Ok(())
}

/// Build the store selected by the configured deployment mode.
pub async fn setup_store(config: &Config) -> Result<Arc<dyn MessageStore>> {
    match &config.store {
        StoreMode::Memory { seed_welcome } => {
            log::warn!("Using in-memory message store; messages are lost on restart");
            let store = if *seed_welcome {
                MemoryMessageStore::with_welcome_message()
            } else {
                MemoryMessageStore::new()
            };
            Ok(Arc::new(store))
        }
        StoreMode::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            log::info!("Connected to PostgreSQL message store");

            ensure_schema(&pool).await?;
            Ok(Arc::new(PgMessageStore::new(pool)))
        }
    }
}
