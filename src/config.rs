use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;

/// Which message store the service is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMode {
    Memory { seed_welcome: bool },
    Postgres { database_url: String, max_connections: u32 },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreMode,
    pub static_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = parse_or(&lookup, "PORT", 8080)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let mode = match lookup("MESSAGE_STORE") {
            Some(mode) => mode.trim().to_ascii_lowercase(),
            None if database_url.is_some() => "postgres".to_string(),
            None => "memory".to_string(),
        };

        let store = match mode.as_str() {
            "memory" => StoreMode::Memory {
                seed_welcome: parse_bool(&lookup, "SEED_WELCOME_MESSAGE")?,
            },
            "postgres" => StoreMode::Postgres {
                database_url: database_url
                    .context("DATABASE_URL must be set when MESSAGE_STORE=postgres")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            },
            other => bail!("Unknown MESSAGE_STORE '{}', expected 'memory' or 'postgres'", other),
        };

        let static_dir = lookup("STATIC_DIR").filter(|dir| !dir.trim().is_empty());

        Ok(Config {
            host,
            port,
            store,
            static_dir,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(anyhow!("Invalid {}: {:?}", key, raw)),
        },
    }
}
