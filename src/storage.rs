use std::{collections::HashMap, str::FromStr};

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool},
    Row,
};

/// Persistent string key-value store the restaurant list is mirrored into.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: StorageAdapter + ?Sized> StorageAdapter for Box<T> {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set(key, value).await
    }
}

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A single `storage` table of key-value pairs in an SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url {database_url}"))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("fail to open database {database_url}"))?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::query(
            r#"
CREATE TABLE IF NOT EXISTS storage (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)"#,
        )
        .execute(&pool)
        .await
        .with_context(|| "fail to create storage table")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("fail to read key {key}"))?;
        Ok(row.map(|row| row.get("value")))
    }

    async fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
INSERT INTO storage
    (key, value)
VALUES
    (?, ?)
ON CONFLICT(key) DO UPDATE SET value = excluded.value"#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .with_context(|| format!("fail to write key {key}"))?;
        Ok(())
    }
}
