use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use quote_core::{KeyValueStore, StorageError};

const MEMORY: &str = ":memory:";

/// [`KeyValueStore`] over a single `kv_store` table.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Opens `connection`, which is either a file path (created when
    /// missing), `:memory:`, or a `sqlite:` URL.
    pub async fn new(connection: &str) -> Result<Self> {
        let options = connect_options(connection)?;
        let pool = if connection == MEMORY {
            // Every connection to :memory: is a separate database, so the
            // pool must hold exactly one and never recycle it.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
        } else {
            SqlitePoolOptions::new()
                .max_connections(4)
                .acquire_timeout(Duration::from_secs(5))
                .connect_with(options)
                .await
        };
        let pool = pool.with_context(|| format!("Failed to connect to database: {}", connection))?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

}

fn connect_options(connection: &str) -> Result<SqliteConnectOptions> {
    let options = if connection == MEMORY {
        SqliteConnectOptions::new().in_memory(true)
    } else if connection.starts_with("sqlite:") {
        connection
            .parse::<SqliteConnectOptions>()
            .with_context(|| format!("Invalid SQLite URL: {}", connection))?
    } else {
        SqliteConnectOptions::new().filename(connection)
    };
    Ok(options.create_if_missing(true))
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StorageError::Backend(e.to_string()))
        })
        .transpose()
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::debug!(key, bytes = value.len(), "kv_store entry written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}
