use async_trait::async_trait;

use quote_core::storage::{StorageConfig, StoreFactory};
use quote_core::{KeyValueStore, StorageError};

use crate::repository::SqliteKeyValueStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`quote_core::storage::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use quote_core::storage::StoreRegistry;
/// use quote_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection_string` (a file path, `:memory:` or a
    /// `sqlite:` URL) and brings the schema up to date.
    async fn create(&self, config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, StorageError> {
        let store = SqliteKeyValueStore::new(&config.connection_string)
            .await
            .map_err(|e| StorageError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StorageError::Backend(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use quote_core::storage::{StorageConfig, StoreFactory};

    use super::SqliteStoreFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let config = StorageConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        let result = SqliteStoreFactory.create(&config).await;
        assert!(result.is_ok(), "failed to create in-memory store: {:#?}", result.err());
    }
}
