pub mod calculations;
pub mod documents;
pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{KeyValueStore, SettingsStore, SettingsStoreError, StorageError};
