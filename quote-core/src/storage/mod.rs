pub mod factory;
pub mod repository;
pub mod settings_store;

pub use factory::{MemoryStoreFactory, StorageConfig, StoreFactory, StoreRegistry};
pub use repository::{KeyValueStore, MemoryStore, StorageError};
pub use settings_store::{SettingsStore, SettingsStoreError, merge_snapshot};
