pub mod factory;
pub mod location;
pub mod repository;

pub use factory::SqliteStoreFactory;
pub use location::{default_database_path, ensure_parent_dir};
pub use repository::SqliteKeyValueStore;
