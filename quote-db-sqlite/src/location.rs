//! Where the settings database lives when no path is given.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

pub const DB_FILE_NAME: &str = "settings.db";

/// `<data dir>/settings.db`, or `settings.db` in the working directory
/// when no home directory is known.
pub fn default_database_path() -> PathBuf {
    match ProjectDirs::from("com", "CleanPro", "cleaning-quote") {
        Some(dirs) => dirs.data_dir().join(DB_FILE_NAME),
        None => PathBuf::from(DB_FILE_NAME),
    }
}

/// Creates the parent directory of a file path. URLs and `:memory:` are
/// left alone.
pub fn ensure_parent_dir(connection: &str) -> io::Result<()> {
    if connection == ":memory:" || connection.starts_with("sqlite:") {
        return Ok(());
    }
    match Path::new(connection).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
