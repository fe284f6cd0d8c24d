//! Application configuration read from `cleaning-quote.toml`.
//!
//! ```toml
//! [storage]
//! backend = "sqlite"
//! connection = "/home/me/.local/share/cleaning-quote/settings.db"
//!
//! [email]
//! endpoint = "https://mail.example.com/send-proposal-email"
//! api_key_env = "QUOTE_MAIL_API_KEY"
//!
//! [output]
//! directory = "."
//! typst_binary = "typst"
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use quote_core::storage::StorageConfig;
use quote_db_sqlite::default_database_path;
use quote_mail::MAIL_API_KEY_ENV;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "cleaning-quote.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageSection,
    pub email: EmailSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub backend: String,
    /// Database path. Defaults to `settings.db` in the platform data dir.
    pub connection: Option<String>,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSection {
    pub endpoint: Option<String>,
    pub api_key_env: String,
}

impl Default for EmailSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: MAIL_API_KEY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub directory: PathBuf,
    pub typst_binary: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            typst_binary: PathBuf::from("typst"),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "CleanPro", "cleaning-quote")
}

/// `<config dir>/cleaning-quote.toml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl AppConfig {
    pub fn parse(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, or the default location when `None`. A file that does
    /// not exist yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse(&text, &path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Storage settings with command-line overrides applied.
    pub fn storage_config(
        &self,
        backend: Option<&str>,
        connection: Option<&str>,
    ) -> StorageConfig {
        let connection_string = connection
            .map(str::to_string)
            .or_else(|| self.storage.connection.clone())
            .unwrap_or_else(|| default_database_path().to_string_lossy().into_owned());
        StorageConfig {
            backend: backend.unwrap_or(&self.storage.backend).to_string(),
            connection_string,
        }
    }
}
