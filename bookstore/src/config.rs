//! Process configuration.
//!
//! Settings are read from an optional JSON file shaped like this:
//!
//! ```json
//! {
//!   "Backend": "mongodb",
//!   "BindAddress": "0.0.0.0:8080",
//!   "BookstoreDatabase": {
//!     "ConnectionString": "mongodb://localhost:27017",
//!     "DatabaseName": "BookStore",
//!     "BooksCollectionName": "Books"
//!   }
//! }
//! ```
//!
//! Every key is optional. Environment variables override the file:
//!
//! | variable | setting |
//! |----------|---------|
//! | `BOOKSTORE_CONFIG` | path of the JSON file (default `bookstore.json`) |
//! | `BOOKSTORE_BACKEND` | `mock` or `mongodb` |
//! | `BOOKSTORE_BIND` | listen address |
//! | `BOOKSTORE_MONGO_URI` | MongoDB connection string |
//! | `BOOKSTORE_MONGO_DATABASE` | database name |
//! | `BOOKSTORE_MONGO_COLLECTION` | collection name |

use std::{fmt, io, net::SocketAddr, path::{Path, PathBuf}, str::FromStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "BOOKSTORE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "bookstore.json";

/// Errors raised while loading [`Settings`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {0}: {1}")]
    Io(PathBuf, #[source] io::Error),
    #[error("Could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid setting {0}: {1}")]
    Invalid(&'static str, String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;


/// Which store implementation the process runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process mock, no external dependencies.
    #[default]
    Mock,
    /// MongoDB collection described by [`DatabaseSettings`].
    #[serde(alias = "mongo")]
    Mongodb,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "memory" => Ok(BackendKind::Mock),
            "mongodb" | "mongo" => Ok(BackendKind::Mongodb),
            other => Err(ConfigError::Invalid("backend", format!("unknown backend {other:?}"))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Mock => f.write_str("mock"),
            BackendKind::Mongodb => f.write_str("mongodb"),
        }
    }
}


/// Location of the books collection for the persistent backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DatabaseSettings {
    pub connection_string: String,
    pub database_name: String,
    pub books_collection_name: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            connection_string: "mongodb://localhost:27017".to_string(),
            database_name: "BookStore".to_string(),
            books_collection_name: "Books".to_string(),
        }
    }
}


/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub backend: BackendKind,
    pub bind_address: String,
    pub bookstore_database: DatabaseSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            bind_address: "127.0.0.1:8080".to_string(),
            bookstore_database: DatabaseSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from the config file and the process environment.
    ///
    /// A missing file is only an error when its path was given explicitly
    /// through `BOOKSTORE_CONFIG`.
    pub fn load() -> ConfigResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::load`] with a custom variable lookup.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut settings = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH)?,
            None => Self::default(),
        };

        settings.apply_overrides(lookup)?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Applies `BOOKSTORE_*` overrides found through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(backend) = lookup("BOOKSTORE_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(bind) = lookup("BOOKSTORE_BIND") {
            self.bind_address = bind;
        }
        if let Some(uri) = lookup("BOOKSTORE_MONGO_URI") {
            self.bookstore_database.connection_string = uri;
        }
        if let Some(database) = lookup("BOOKSTORE_MONGO_DATABASE") {
            self.bookstore_database.database_name = database;
        }
        if let Some(collection) = lookup("BOOKSTORE_MONGO_COLLECTION") {
            self.bookstore_database.books_collection_name = collection;
        }

        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.socket_addr()?;

        if self.backend == BackendKind::Mongodb {
            let database = &self.bookstore_database;
            for (name, value) in [
                ("connection string", &database.connection_string),
                ("database name", &database.database_name),
                ("collection name", &database.books_collection_name),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::Invalid(name, "must not be empty".to_string()));
                }
            }
        }

        Ok(())
    }

    /// The listen address as a socket address.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.bind_address
            .parse()
            .map_err(|e| ConfigError::Invalid("bind address", format!("{}: {e}", self.bind_address)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn parses_appsettings_shape() {
        let settings = Settings::from_json(r#"{
            "Backend": "mongodb",
            "BookstoreDatabase": {
                "ConnectionString": "mongodb://db:27017",
                "DatabaseName": "Shop",
                "BooksCollectionName": "Titles"
            }
        }"#).unwrap();

        assert_eq!(settings.backend, BackendKind::Mongodb);
        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.bookstore_database.connection_string, "mongodb://db:27017");
        assert_eq!(settings.bookstore_database.database_name, "Shop");
        assert_eq!(settings.bookstore_database.books_collection_name, "Titles");
    }

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut settings = Settings::default();

        settings
            .apply_overrides(env(&[
                ("BOOKSTORE_BACKEND", "Mongo"),
                ("BOOKSTORE_BIND", "0.0.0.0:9000"),
                ("BOOKSTORE_MONGO_COLLECTION", "Library"),
            ]))
            .unwrap();

        assert_eq!(settings.backend, BackendKind::Mongodb);
        assert_eq!(settings.bind_address, "0.0.0.0:9000");
        assert_eq!(settings.bookstore_database.books_collection_name, "Library");
        assert_eq!(settings.bookstore_database.database_name, "BookStore");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let mut settings = Settings::default();

        let result = settings.apply_overrides(env(&[("BOOKSTORE_BACKEND", "postgres")]));

        assert!(matches!(result, Err(ConfigError::Invalid("backend", _))));
    }

    #[test]
    fn invalid_bind_address_fails_validation() {
        let settings = Settings {
            bind_address: "localhost".to_string(),
            ..Settings::default()
        };

        assert!(matches!(settings.validate(), Err(ConfigError::Invalid("bind address", _))));
    }

    #[test]
    fn mongodb_backend_requires_names() {
        let mut settings = Settings {
            backend: BackendKind::Mongodb,
            ..Settings::default()
        };
        settings.bookstore_database.database_name = " ".to_string();

        assert!(settings.validate().is_err());

        settings.backend = BackendKind::Mock;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let result = Settings::load_with(env(&[(CONFIG_PATH_VAR, "/nonexistent/bookstore.json")]));

        assert!(matches!(result, Err(ConfigError::Io(_, _))));
    }
}
