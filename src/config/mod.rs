//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the document store connection, log level, export directory and
//! preview color scheme. Store credentials may come from the environment.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/formwright";
const STORE_URL_ENV: &str = "FORMWRIGHT_STORE_URL";
const STORE_API_KEY_ENV: &str = "FORMWRIGHT_STORE_API_KEY";

/// Connection settings for the document store.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_data_source")]
    pub data_source: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            base_url: None,
            api_key: None,
            data_source: default_data_source(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

impl StoreSettings {
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().map_or(false, |url| !url.trim().is_empty())
    }
}

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub store: StoreSettings,
    pub log_level: String,
    pub export_dir: PathBuf,
    pub color_scheme: String,
    file_path: Option<PathBuf>,
    overridden: Overridden,
}

/// File values of store settings replaced by overrides. `Some` marks an
/// overridden setting and holds what `save` writes back.
///
#[derive(Clone, Debug, Default)]
struct Overridden {
    base_url: Option<Option<String>>,
    api_key: Option<Option<String>>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    #[serde(default = "default_color_scheme")]
    pub color_scheme: String,
}

fn default_data_source() -> String {
    "Cluster0".to_string()
}

fn default_database() -> String {
    "formBuilder".to_string()
}

fn default_collection() -> String {
    "forms".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_color_scheme() -> String {
    "Default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default settings.
    ///
    pub fn new() -> Config {
        Config {
            store: StoreSettings::default(),
            log_level: default_log_level(),
            export_dir: default_export_dir(),
            color_scheme: default_color_scheme(),
            file_path: None,
            overridden: Overridden::default(),
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided, then apply store overrides from the
    /// environment. A missing file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };
        let file_path = dir_path.join(Path::new(FILE_NAME));

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            self.apply(Config::parse(&contents)?);
        } else {
            log::debug!("No configuration file at {}, using defaults", file_path.display());
        }
        self.file_path = Some(file_path);

        self.apply_overrides(env::var(STORE_URL_ENV).ok(), env::var(STORE_API_KEY_ENV).ok());
        Ok(())
    }

    /// Override store connection settings for this run. Empty values are
    /// ignored. Overrides are never written back by `save`.
    ///
    pub fn apply_overrides(&mut self, base_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            let previous = self.store.base_url.replace(url);
            self.overridden.base_url.get_or_insert(previous);
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            let previous = self.store.api_key.replace(key);
            self.overridden.api_key.get_or_insert(previous);
        }
    }

    /// Path of the configuration file, once loaded.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Log level filter named by the configuration.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Attempt to serialize the configuration data and write it to the disk,
    /// creating the directory if needed.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = serde_yaml::to_string(&self.to_spec())
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    fn parse(contents: &str) -> Result<FileSpec, ConfigError> {
        serde_yaml::from_str(contents).map_err(|e| ConfigError::DeserializationFailed(e.to_string()))
    }

    fn apply(&mut self, data: FileSpec) {
        self.store = data.store;
        self.overridden = Overridden::default();
        self.log_level = data.log_level;
        self.export_dir = data.export_dir;
        self.color_scheme = data.color_scheme;
    }

    fn to_spec(&self) -> FileSpec {
        let mut store = self.store.clone();
        if let Some(base_url) = &self.overridden.base_url {
            store.base_url = base_url.clone();
        }
        if let Some(api_key) = &self.overridden.api_key {
            store.api_key = api_key.clone();
        }
        FileSpec {
            store,
            log_level: self.log_level.clone(),
            export_dir: self.export_dir.clone(),
            color_scheme: self.color_scheme.clone(),
        }
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        env::temp_dir().join(format!("formwright-config-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.store.database, "formBuilder");
        assert_eq!(config.store.collection, "forms");
        assert!(!config.store.is_configured());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config.color_scheme, "Default");
    }

    #[test]
    fn test_parse_partial_file() {
        let spec = Config::parse(
            "store:\n  base_url: https://data.example.com/app/v1\n  database: forms_dev\nlog_level: debug\n",
        )
        .unwrap();
        let mut config = Config::new();
        config.apply(spec);
        assert_eq!(
            config.store.base_url.as_deref(),
            Some("https://data.example.com/app/v1")
        );
        assert_eq!(config.store.database, "forms_dev");
        assert_eq!(config.store.collection, "forms");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_parse_invalid_file() {
        assert!(matches!(
            Config::parse("store: [unclosed"),
            Err(ConfigError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::new();
        config.log_level = "chatty".to_string();
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel(level)) if level == "chatty"
        ));
    }

    #[test]
    fn test_overrides_ignore_empty_values() {
        let mut config = Config::new();
        config.store.api_key = Some("from-file".to_string());
        config.apply_overrides(Some("https://store".to_string()), Some("  ".to_string()));
        assert_eq!(config.store.base_url.as_deref(), Some("https://store"));
        assert_eq!(config.store.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_save_keeps_overrides_out_of_file() {
        let dir = temp_dir();
        let dir_str = dir.to_string_lossy().to_string();

        let mut config = Config::new();
        config.load(Some(&dir_str)).unwrap();
        config.store.api_key = Some("from-file".to_string());
        config.apply_overrides(
            Some("https://override".to_string()),
            Some("from-env".to_string()),
        );
        config.apply_overrides(None, Some("from-env-again".to_string()));
        assert_eq!(config.store.api_key.as_deref(), Some("from-env-again"));
        config.save().unwrap();

        let contents = fs::read_to_string(dir.join(FILE_NAME)).unwrap();
        let spec = Config::parse(&contents).unwrap();
        assert_eq!(spec.store.base_url, None);
        assert_eq!(spec.store.api_key.as_deref(), Some("from-file"));
        assert!(!contents.contains("from-env"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_requires_path() {
        assert!(Config::new().save().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = temp_dir();
        let dir_str = dir.to_string_lossy().to_string();

        let mut config = Config::new();
        config.load(Some(&dir_str)).unwrap();
        config.color_scheme = "Ocean".to_string();
        config.store.collection = "drafts".to_string();
        config.save().unwrap();

        let mut loaded = Config::new();
        loaded.load(Some(&dir_str)).unwrap();
        assert_eq!(loaded.color_scheme, "Ocean");
        assert_eq!(loaded.store.collection, "drafts");
        assert_eq!(loaded.file_path(), Some(dir.join(FILE_NAME).as_path()));

        let _ = fs::remove_dir_all(dir);
    }
}
