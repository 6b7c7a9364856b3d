//! Configuration file handling for shoplist.
//!
//! The configuration file is stored at `$SHOPLIST_HOME/config.json` and contains the heading
//! shown above the list, the storage slot the list is kept under, the currency marker and backup
//! settings.

use crate::backup::Backup;
use crate::bridge::{Bridge, DEFAULT_KEY};
use crate::error::{ErrorType, IntoResult};
use crate::render::DEFAULT_CURRENCY;
use crate::store::FileStore;
use crate::{utils, Result};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "shoplist";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const STORAGE_JSON: &str = "storage.json";
const DEFAULT_HEADING: &str = "Shopping list";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SHOPLIST_HOME` and from there it loads `$SHOPLIST_HOME/config.json`. It provides
/// paths to the other files expected in the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    storage_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, its backups subdirectory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/shoplist`
    /// - `heading` - The heading shown above the list. Defaults to "Shopping list".
    /// - `storage_key` - The storage slot the list is kept under. Defaults to "items".
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    /// - Returns an error if a config file already exists in `dir`.
    pub async fn create(
        dir: impl Into<PathBuf>,
        heading: Option<&str>,
        storage_key: Option<&str>,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the shoplist home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        anyhow::ensure!(
            !config_path.exists(),
            "A config file already exists at '{}'",
            config_path.display()
        );

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_file = ConfigFile {
            heading: heading.unwrap_or(DEFAULT_HEADING).to_string(),
            storage_key: storage_key.unwrap_or(DEFAULT_KEY).to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            storage_path: root.join(STORAGE_JSON),
            root,
            backups,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `shoplist_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub async fn load(shoplist_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = shoplist_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The shoplist home directory is missing, run 'shoplist init' to create it")
            .pub_result(ErrorType::Config)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            return Err(anyhow!(
                "The config file is missing '{}', run 'shoplist init' to create it",
                config_path.display()
            ))
            .pub_result(ErrorType::Config);
        }
        let config_file = ConfigFile::load(&config_path)
            .await
            .pub_result(ErrorType::Config)?;

        let config = Self {
            backups: root.join(BACKUPS),
            storage_path: root.join(STORAGE_JSON),
            root,
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            return Err(anyhow!(
                "The backups directory is missing '{}'",
                config.backups.display()
            ))
            .pub_result(ErrorType::Config);
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn heading(&self) -> &str {
        &self.config_file.heading
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }

    /// Creates a `Bridge` over the storage file, using the configured storage key.
    pub fn bridge(&self) -> Bridge<FileStore> {
        Bridge::new(FileStore::new(&self.storage_path), self.storage_key())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "shoplist",
///   "config_version": 1,
///   "heading": "Shopping list",
///   "storage_key": "items",
///   "currency": "$",
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "shoplist"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Heading shown above the list
    #[serde(default = "default_heading")]
    heading: String,

    /// Storage slot the list is kept under
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Marker shown before prices and the total
    #[serde(default = "default_currency")]
    currency: String,

    /// Number of backup copies to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,
}

fn default_heading() -> String {
    DEFAULT_HEADING.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_KEY.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            heading: default_heading(),
            storage_key: default_storage_key(),
            currency: default_currency(),
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            !config.storage_key.is_empty(),
            "The storage_key in config file {} must not be empty",
            path.display()
        );
        anyhow::ensure!(
            config.backup_copies > 0,
            "The backup_copies in config file {} must be at least 1",
            path.display()
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
