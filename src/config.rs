//! Configuration file handling for Divvy.
//!
//! The configuration file is stored at `$DIVVY_HOME/config.json` and contains settings for
//! the Divvy application including the display currency and backup settings.

use crate::backup::Backup;
use crate::currency::Currency;
use crate::store::Store;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "divvy";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const LEDGER_JSON: &str = "ledger.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$DIVVY_HOME` and from there it loads `$DIVVY_HOME/config.json`. It provides
/// paths to other items that are expected in a certain location within the divvy home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: Store,
    ledger_path: PathBuf,
}

impl Config {
    /// Creates the data directory, its subdirectories and:
    /// - Creates an initial `config.json` file using `currency` along with default settings
    /// - Creates an empty `ledger.json` file
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/divvy`
    /// - `currency` - The currency used to display amounts.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail, or if a ledger already exists in `dir`.
    pub async fn create(dir: impl Into<PathBuf>, currency: Currency) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the divvy home directory")?;

        // Canonicalize the directory path
        let root = utils::canonicalize(&maybe_relative).await?;

        // Create the backups subdirectory
        let backups_dir = root.join(BACKUPS);
        utils::make_dir(&backups_dir).await?;

        // Create and save an initial ConfigFile in the data directory
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency,
            backup_copies: BACKUP_COPIES,
        };
        config_file.save(&config_path).await?;

        // Initialize the ledger file
        let ledger_path = root.join(LEDGER_JSON);
        let store = Store::init(&ledger_path)
            .await
            .context("Unable to create the ledger file")?;

        // Return a new `Config` object that represents a data directory that is ready to use
        Ok(Self {
            root,
            backups: backups_dir,
            config_path,
            config_file,
            store,
            ledger_path,
        })
    }

    /// This will
    /// - validate that the `divvy_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory and the ledger file exist
    /// - return the loaded configuration object
    pub async fn load(divvy_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = divvy_home.into();
        let root = utils::canonicalize(&maybe_relative).await?;

        // Validate that the home directory exists.
        let _ = utils::read_dir(&root).await.context("Divvy home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let ledger_path = root.join(LEDGER_JSON);
        let store = Store::load(&ledger_path)
            .await
            .context("Unable to load the ledger file")?;

        let config = Self {
            root: root.clone(),
            backups: root.join(BACKUPS),
            config_path,
            config_file,
            store,
            ledger_path,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
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

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    pub fn currency(&self) -> Currency {
        self.config_file.currency
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }

    /// Changes the display currency and saves the config file.
    pub async fn set_currency(&mut self, currency: Currency) -> Result<()> {
        self.config_file.currency = currency;
        self.config_file.save(&self.config_path).await
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "divvy",
///   "config_version": 1,
///   "currency": "USD",
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "divvy"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The currency used to display amounts
    currency: Currency,

    /// Number of backup copies to keep
    backup_copies: u32,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency: Currency::default(),
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
