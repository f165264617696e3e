use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{LedgerError, Result},
    ledger::DEFAULT_RECENT_LIMIT,
    utils::fs::write_replacing,
};

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "lendiverse";

/// Host-level settings for the ledger and the views built on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the transaction cache. Defaults to the platform data dir.
    pub storage_dir: Option<PathBuf>,
    /// Entries shown by the default recent-activity view.
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "Config::default_asset_value")]
    pub default_asset: String,
    /// Directives layered over `RUST_LOG` by [`crate::init_with_config`].
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: None,
            recent_limit: Self::default_recent_limit(),
            default_asset: Self::default_asset_value(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_recent_limit() -> usize {
        DEFAULT_RECENT_LIMIT
    }

    pub fn default_asset_value() -> String {
        "ETH".into()
    }

    pub fn default_log_filter() -> String {
        "lendiverse_core=info".into()
    }

    pub fn resolve_storage_dir(&self) -> PathBuf {
        if let Some(path) = &self.storage_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(APP_DIR_NAME)
    }
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE_NAME)))
    }

    /// Uses `<platform config dir>/lendiverse/config.json`.
    pub fn from_default_location() -> Result<Self> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| LedgerError::Config("no configuration directory available".into()))?;
        Self::with_base_dir(base.join(APP_DIR_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{}: {}", self.path.display(), err))
        })?;
        if config.recent_limit == 0 {
            return Err(LedgerError::Config(
                "recent_limit must be greater than zero".into(),
            ));
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_replacing(&self.path, &json)
    }
}
