//! Configuration loading
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! environment variables (a `.env` file is honoured), then CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::{ClientSettings, DEFAULT_API_BASE_URL};
use crate::inventory::Layout;

/// Document holding the `Inventario`, `Consumiveis` and `Config` tabs
pub const DEFAULT_SPREADSHEET_ID: &str = "1dthZulTwmj_80LGk4hSaH58CoLAKmw5ypLlUUgsK9hY";

pub const ENV_SPREADSHEET_ID: &str = "INVENTORY_SPREADSHEET_ID";
pub const ENV_ACCESS_TOKEN: &str = "INVENTORY_ACCESS_TOKEN";
pub const ENV_API_BASE_URL: &str = "INVENTORY_API_BASE_URL";

const APP_DIR: &str = "inventory-cli";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spreadsheet_id: String,
    /// Bearer token with spreadsheet read/write scope, obtained elsewhere
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub api_base_url: String,
    /// No timeout unless set
    pub request_timeout_secs: Option<u64>,
    /// Re-read a tab before saving and refuse if its rows moved
    pub verify_row_order: bool,
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            access_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            verify_row_order: false,
            layout: Layout::default(),
        }
    }
}

impl Config {
    /// `<config dir>/inventory-cli/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location if it exists, then apply the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override fields from environment variables; blank values are ignored
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = get(ENV_SPREADSHEET_ID) {
            self.spreadsheet_id = id.trim().to_string();
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token.trim().to_string());
        }
        if let Some(url) = get(ENV_API_BASE_URL) {
            self.api_base_url = url.trim().to_string();
        }
    }

    pub fn access_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .with_context(|| {
                format!(
                    "No access token configured. Set {} to a Google OAuth token with spreadsheet scope.",
                    ENV_ACCESS_TOKEN
                )
            })
    }

    pub fn client_settings(&self) -> Result<ClientSettings> {
        Ok(ClientSettings {
            spreadsheet_id: self.spreadsheet_id.clone(),
            access_token: self.access_token()?.to_string(),
            base_url: self.api_base_url.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }
}
