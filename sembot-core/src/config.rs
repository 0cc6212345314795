//! Configuration management
//!
//! Reads `settings.json` from the data directory:
//! ```json
//! {
//!   "apiBaseUrl": "https://api.semux.online/v2.1.0/",
//!   "networkId": 0,
//!   "feeMinor": 5000000,
//!   "alertIntervalSecs": 5,
//!   "scanUrl": "https://scan.example.org/new-block",
//!   "webhookUrl": "https://discord.com/api/webhooks/..."
//! }
//! ```
//! Missing keys fall back to defaults; a missing file yields a default
//! configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Ledger node REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Network identifier baked into every transaction
    #[serde(default)]
    pub network_id: u8,

    /// Fixed inclusion fee, minor units (0.005 SEM)
    #[serde(default = "default_fee_minor")]
    pub fee_minor: u64,

    /// Whale-alert poll interval
    #[serde(default = "default_alert_interval_secs")]
    pub alert_interval_secs: u64,

    /// Block-scan collaborator endpoint; alerts are disabled when unset
    #[serde(default)]
    pub scan_url: Option<String>,

    /// Notification webhook for the alert channel
    #[serde(default)]
    pub webhook_url: Option<String>,
}

fn default_api_base_url() -> String {
    "https://api.semux.online/v2.1.0/".to_string()
}

fn default_fee_minor() -> u64 {
    5_000_000
}

fn default_alert_interval_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            network_id: 0,
            fee_minor: default_fee_minor(),
            alert_interval_secs: default_alert_interval_secs(),
            scan_url: None,
            webhook_url: None,
        }
    }
}

impl Config {
    /// Load configuration from `<dir>/settings.json`, falling back to
    /// defaults when the file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Write the configuration back to `<dir>/settings.json`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(SETTINGS_FILE);
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
