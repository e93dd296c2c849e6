use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{BUY_TICKET_URL, CLAIM_REWARD_URL, LATEST_BATTLE_URL, TAP_URL};

/// Default config file path.
pub const CONFIG_PATH: &str = "config.toml";

/// Top-level application config deserialized from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub account: AccountConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub endpoints: Endpoints,
}

/// Game account to drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Numeric PowerPals user id.
    pub user_id: u64,
}

/// Polling intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Delay between status polls while waiting for a new battle to start.
    #[serde(default = "default_battle_check_interval")]
    pub battle_check_interval_ms: u64,
    /// Delay between cycles, and before retrying a failed poll.
    #[serde(default = "default_api_interval")]
    pub api_interval_ms: u64,
}

fn default_battle_check_interval() -> u64 {
    2000
}

fn default_api_interval() -> u64 {
    5000
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            battle_check_interval_ms: default_battle_check_interval(),
            api_interval_ms: default_api_interval(),
        }
    }
}

/// Endpoint URLs. Each one defaults to the public PowerPals server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub latest_battle: String,
    pub buy_ticket: String,
    pub claim_reward: String,
    pub tap: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            latest_battle: LATEST_BATTLE_URL.to_string(),
            buy_ticket: BUY_TICKET_URL.to_string(),
            claim_reward: CLAIM_REWARD_URL.to_string(),
            tap: TAP_URL.to_string(),
        }
    }
}

impl Endpoints {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("latest_battle", self.latest_battle.as_str()),
            ("buy_ticket", self.buy_ticket.as_str()),
            ("claim_reward", self.claim_reward.as_str()),
            ("tap", self.tap.as_str()),
        ]
        .into_iter()
    }
}

/// Immutable settings handed to the cycle controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub user_id: u64,
    pub battle_check_interval: Duration,
    pub api_interval: Duration,
    pub endpoints: Endpoints,
}

impl AppConfig {
    /// Load config from the given TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Write config to the given TOML file path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Reject zero intervals and endpoints that are not absolute http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        if self.settings.battle_check_interval_ms == 0 {
            bail!("settings.battle_check_interval_ms must be positive");
        }
        if self.settings.api_interval_ms == 0 {
            bail!("settings.api_interval_ms must be positive");
        }
        for (name, raw) in self.endpoints.iter() {
            let url = Url::parse(raw).with_context(|| format!("endpoints.{name}: invalid URL {raw:?}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                bail!("endpoints.{name}: unsupported scheme {:?}", url.scheme());
            }
        }
        Ok(())
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            user_id: self.account.user_id,
            battle_check_interval: Duration::from_millis(self.settings.battle_check_interval_ms),
            api_interval: Duration::from_millis(self.settings.api_interval_ms),
            endpoints: self.endpoints.clone(),
        }
    }
}
