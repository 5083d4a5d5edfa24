//! Configuration management
//!
//! Loads configuration from config.toml with support for:
//! - Contract bridge endpoint and chain id
//! - Wallet seed (env var takes precedence; empty means read-only)
//! - Session parameters for the reveal challenge

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::session::DEFAULT_DURATION_DAYS;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Contract bridge endpoint
    pub url: String,
    /// Chain id reported in the reveal challenge
    pub chain_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// sr25519 seed; empty string means no wallet (read-only mode)
    #[serde(default)]
    pub seed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,
}

fn default_duration_days() -> u32 {
    DEFAULT_DURATION_DAYS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_days: DEFAULT_DURATION_DAYS,
        }
    }
}

impl Config {
    /// Load from config.toml or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load from specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            // Use embedded default config
            toml::from_str(DEFAULT_CONFIG).context("Failed to parse default config")
        }
    }

    /// Bridge endpoint (env var takes precedence)
    pub fn gateway_url(&self) -> String {
        match std::env::var("GATEWAY_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => self.gateway.url.clone(),
        }
    }

    /// Wallet seed (env var takes precedence); None means read-only mode
    pub fn wallet_seed(&self) -> Option<String> {
        match std::env::var("WALLET_SEED") {
            Ok(seed) if !seed.is_empty() => Some(seed),
            _ => {
                if self.wallet.seed.is_empty() {
                    None
                } else {
                    Some(self.wallet.seed.clone())
                }
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // The embedded default config is validated at compile time,
        // so this should never fail. Using a fallback for robustness.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            gateway: GatewayConfig {
                url: "http://127.0.0.1:8080".to_string(),
                chain_id: 8009,
            },
            wallet: WalletConfig::default(),
            session: SessionConfig::default(),
        })
    }
}
