//! Portal configuration loaded from the environment

use crate::{AirdropId, Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend endpoint paths, relative to the API base URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPaths {
    pub airdrop_details: String,
    pub stake_details: String,
    pub claim_history: String,
    pub registration: String,
    pub claim_signature: String,
    pub save_claim_txn: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            airdrop_details: "airdrop/details".to_string(),
            stake_details: "airdrop/stake-details".to_string(),
            claim_history: "airdrop/claim/history".to_string(),
            registration: "airdrop/registration".to_string(),
            claim_signature: "airdrop/claim/signature".to_string(),
            save_claim_txn: "airdrop/claim/save-txn".to_string(),
        }
    }
}

/// How rewards are rendered in the claim history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardFormat {
    /// Symbol of the 8-decimal source-chain token
    pub source_symbol: String,
    pub source_decimals: u32,
    /// Symbol of the target-chain token, shown as a raw integer
    pub target_symbol: String,
    /// Decimals used when converting a claim into a target-chain transfer
    pub target_transfer_decimals: u32,
}

impl Default for RewardFormat {
    fn default() -> Self {
        Self {
            source_symbol: "AGIX".to_string(),
            source_decimals: 8,
            target_symbol: "ADA".to_string(),
            target_transfer_decimals: 6,
        }
    }
}

/// Top-level portal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub api_base_url: String,
    pub airdrop_id: AirdropId,
    /// Connected source-chain account, if any
    pub account: Option<String>,
    pub request_timeout_secs: u64,
    pub paths: ApiPaths,
    pub reward_format: RewardFormat,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            airdrop_id: AirdropId(1),
            account: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            paths: ApiPaths::default(),
            reward_format: RewardFormat::default(),
        }
    }
}

impl PortalConfig {
    /// Load from `AIRDROP_*` environment variables, reading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get("AIRDROP_API_URL") {
            config.api_base_url = url;
        }
        if let Some(id) = get("AIRDROP_ID") {
            let id = id
                .parse()
                .map_err(|_| Error::ConfigError(format!("AIRDROP_ID is not a number: {}", id)))?;
            config.airdrop_id = AirdropId(id);
        }
        config.account = get("AIRDROP_ACCOUNT");
        if let Some(secs) = get("AIRDROP_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = secs.parse().map_err(|_| {
                Error::ConfigError(format!("AIRDROP_REQUEST_TIMEOUT_SECS is not a number: {}", secs))
            })?;
        }
        if let Some(symbol) = get("AIRDROP_SOURCE_SYMBOL") {
            config.reward_format.source_symbol = symbol;
        }
        if let Some(symbol) = get("AIRDROP_TARGET_SYMBOL") {
            config.reward_format.target_symbol = symbol;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(Error::ConfigError(format!(
                "API URL must be http(s): {}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::ConfigError("request timeout must be positive".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
