//! Staking models for the stake-details endpoint

use crate::types::deserialize_decimal_lenient;
use crate::{AirdropId, WindowId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stake information for the connected account in one window
///
/// Defaults to a non-stakable record; that is also what the portal falls
/// back to when the lookup fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StakeDetails {
    #[serde(default)]
    pub is_stakable: bool,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub total_eligible_amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub airdrop_rewards: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub claimable_amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub stakable_tokens: Decimal,
}

/// `data` payload of the stake-details endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeDetailsData {
    #[serde(default)]
    pub stake_details: StakeDetails,
}

/// Request body shared by the stake-details lookup
#[derive(Debug, Clone, Serialize)]
pub struct StakeDetailsRequest {
    pub address: String,
    pub airdrop_id: String,
    pub airdrop_window_id: String,
}

impl StakeDetailsRequest {
    pub fn new(address: &str, airdrop_id: AirdropId, window_id: WindowId) -> Self {
        Self {
            address: address.to_string(),
            airdrop_id: airdrop_id.to_string(),
            airdrop_window_id: window_id.to_string(),
        }
    }
}
