//! Claim-related models

use crate::types::{deserialize_decimal_lenient, deserialize_u64_lenient};
use crate::{AirdropId, WindowId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Claim progress for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    #[default]
    NotStarted,
    Pending,
    Success,
    Fail,
}

impl ClaimStatus {
    /// A pending or successful claim blocks another submission for the window
    pub fn blocks_new_claim(&self) -> bool {
        matches!(self, ClaimStatus::Pending | ClaimStatus::Success)
    }
}

/// Kind of transaction recorded in the claim history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Source-chain token balance transfer (8 decimal token)
    TokenTransfer,
    /// Target-chain native transfer
    AdaTransfer,
    #[serde(other)]
    Other,
}

/// Method recorded with a persisted claim transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockchainMethod {
    Claim,
    StakeAndClaim,
    AdaTransfer,
}

/// Raw claim transaction as returned by the claim-history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimTransaction {
    pub airdrop_window_id: WindowId,
    #[serde(default, deserialize_with = "deserialize_u64_lenient")]
    pub airdrop_window_order: u64,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub claimable_amount: Decimal,
    pub txn_status: ClaimStatus,
    #[serde(default)]
    pub txn_hash: Option<String>,
    pub action_type: ActionType,
}

impl ClaimTransaction {
    pub fn is_token_transfer(&self) -> bool {
        self.action_type == ActionType::TokenTransfer
    }
}

/// `data` payload of the claim-history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimHistoryData {
    #[serde(default)]
    pub claim_history: Vec<ClaimTransaction>,
}

/// Target-chain deposit instructions issued with a claim signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainContext {
    #[serde(deserialize_with = "deserialize_decimal_lenient")]
    pub amount: Decimal,
    pub deposit_address: String,
}

/// Signature bundle issued by the backend signer for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSignatureBundle {
    pub signature: String,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub total_eligible_amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub claimable_amount: Decimal,
    #[serde(default)]
    pub staking_contract_address: Option<String>,
    #[serde(default)]
    pub token_address: Option<String>,
    #[serde(default)]
    pub user_address: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub chain_context: Option<ChainContext>,
}

/// Request body for the claim-signature endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ClaimSignatureRequest {
    pub address: String,
    pub airdrop_id: String,
    pub airdrop_window_id: String,
}

impl ClaimSignatureRequest {
    pub fn new(address: &str, airdrop_id: AirdropId, window_id: WindowId) -> Self {
        Self {
            address: address.to_string(),
            airdrop_id: airdrop_id.to_string(),
            airdrop_window_id: window_id.to_string(),
        }
    }
}

/// Request body persisting a submitted claim transaction
#[derive(Debug, Clone, Serialize)]
pub struct SaveClaimTxnRequest {
    pub address: String,
    pub txn_hash: String,
    pub amount: String,
    pub airdrop_id: String,
    pub airdrop_window_id: String,
    pub blockchain_method: BlockchainMethod,
}
