//! Wallet and chain capabilities the workflows drive
//!
//! Implementations live with the wallet integration; the engine only sees
//! these traits.

use airdrop_core::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One value of a typed tuple handed to the wallet for signing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignValue {
    Uint(u64),
    Address(String),
    Text(String),
}

/// Signature produced by the connected source-chain wallet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignedPayload {
    /// `None` when the wallet returned without signing
    pub signature: Option<String>,
    /// Block the signature is anchored to
    pub block_number: u64,
}

/// Source-chain wallet signing helper
pub trait WalletSigner: Send + Sync {
    /// Sign a typed tuple and report the current block number
    fn sign(&self, values: &[SignValue]) -> impl Future<Output = Result<SignedPayload>> + Send;

    /// Sign a typed tuple, returning only the signature
    fn signature(&self, values: &[SignValue]) -> impl Future<Output = Result<String>> + Send;
}

/// Receipt of a mined source-chain transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: String,
    /// `true` when the transaction executed without reverting
    pub status: bool,
}

/// A submitted but not yet mined transaction
pub trait PendingTransaction: Send {
    fn hash(&self) -> &str;

    /// Wait until the transaction is mined
    fn wait(self) -> impl Future<Output = Result<TxReceipt>> + Send;
}

/// Arguments of the airdrop contract's `stake` call
#[derive(Debug, Clone, PartialEq)]
pub struct StakeCall {
    pub contract_address: String,
    pub token_address: String,
    pub staking_address: String,
    pub total_eligible_amount: Decimal,
    pub airdrop_rewards: Decimal,
    pub stakable_tokens: Decimal,
    pub airdrop_id: String,
    pub airdrop_window_id: String,
    pub signature: String,
}

/// Arguments of the airdrop contract's `claim` call
#[derive(Debug, Clone, PartialEq)]
pub struct ContractClaimCall {
    pub contract_address: String,
    pub token_address: String,
    pub total_eligible_amount: Decimal,
    pub claim_amount: Decimal,
    pub airdrop_id: String,
    pub airdrop_window_id: String,
    pub signature: String,
}

/// Source-chain airdrop contract
///
/// Provider failures (reverts, user rejection) are reported as
/// `Error::ContractError`.
pub trait AirdropContract: Send + Sync {
    type Pending: PendingTransaction;

    fn stake(&self, call: StakeCall) -> impl Future<Output = Result<Self::Pending>> + Send;

    fn claim(&self, call: ContractClaimCall) -> impl Future<Output = Result<Self::Pending>> + Send;
}

/// Browser wallet used for target-chain transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Nami,
}

/// Metadata attached to a claim transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMetadata {
    pub signature: String,
    pub airdrop_window_id: String,
    pub registration_id: String,
}

/// Target-chain transfer helper
pub trait TokenTransfer: Send + Sync {
    /// Send `amount` (smallest unit) to `destination`; returns the transaction hash
    fn transfer(
        &self,
        wallet: WalletKind,
        destination: &str,
        amount: &str,
        metadata: &TransferMetadata,
    ) -> impl Future<Output = Result<String>> + Send;
}
