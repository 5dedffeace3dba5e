//! Direct claim: pay the deposit on the target chain and let the backend
//! release the reward

use super::{AirdropPortal, ClaimContext};
use crate::outcome::{claim_failure_alert, Effect, Outcome, PortalEvent};
use crate::ports::{SignValue, TokenTransfer, TransferMetadata, WalletKind, WalletSigner};
use crate::rules::ActiveWindow;
use airdrop_core::{to_base_units, BlockchainMethod, ClaimStatus, Error, Result, SaveClaimTxnRequest};
use airdrop_networking::AirdropBackend;
use tracing::{info, instrument, warn};

impl<B, W, C, T> AirdropPortal<B, W, C, T>
where
    B: AirdropBackend,
    W: WalletSigner,
    T: TokenTransfer,
{
    /// Claim the active window's reward through a target-chain deposit
    #[instrument(skip(self, ctx), fields(window = ?ctx.active.map(|a| a.window.airdrop_window_id)))]
    pub async fn claim(&self, ctx: &ClaimContext<'_>) -> Outcome {
        let (active, account, _token) = match self.claim_guard(ctx) {
            Ok(held) => held,
            Err(outcome) => return outcome,
        };

        let Some(registration_id) = ctx.registration_id.filter(|id| !id.is_empty()) else {
            let err = Error::InvalidData("no registration id for this window".to_string());
            return Outcome::with_alert(claim_failure_alert(&err));
        };

        let txn_hash = match self.deposit_claim(account, active, registration_id).await {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Claim for window {} failed: {}", active.window.airdrop_window_id, e);
                return Outcome::with_alert(claim_failure_alert(&e));
            }
        };
        info!("Claim deposit {} sent for window {}", txn_hash, active.window.airdrop_window_id);

        let mut outcome = Outcome::default()
            .effect(Effect::SetClaimStatus(ClaimStatus::Pending))
            .effect(Effect::ShowClaimSuccess);
        match self.history(account, active).await {
            Ok(snapshot) => outcome = outcome.effect(Effect::HistoryRefreshed(snapshot)),
            Err(e) => warn!("History refresh after claim failed: {}", e),
        }
        outcome
    }

    async fn deposit_claim(&self, account: &str, active: &ActiveWindow, registration_id: &str) -> Result<String> {
        let window = &active.window;
        let bundle = self
            .backend
            .claim_signature(account, window.airdrop_id, window.airdrop_window_id)
            .await?;
        let chain = bundle
            .chain_context
            .ok_or_else(|| Error::InvalidData("claim signature carries no deposit details".to_string()))?;

        let signature = self
            .signer
            .signature(&[
                SignValue::Uint(window.airdrop_window_id.0),
                SignValue::Text(registration_id.to_string()),
            ])
            .await?;

        let deposit = to_base_units(chain.amount, self.format.target_transfer_decimals).trunc();
        let metadata = TransferMetadata {
            signature,
            airdrop_window_id: window.airdrop_window_id.to_string(),
            registration_id: registration_id.to_string(),
        };
        let txn_hash = self
            .transfer
            .transfer(WalletKind::Nami, &chain.deposit_address, &deposit.to_string(), &metadata)
            .await?;

        self.backend
            .save_claim_txn(&SaveClaimTxnRequest {
                address: account.to_string(),
                txn_hash: txn_hash.clone(),
                amount: chain.amount.to_string(),
                airdrop_id: window.airdrop_id.to_string(),
                airdrop_window_id: window.airdrop_window_id.to_string(),
                blockchain_method: BlockchainMethod::AdaTransfer,
            })
            .await?;

        self.publish(PortalEvent::ClaimSubmitted {
            window_id: window.airdrop_window_id,
            txn_hash: txn_hash.clone(),
            method: BlockchainMethod::AdaTransfer,
        });
        Ok(txn_hash)
    }
}
