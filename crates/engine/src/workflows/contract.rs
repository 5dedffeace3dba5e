//! Claims settled by the source-chain airdrop contract

use super::{AirdropPortal, ClaimContext};
use crate::outcome::{claim_failure_alert, Alert, Effect, Outcome, PortalEvent};
use crate::ports::{AirdropContract, ContractClaimCall, PendingTransaction, StakeCall};
use airdrop_core::{
    AirdropWindow, BlockchainMethod, ClaimSignatureBundle, ClaimStatus, Error, Result,
    SaveClaimTxnRequest, StakeDetails,
};
use airdrop_networking::AirdropBackend;
use tracing::{info, instrument, warn};

pub const STAKE_SUCCESS_MESSAGE: &str = "Staked and Claimed successfully";
pub const CLAIM_SUCCESS_MESSAGE: &str = "Claimed successfully";
pub const REVERTED_MESSAGE: &str = "transaction reverted";

/// Contract entry point used for a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContractOp {
    StakeAndClaim,
    Claim,
}

impl ContractOp {
    fn method(self) -> BlockchainMethod {
        match self {
            ContractOp::StakeAndClaim => BlockchainMethod::StakeAndClaim,
            ContractOp::Claim => BlockchainMethod::Claim,
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            ContractOp::StakeAndClaim => STAKE_SUCCESS_MESSAGE,
            ContractOp::Claim => CLAIM_SUCCESS_MESSAGE,
        }
    }
}

fn required(value: &Option<String>, what: &str) -> Result<String> {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::InvalidData(format!("claim signature is missing the {}", what)))
}

fn stake_call(bundle: &ClaimSignatureBundle, window: &AirdropWindow, stake: &StakeDetails) -> Result<StakeCall> {
    Ok(StakeCall {
        contract_address: required(&bundle.contract_address, "contract address")?,
        token_address: required(&bundle.token_address, "token address")?,
        staking_address: required(&bundle.staking_contract_address, "staking contract address")?,
        total_eligible_amount: stake.total_eligible_amount,
        airdrop_rewards: stake.airdrop_rewards,
        stakable_tokens: stake.stakable_tokens,
        airdrop_id: window.airdrop_id.to_string(),
        airdrop_window_id: window.airdrop_window_id.to_string(),
        signature: bundle.signature.clone(),
    })
}

fn claim_call(bundle: &ClaimSignatureBundle, window: &AirdropWindow) -> Result<ContractClaimCall> {
    Ok(ContractClaimCall {
        contract_address: required(&bundle.contract_address, "contract address")?,
        token_address: required(&bundle.token_address, "token address")?,
        total_eligible_amount: bundle.total_eligible_amount,
        claim_amount: bundle.claimable_amount,
        airdrop_id: window.airdrop_id.to_string(),
        airdrop_window_id: window.airdrop_window_id.to_string(),
        signature: bundle.signature.clone(),
    })
}

impl<B, W, C, T> AirdropPortal<B, W, C, T>
where
    B: AirdropBackend,
    C: AirdropContract,
{
    /// Stake the window's stakable tokens and claim the rest in one contract call
    pub async fn stake_and_claim(&self, ctx: &ClaimContext<'_>) -> Outcome {
        self.settle_on_contract(ctx, ContractOp::StakeAndClaim).await
    }

    /// Claim the window's reward straight from the airdrop contract
    pub async fn contract_claim(&self, ctx: &ClaimContext<'_>) -> Outcome {
        self.settle_on_contract(ctx, ContractOp::Claim).await
    }

    #[instrument(skip(self, ctx), fields(window = ?ctx.active.map(|a| a.window.airdrop_window_id)))]
    async fn settle_on_contract(&self, ctx: &ClaimContext<'_>, op: ContractOp) -> Outcome {
        let (active, account, _token) = match self.claim_guard(ctx) {
            Ok(held) => held,
            Err(outcome) => return outcome,
        };
        let window = &active.window;
        let window_id = window.airdrop_window_id;

        let pending = match self.submit_contract_call(account, window, ctx.stake_details, op).await {
            Ok(pending) => pending,
            Err(e) => {
                warn!("{:?} for window {} failed: {}", op, window_id, e);
                return Outcome::with_alert(claim_failure_alert(&e));
            }
        };
        let outcome = Outcome::default().effect(Effect::SetClaimStatus(ClaimStatus::Pending));

        let receipt = match pending.wait().await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!("Waiting for {:?} receipt failed: {}", op, e);
                let Outcome { effects, .. } = outcome;
                return Outcome { alert: Some(claim_failure_alert(&e)), effects };
            }
        };

        self.publish(PortalEvent::ClaimConfirmed {
            window_id,
            txn_hash: receipt.transaction_hash.clone(),
            success: receipt.status,
        });

        if !receipt.status {
            warn!("{:?} transaction {} reverted", op, receipt.transaction_hash);
            let err = Error::ContractError(REVERTED_MESSAGE.to_string());
            return Outcome { alert: Some(claim_failure_alert(&err)), ..outcome };
        }

        info!("{:?} confirmed for window {}: {}", op, window_id, receipt.transaction_hash);
        Outcome { alert: Some(Alert::success(op.success_message())), ..outcome }
            .effect(Effect::MarkRegistered)
            .effect(Effect::SetClaimStatus(ClaimStatus::Success))
    }

    /// Fetch the signature, send the contract call and persist its hash
    async fn submit_contract_call(
        &self,
        account: &str,
        window: &AirdropWindow,
        stake_details: &StakeDetails,
        op: ContractOp,
    ) -> Result<C::Pending> {
        let bundle = self
            .backend
            .claim_signature(account, window.airdrop_id, window.airdrop_window_id)
            .await?;

        let pending = match op {
            ContractOp::StakeAndClaim => self.contract.stake(stake_call(&bundle, window, stake_details)?).await?,
            ContractOp::Claim => self.contract.claim(claim_call(&bundle, window)?).await?,
        };
        let txn_hash = pending.hash().to_string();

        self.backend
            .save_claim_txn(&SaveClaimTxnRequest {
                address: account.to_string(),
                txn_hash: txn_hash.clone(),
                amount: bundle.claimable_amount.to_string(),
                airdrop_id: window.airdrop_id.to_string(),
                airdrop_window_id: window.airdrop_window_id.to_string(),
                blockchain_method: op.method(),
            })
            .await?;

        self.publish(PortalEvent::ClaimSubmitted {
            window_id: window.airdrop_window_id,
            txn_hash,
            method: op.method(),
        });
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{Operation, ALREADY_CLAIMED_MESSAGE, CLAIM_PENDING_MESSAGE};
    use crate::rules::ActiveWindow;
    use crate::testing::{bundle, window, FakeBackend, FakeContract, FakeSigner, FakeTransfer};
    use airdrop_core::{RewardFormat, WindowId, WindowStatus};
    use rust_decimal::Decimal;

    type Portal = AirdropPortal<FakeBackend, FakeSigner, FakeContract, FakeTransfer>;

    fn portal(contract: FakeContract) -> Portal {
        AirdropPortal::new(
            FakeBackend::default(),
            FakeSigner::default(),
            contract,
            FakeTransfer::default(),
            RewardFormat::default(),
        )
    }

    fn stakable() -> StakeDetails {
        StakeDetails {
            is_stakable: true,
            total_eligible_amount: Decimal::from(1000),
            airdrop_rewards: Decimal::from(50),
            claimable_amount: Decimal::from(250),
            stakable_tokens: Decimal::from(200),
        }
    }

    fn ctx<'a>(active: &'a ActiveWindow, stake: &'a StakeDetails) -> ClaimContext<'a> {
        ClaimContext {
            active: Some(active),
            account: Some("0xabc"),
            provider_connected: true,
            claim_status: ClaimStatus::NotStarted,
            registration_id: None,
            stake_details: stake,
        }
    }

    fn active() -> ActiveWindow {
        ActiveWindow { window: window(2, WindowStatus::Claim), total_windows: 3 }
    }

    #[tokio::test]
    async fn test_stake_and_claim_success() {
        let portal = portal(FakeContract::default());
        let mut events = portal.subscribe();
        let (active, stake) = (active(), stakable());

        let outcome = portal.stake_and_claim(&ctx(&active, &stake)).await;

        assert_eq!(outcome.alert, Some(Alert::success(STAKE_SUCCESS_MESSAGE)));
        assert_eq!(
            outcome.effects,
            vec![
                Effect::SetClaimStatus(ClaimStatus::Pending),
                Effect::MarkRegistered,
                Effect::SetClaimStatus(ClaimStatus::Success),
            ]
        );

        let stakes = portal.contract.stakes.lock().unwrap().clone();
        assert_eq!(
            stakes,
            vec![StakeCall {
                contract_address: "0xairdrop".into(),
                token_address: "0xtoken".into(),
                staking_address: "0xstaking".into(),
                total_eligible_amount: Decimal::from(1000),
                airdrop_rewards: Decimal::from(50),
                stakable_tokens: Decimal::from(200),
                airdrop_id: "1".into(),
                airdrop_window_id: "2".into(),
                signature: "0xbackendsig".into(),
            }]
        );

        let saved = portal.backend.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].txn_hash, "0xstaketx");
        assert_eq!(saved[0].amount, "250");
        assert_eq!(saved[0].blockchain_method, BlockchainMethod::StakeAndClaim);

        // hash is announced before the receipt arrives
        assert_eq!(
            events.try_recv().unwrap(),
            PortalEvent::ClaimSubmitted {
                window_id: WindowId(2),
                txn_hash: "0xstaketx".into(),
                method: BlockchainMethod::StakeAndClaim,
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            PortalEvent::ClaimConfirmed { window_id: WindowId(2), txn_hash: "0xstaketx".into(), success: true }
        );
        assert!(!portal.guard().is_in_flight(WindowId(2), Operation::Claim));
    }

    #[tokio::test]
    async fn test_reverted_stake_stays_pending() {
        let portal = portal(FakeContract::with_receipt(Ok(false)));
        let (active, stake) = (active(), stakable());

        let outcome = portal.stake_and_claim(&ctx(&active, &stake)).await;

        assert_eq!(outcome.alert, Some(Alert::error("Failed Contract: transaction reverted")));
        assert_eq!(outcome.effects, vec![Effect::SetClaimStatus(ClaimStatus::Pending)]);
        assert_eq!(portal.backend.saved().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_stake_is_not_persisted() {
        let portal = portal(FakeContract::rejecting(Error::ContractError("user rejected transaction".into())));
        let (active, stake) = (active(), stakable());

        let outcome = portal.stake_and_claim(&ctx(&active, &stake)).await;

        assert_eq!(outcome.alert, Some(Alert::error("Failed Contract: user rejected transaction")));
        assert!(outcome.effects.is_empty());
        assert!(portal.backend.saved().is_empty());
        assert_eq!(portal.contract.call_count(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_bundle_makes_no_contract_call() {
        let portal = portal(FakeContract::default());
        portal.backend.set_signature(Ok(ClaimSignatureBundle {
            staking_contract_address: None,
            ..bundle()
        }));
        let (active, stake) = (active(), stakable());

        let outcome = portal.stake_and_claim(&ctx(&active, &stake)).await;

        assert_eq!(
            outcome.alert.unwrap().message,
            "Failed Uncaught: claim signature is missing the staking contract address"
        );
        assert_eq!(portal.contract.call_count(), 0);
    }

    #[tokio::test]
    async fn test_pending_status_blocks_stake() {
        let portal = portal(FakeContract::default());
        let (active, stake) = (active(), stakable());
        let mut context = ctx(&active, &stake);
        context.claim_status = ClaimStatus::Pending;

        let outcome = portal.stake_and_claim(&context).await;
        assert_eq!(outcome.alert, Some(Alert::error(CLAIM_PENDING_MESSAGE)));
        assert!(portal.backend.calls().is_empty());
        assert_eq!(portal.contract.call_count(), 0);
    }

    #[tokio::test]
    async fn test_status_guards_cover_both_contract_flows() {
        let (active, stake) = (active(), stakable());
        let cases = [
            (ClaimStatus::Pending, CLAIM_PENDING_MESSAGE),
            (ClaimStatus::Success, ALREADY_CLAIMED_MESSAGE),
        ];
        for (status, message) in cases {
            let portal = portal(FakeContract::default());
            let mut context = ctx(&active, &stake);
            context.claim_status = status;

            let staked = portal.stake_and_claim(&context).await;
            assert_eq!(staked.alert, Some(Alert::error(message)), "{:?}", status);
            assert!(staked.effects.is_empty());

            let claimed = portal.contract_claim(&context).await;
            assert_eq!(claimed.alert, Some(Alert::error(message)), "{:?}", status);
            assert!(claimed.effects.is_empty());

            assert!(portal.backend.calls().is_empty());
            assert_eq!(portal.contract.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_contract_claim_skips_without_provider() {
        let portal = portal(FakeContract::default());
        let (active, stake) = (active(), stakable());
        let mut context = ctx(&active, &stake);
        context.provider_connected = false;

        assert!(portal.contract_claim(&context).await.is_skipped());
        assert!(portal.backend.calls().is_empty());
        assert_eq!(portal.contract.call_count(), 0);
    }

    #[tokio::test]
    async fn test_contract_claim_success() {
        let portal = portal(FakeContract::default());
        let (active, stake) = (active(), StakeDetails::default());

        let outcome = portal.contract_claim(&ctx(&active, &stake)).await;

        assert_eq!(outcome.alert, Some(Alert::success(CLAIM_SUCCESS_MESSAGE)));
        let claims = portal.contract.claims.lock().unwrap().clone();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].claim_amount, Decimal::from(250));
        assert_eq!(claims[0].total_eligible_amount, Decimal::from(1000));
        assert_eq!(portal.backend.saved()[0].blockchain_method, BlockchainMethod::Claim);
    }
}
