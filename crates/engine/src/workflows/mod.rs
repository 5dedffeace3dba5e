//! Registration and claim workflows
//!
//! Each workflow runs its steps strictly in sequence and reports back an
//! [`Outcome`]; nothing is retried.

mod claim;
mod contract;
mod registration;

use crate::executor::{GuardViolation, InFlightGuard, InFlightToken, Operation};
use crate::history::{load_history, HistorySnapshot};
use crate::outcome::{Alert, Effect, Outcome, PortalEvent};
use crate::rules::ActiveWindow;
use airdrop_core::{AirdropWindow, ClaimStatus, Result, RewardFormat, StakeDetails};
use airdrop_networking::AirdropBackend;
use tokio::sync::broadcast;
use tracing::{debug, error};

const EVENT_CAPACITY: usize = 64;

/// Session state a claim attempt is checked against
#[derive(Debug, Clone, Copy)]
pub struct ClaimContext<'a> {
    pub active: Option<&'a ActiveWindow>,
    pub account: Option<&'a str>,
    /// Wallet provider available for signing and sending
    pub provider_connected: bool,
    /// Latest status fetched for the active window
    pub claim_status: ClaimStatus,
    pub registration_id: Option<&'a str>,
    pub stake_details: &'a StakeDetails,
}

/// Session state a registration is submitted from
#[derive(Debug, Clone, Copy)]
pub struct RegistrationContext<'a> {
    pub window: Option<&'a AirdropWindow>,
    pub account: Option<&'a str>,
}

/// Drives registration and claims against the backend, wallet and chains
pub struct AirdropPortal<B, W, C, T> {
    backend: B,
    signer: W,
    contract: C,
    transfer: T,
    format: RewardFormat,
    guard: InFlightGuard,
    events: broadcast::Sender<PortalEvent>,
}

impl<B, W, C, T> AirdropPortal<B, W, C, T>
where
    B: AirdropBackend,
{
    pub fn new(backend: B, signer: W, contract: C, transfer: T, format: RewardFormat) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            signer,
            contract,
            transfer,
            format,
            guard: InFlightGuard::new(),
            events,
        }
    }

    /// Receive progress events published by the workflows
    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.events.subscribe()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn guard(&self) -> &InFlightGuard {
        &self.guard
    }

    fn publish(&self, event: PortalEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    /// Fetch and aggregate the claim history for the active window
    pub async fn history(&self, account: &str, active: &ActiveWindow) -> Result<HistorySnapshot> {
        load_history(&self.backend, account, &active.window, active.total_windows, &self.format).await
    }

    /// History pass as an outcome; a failure turns into an error alert
    pub async fn refresh_history(&self, account: Option<&str>, active: Option<&ActiveWindow>) -> Outcome {
        let (Some(account), Some(active)) = (account, active) else {
            return Outcome::skipped();
        };
        match self.history(account, active).await {
            Ok(snapshot) => Outcome::default().effect(Effect::HistoryRefreshed(snapshot)),
            Err(e) => {
                error!("Claim history refresh failed: {}", e);
                Outcome::with_alert(Alert::error(format!("Failed to load claim history: {}", e.message())))
            }
        }
    }

    /// Shared claim guards: returns the held slot, or the outcome to report
    fn claim_guard<'a>(&self, ctx: &ClaimContext<'a>) -> std::result::Result<(&'a ActiveWindow, &'a str, InFlightToken), Outcome> {
        let (Some(active), Some(account)) = (ctx.active, ctx.account) else {
            debug!("Claim skipped: no active window or account");
            return Err(Outcome::skipped());
        };
        if !ctx.provider_connected {
            debug!("Claim skipped: wallet provider not connected");
            return Err(Outcome::skipped());
        }
        if let Some(violation) = GuardViolation::from_claim_status(ctx.claim_status) {
            return Err(Outcome::with_alert(Alert::error(violation.message())));
        }
        let token = self
            .guard
            .try_acquire(active.window.airdrop_window_id, Operation::Claim)
            .map_err(|violation| Outcome::with_alert(Alert::error(violation.message())))?;
        Ok((active, account, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, window, FakeBackend, FakeContract, FakeSigner, FakeTransfer};
    use airdrop_core::{ActionType, WindowStatus};

    #[tokio::test]
    async fn test_refresh_history_outcome() {
        let backend = FakeBackend::default();
        backend.set_history(vec![record(1, ClaimStatus::Success, ActionType::AdaTransfer, 5)]);
        let portal = AirdropPortal::new(
            backend,
            FakeSigner::default(),
            FakeContract::default(),
            FakeTransfer::default(),
            RewardFormat::default(),
        );
        let active = ActiveWindow { window: window(1, WindowStatus::Claim), total_windows: 2 };

        assert!(portal.refresh_history(None, Some(&active)).await.is_skipped());

        let outcome = portal.refresh_history(Some("0xabc"), Some(&active)).await;
        match outcome.effects.as_slice() {
            [Effect::HistoryRefreshed(snapshot)] => {
                assert_eq!(snapshot.claimed_window, 1);
                assert_eq!(snapshot.entries[0].reward, "5 ADA");
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }
}
