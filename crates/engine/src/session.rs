//! Portal UI state
//!
//! A single owner holds everything the portal renders. Workflows never touch
//! it directly: their [`Outcome`]s and published [`PortalEvent`]s are folded
//! in here.

use crate::history::HistoryEntry;
use crate::outcome::{Alert, Effect, Outcome, PortalEvent};
use crate::rules::{eligibility_alert, relevant_deadline, select_active_window, select_view, ActiveWindow, View, ViewInputs};
use crate::workflows::{ClaimContext, RegistrationContext};
use airdrop_core::{AirdropStatusMessage, AirdropWindow, ClaimStatus, StakeDetails, UserEligibility};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PortalSession {
    pub active: Option<ActiveWindow>,
    pub account: Option<String>,
    pub provider_connected: bool,
    pub eligibility: UserEligibility,
    /// Single inline alert slot; the latest writer wins
    pub alert: Option<Alert>,
    pub airdrop_status: Option<AirdropStatusMessage>,

    pub registration_id: Option<String>,
    pub user_registered: bool,
    pub cardano_address: Option<String>,

    pub claim_status: ClaimStatus,
    pub claim_initiated: bool,
    pub claimed_window: u64,
    pub history: Vec<HistoryEntry>,
    pub stake_details: StakeDetails,

    pub connection_modal_open: bool,
    pub registration_success_open: bool,
    pub claim_success_open: bool,
    /// A workflow asked for eligibility to be fetched again
    pub eligibility_refresh_requested: bool,
}

impl PortalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the active window from a fresh window list
    pub fn set_windows(&mut self, windows: &[AirdropWindow], now: DateTime<Utc>) {
        let active = select_active_window(windows, now);
        if active.as_ref().map(|a| a.window.airdrop_window_id)
            != self.active.as_ref().map(|a| a.window.airdrop_window_id)
        {
            self.reset_window_state();
        }
        self.active = active;
    }

    /// Switch the connected account; per-account state starts over
    pub fn set_account(&mut self, account: Option<String>, provider_connected: bool) {
        if account != self.account {
            self.reset_window_state();
            self.eligibility = UserEligibility::Pending;
            self.cardano_address = None;
        }
        self.account = account;
        self.provider_connected = provider_connected;
    }

    /// Receipts and claim progress belong to one window
    fn reset_window_state(&mut self) {
        self.alert = None;
        self.airdrop_status = None;
        self.registration_id = None;
        self.user_registered = false;
        self.claim_status = ClaimStatus::NotStarted;
        self.claim_initiated = false;
        self.claimed_window = 0;
        self.history.clear();
        self.stake_details = StakeDetails::default();
    }

    /// Record an eligibility verdict and advise on it
    pub fn apply_eligibility(&mut self, eligibility: UserEligibility) {
        self.eligibility = eligibility;
        if let Some(alert) = eligibility_alert(eligibility, self.cardano_address.is_some()) {
            self.alert = Some(alert);
        }
    }

    /// Latest claim status fetched for the active window
    pub fn set_claim_status(&mut self, status: ClaimStatus) {
        self.claim_status = status;
        self.claim_initiated |= status != ClaimStatus::NotStarted;
    }

    /// Fold a workflow outcome in, effects first and then the alert
    pub fn apply(&mut self, outcome: Outcome) {
        for effect in outcome.effects {
            self.apply_effect(effect);
        }
        if let Some(alert) = outcome.alert {
            self.alert = Some(alert);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        debug!("Applying {:?}", effect);
        match effect {
            Effect::ShowConnectionModal => self.connection_modal_open = true,
            Effect::SetAirdropStatus(status) => self.airdrop_status = Some(status),
            Effect::RefreshEligibility => self.eligibility_refresh_requested = true,
            Effect::SetRegistrationId(id) => self.registration_id = Some(id),
            Effect::BindCardanoAddress(address) => self.cardano_address = Some(address),
            Effect::MarkRegistered => self.user_registered = true,
            Effect::ShowRegistrationSuccess => self.registration_success_open = true,
            Effect::ShowClaimSuccess => self.claim_success_open = true,
            Effect::SetClaimStatus(status) => self.set_claim_status(status),
            Effect::HistoryRefreshed(snapshot) => {
                self.history = snapshot.entries;
                self.claimed_window = snapshot.claimed_window;
                // a claim sent this session may not be recorded yet
                if snapshot.claim_status != ClaimStatus::NotStarted || !self.claim_status.blocks_new_claim() {
                    self.claim_status = snapshot.claim_status;
                }
                self.claim_initiated = snapshot.claim_initiated || self.claim_status != ClaimStatus::NotStarted;
                self.stake_details = snapshot.stake_details;
                if let Some(status) = snapshot.airdrop_status {
                    self.airdrop_status = Some(status);
                }
                if let Some(alert) = snapshot.alert {
                    self.alert = Some(alert);
                }
            }
        }
    }

    /// Track progress of a running workflow
    pub fn apply_event(&mut self, event: &PortalEvent) {
        let active_id = self.active.as_ref().map(|a| a.window.airdrop_window_id);
        match event {
            PortalEvent::Registered { window_id } if Some(*window_id) == active_id => {
                self.user_registered = true;
            }
            PortalEvent::ClaimSubmitted { window_id, .. } if Some(*window_id) == active_id => {
                self.set_claim_status(ClaimStatus::Pending);
            }
            PortalEvent::ClaimConfirmed { window_id, success: true, .. } if Some(*window_id) == active_id => {
                self.set_claim_status(ClaimStatus::Success);
            }
            _ => {}
        }
    }

    /// Consume a pending eligibility refresh request
    pub fn take_eligibility_refresh(&mut self) -> bool {
        std::mem::take(&mut self.eligibility_refresh_requested)
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn close_modals(&mut self) {
        self.connection_modal_open = false;
        self.registration_success_open = false;
        self.claim_success_open = false;
    }

    pub fn claim_context(&self) -> ClaimContext<'_> {
        ClaimContext {
            active: self.active.as_ref(),
            account: self.account.as_deref(),
            provider_connected: self.provider_connected,
            claim_status: self.claim_status,
            registration_id: self.registration_id.as_deref(),
            stake_details: &self.stake_details,
        }
    }

    pub fn registration_context(&self) -> RegistrationContext<'_> {
        RegistrationContext {
            window: self.active.as_ref().map(|a| &a.window),
            account: self.account.as_deref(),
        }
    }

    pub fn deadline(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        relevant_deadline(self.active.as_ref().map(|a| &a.window), now)
    }

    pub fn view(&self, now: DateTime<Utc>) -> View {
        select_view(
            &ViewInputs {
                window: self.active.as_ref().map(|a| &a.window),
                account_connected: self.account.is_some(),
                eligibility: self.eligibility,
                cardano_bound: self.cardano_address.is_some(),
                claim_initiated: self.claim_initiated,
            },
            now,
        )
    }
}
