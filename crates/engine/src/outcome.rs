//! Workflow results consumed by the UI state

use crate::history::HistorySnapshot;
use airdrop_core::{AirdropStatusMessage, BlockchainMethod, ClaimStatus, Error, ErrorKind, WindowId};
use serde::Serialize;

/// Severity of an inline alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Inline alert shown in the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Error, message: message.into() }
    }
}

/// Alert for a failed claim or stake attempt
pub fn claim_failure_alert(err: &Error) -> Alert {
    match err.kind() {
        ErrorKind::Api => Alert::error(err.message()),
        ErrorKind::Contract => Alert::error(format!("Failed Contract: {}", err.message())),
        ErrorKind::Other => Alert::error(format!("Failed Uncaught: {}", err.message())),
    }
}

/// State change requested by a workflow, applied in order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum Effect {
    ShowConnectionModal,
    SetAirdropStatus(AirdropStatusMessage),
    /// Eligibility must be fetched again by the caller
    RefreshEligibility,
    SetRegistrationId(String),
    BindCardanoAddress(String),
    MarkRegistered,
    ShowRegistrationSuccess,
    ShowClaimSuccess,
    SetClaimStatus(ClaimStatus),
    HistoryRefreshed(HistorySnapshot),
}

/// Result of one workflow invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    pub alert: Option<Alert>,
    pub effects: Vec<Effect>,
}

impl Outcome {
    /// Preconditions were not met; nothing happened
    pub fn skipped() -> Self {
        Self::default()
    }

    pub fn with_alert(alert: Alert) -> Self {
        Self { alert: Some(alert), effects: Vec::new() }
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_skipped(&self) -> bool {
        self.alert.is_none() && self.effects.is_empty()
    }
}

/// Progress notifications published while a workflow runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PortalEvent {
    Registered { window_id: WindowId },
    /// A claim transaction was sent and its hash persisted
    ClaimSubmitted { window_id: WindowId, txn_hash: String, method: BlockchainMethod },
    ClaimConfirmed { window_id: WindowId, txn_hash: String, success: bool },
}
