//! Request-scoped lock map for workflow submissions

use airdrop_core::{ClaimStatus, WindowId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

pub const CLAIM_PENDING_MESSAGE: &str = "Claim already pending";
pub const ALREADY_CLAIMED_MESSAGE: &str = "You have already Claimed";

/// Workflow kinds that must not overlap for the same window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Register,
    /// Direct claim, stake-and-claim and contract claim share one slot
    Claim,
}

/// Why a submission was refused before any I/O
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardViolation {
    #[error("Claim already pending")]
    ClaimPending,

    #[error("You have already Claimed")]
    AlreadyClaimed,

    #[error("{0:?} already in progress for this window")]
    InFlight(Operation),
}

impl GuardViolation {
    /// Check the last fetched claim status for a window
    pub fn from_claim_status(status: ClaimStatus) -> Option<Self> {
        if !status.blocks_new_claim() {
            return None;
        }
        match status {
            ClaimStatus::Pending => Some(GuardViolation::ClaimPending),
            _ => Some(GuardViolation::AlreadyClaimed),
        }
    }

    /// Alert text for the violation
    pub fn message(&self) -> String {
        match self {
            GuardViolation::ClaimPending | GuardViolation::InFlight(Operation::Claim) => {
                CLAIM_PENDING_MESSAGE.to_string()
            }
            GuardViolation::AlreadyClaimed => ALREADY_CLAIMED_MESSAGE.to_string(),
            GuardViolation::InFlight(Operation::Register) => "Registration already in progress".to_string(),
        }
    }
}

type Slots = Arc<Mutex<HashSet<(WindowId, Operation)>>>;

/// Tracks which (window, operation) pairs currently have a submission running
#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    slots: Slots,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim the slot; the slot is released when the token drops
    pub fn try_acquire(&self, window_id: WindowId, operation: Operation) -> Result<InFlightToken, GuardViolation> {
        let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !slots.insert((window_id, operation)) {
            debug!("{:?} for window {} refused: already in flight", operation, window_id);
            return Err(GuardViolation::InFlight(operation));
        }
        Ok(InFlightToken {
            slots: Arc::clone(&self.slots),
            key: (window_id, operation),
        })
    }

    pub fn is_in_flight(&self, window_id: WindowId, operation: Operation) -> bool {
        self.slots
            .lock()
            .map(|slots| slots.contains(&(window_id, operation)))
            .unwrap_or(false)
    }
}

/// Proof of a held slot; dropping it frees the slot
#[derive(Debug)]
pub struct InFlightToken {
    slots: Slots,
    key: (WindowId, Operation),
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.remove(&self.key);
    }
}
