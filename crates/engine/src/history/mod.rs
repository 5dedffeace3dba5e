//! Claim history aggregation
//!
//! The backend returns every claim transaction an account ever sent for an
//! airdrop. The portal shows one line per window, works out the highest
//! window already paid out, and notices a claim that is still in flight.

use crate::outcome::Alert;
use airdrop_core::{
    from_base_units, ActionType, AirdropStatusMessage, AirdropWindow, ClaimStatus,
    ClaimTransaction, Result, RewardFormat, StakeDetails, WindowId,
};
use airdrop_networking::AirdropBackend;
use serde::Serialize;
use tracing::{debug, warn};

pub const CLAIM_IN_PROGRESS_MESSAGE: &str =
    "Your claim is being processed. It can take a few minutes for the transaction to be confirmed.";

/// One rendered line of the claim history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub window: String,
    pub reward: String,
    pub status: ClaimStatus,
    pub txn_hash: Option<String>,
    pub action_type: ActionType,
}

/// Everything one history pass produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySnapshot {
    pub entries: Vec<HistoryEntry>,
    /// Order of the highest window paid out, 0 when nothing succeeded
    pub claimed_window: u64,
    /// Any record exists for the active window
    pub claim_initiated: bool,
    /// The active window has a record that has not succeeded yet
    pub claim_in_progress: bool,
    /// Recorded status of the active window's claim, `NotStarted` without one
    pub claim_status: ClaimStatus,
    pub stake_details: StakeDetails,
    pub alert: Option<Alert>,
    pub airdrop_status: Option<AirdropStatusMessage>,
}

/// Collapse records to one per window
///
/// The first record for a window claims its slot; later token-transfer
/// records for that window replace it, other duplicates are dropped.
pub fn dedupe_by_window(records: &[ClaimTransaction]) -> Vec<ClaimTransaction> {
    let mut collapsed: Vec<ClaimTransaction> = Vec::new();
    for record in records {
        match collapsed
            .iter()
            .position(|r| r.airdrop_window_id == record.airdrop_window_id)
        {
            Some(idx) if record.is_token_transfer() => collapsed[idx] = record.clone(),
            Some(_) => {}
            None => collapsed.push(record.clone()),
        }
    }
    collapsed
}

/// Window order of the successful record with the highest window id
pub fn claimed_window(records: &[ClaimTransaction]) -> u64 {
    records
        .iter()
        .filter(|r| r.txn_status == ClaimStatus::Success)
        .max_by_key(|r| r.airdrop_window_id)
        .map(|r| r.airdrop_window_order)
        .unwrap_or(0)
}

/// Status of the collapsed record for `active`, as recorded
pub fn window_claim_status(records: &[ClaimTransaction], active: WindowId) -> ClaimStatus {
    records
        .iter()
        .find(|r| r.airdrop_window_id == active)
        .map(|r| r.txn_status)
        .unwrap_or_default()
}

pub fn claim_in_progress(records: &[ClaimTransaction], active: WindowId) -> bool {
    records
        .iter()
        .any(|r| r.airdrop_window_id == active && r.txn_status != ClaimStatus::Success)
}

pub fn format_reward(record: &ClaimTransaction, format: &RewardFormat) -> String {
    match record.action_type {
        ActionType::TokenTransfer => format!(
            "{} {}",
            from_base_units(record.claimable_amount, format.source_decimals),
            format.source_symbol
        ),
        _ => format!("{} {}", record.claimable_amount.normalize(), format.target_symbol),
    }
}

/// Hard failures are shown as pending
fn displayed_status(status: ClaimStatus) -> ClaimStatus {
    match status {
        ClaimStatus::Fail => ClaimStatus::Pending,
        other => other,
    }
}

pub fn history_entry(record: &ClaimTransaction, format: &RewardFormat) -> HistoryEntry {
    HistoryEntry {
        window: format!("Window {} Rewards", record.airdrop_window_order),
        reward: format_reward(record, format),
        status: displayed_status(record.txn_status),
        txn_hash: record.txn_hash.clone(),
        action_type: record.action_type.clone(),
    }
}

/// Aggregate already-fetched records for the active window
pub fn aggregate(
    records: &[ClaimTransaction],
    window: &AirdropWindow,
    total_windows: u64,
    stake_details: StakeDetails,
    format: &RewardFormat,
) -> HistorySnapshot {
    let active = window.airdrop_window_id;
    let claim_initiated = records.iter().any(|r| r.airdrop_window_id == active);

    let collapsed = dedupe_by_window(records);
    let in_progress = claim_in_progress(&collapsed, active);

    let alert = in_progress.then(|| Alert::info(CLAIM_IN_PROGRESS_MESSAGE));
    let airdrop_status = (claim_initiated && window.airdrop_window_order != total_windows)
        .then_some(AirdropStatusMessage::ClaimOpenSoon);

    HistorySnapshot {
        entries: collapsed.iter().map(|r| history_entry(r, format)).collect(),
        claimed_window: claimed_window(&collapsed),
        claim_initiated,
        claim_in_progress: in_progress,
        claim_status: window_claim_status(&collapsed, active),
        stake_details,
        alert,
        airdrop_status,
    }
}

/// Fetch history and stake details for `account`, then aggregate
///
/// A failed stake lookup falls back to non-stakable; a failed history
/// lookup is an error.
pub async fn load_history<B: AirdropBackend>(
    backend: &B,
    account: &str,
    window: &AirdropWindow,
    total_windows: u64,
    format: &RewardFormat,
) -> Result<HistorySnapshot> {
    let records = backend.claim_history(account, window.airdrop_id).await?;
    debug!("Aggregating {} claim records for window {}", records.len(), window.airdrop_window_id);

    let stake_details = match backend
        .stake_details(account, window.airdrop_id, window.airdrop_window_id)
        .await
    {
        Ok(details) => details,
        Err(e) => {
            warn!("Stake details unavailable, assuming not stakable: {}", e);
            StakeDetails::default()
        }
    };

    Ok(aggregate(&records, window, total_windows, stake_details, format))
}
