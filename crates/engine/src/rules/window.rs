//! Window phase rules: relevant deadline and active-window selection

use airdrop_core::{AirdropWindow, WindowStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timestamp the countdown for `window` runs towards
///
/// Falls back to `now` for a missing window, an unknown status or a
/// timestamp the backend left empty.
pub fn relevant_deadline(window: Option<&AirdropWindow>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(window) = window else {
        return now;
    };

    let deadline = match window.airdrop_window_status {
        WindowStatus::Upcoming => window.airdrop_window_registration_start_period,
        WindowStatus::Registration => window.airdrop_window_registration_end_period,
        WindowStatus::Idle => window.airdrop_window_claim_start_period,
        WindowStatus::Claim | WindowStatus::LastClaim => window.next_window_start_period,
        WindowStatus::Unknown => None,
    };

    deadline.unwrap_or(now)
}

/// The window the portal is working on, with the airdrop's window count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveWindow {
    pub window: AirdropWindow,
    pub total_windows: u64,
}

impl ActiveWindow {
    pub fn is_last(&self) -> bool {
        self.window.airdrop_window_order == self.total_windows
    }
}

/// Pick the active window: the latest one whose registration has opened,
/// or the first one while nothing has opened yet
pub fn select_active_window(windows: &[AirdropWindow], now: DateTime<Utc>) -> Option<ActiveWindow> {
    let mut sorted: Vec<&AirdropWindow> = windows.iter().collect();
    sorted.sort_by_key(|w| w.airdrop_window_order);

    let opened = sorted
        .iter()
        .rev()
        .find(|w| matches!(w.airdrop_window_registration_start_period, Some(start) if start <= now));

    opened.or(sorted.first()).map(|w| ActiveWindow {
        window: (*w).clone(),
        total_windows: windows.len() as u64,
    })
}
