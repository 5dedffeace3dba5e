//! Which portal view to render

use crate::rules::window::relevant_deadline;
use airdrop_core::{AirdropWindow, UserEligibility, WindowStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Presentational sub-view of the registration portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// No active window yet
    Hidden,
    /// Informational teaser for visitors without a connected wallet
    Teaser { deadline: DateTime<Utc>, window_order: u64 },
    /// Eligibility still being checked
    Loading,
    /// Compact teaser before the very first window opens
    Compact { starts_at: DateTime<Utc>, window_order: u64 },
    /// Full registration and claim panel
    Full { deadline: DateTime<Utc>, window_order: u64 },
}

/// Inputs of the view decision
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub window: Option<&'a AirdropWindow>,
    pub account_connected: bool,
    pub eligibility: UserEligibility,
    pub cardano_bound: bool,
    pub claim_initiated: bool,
}

/// Window ordinal shown to the user
///
/// Anticipates the next window, except in the final claim phase or when an
/// address is bound and no claim has been started.
pub fn displayed_window_order(window: &AirdropWindow, cardano_bound: bool, claim_initiated: bool) -> u64 {
    if window.airdrop_window_status == WindowStatus::LastClaim || (cardano_bound && !claim_initiated) {
        window.airdrop_window_order
    } else {
        window.airdrop_window_order + 1
    }
}

pub fn select_view(inputs: &ViewInputs<'_>, now: DateTime<Utc>) -> View {
    let Some(window) = inputs.window else {
        return View::Hidden;
    };

    let window_order = displayed_window_order(window, inputs.cardano_bound, inputs.claim_initiated);
    let deadline = relevant_deadline(Some(window), now);

    if !inputs.account_connected {
        return View::Teaser { deadline, window_order };
    }

    if inputs.eligibility == UserEligibility::Pending {
        return View::Loading;
    }

    if window.airdrop_window_status == WindowStatus::Upcoming && window.airdrop_window_order == 1 {
        return View::Compact {
            starts_at: window.airdrop_window_registration_start_period.unwrap_or(now),
            window_order,
        };
    }

    View::Full { deadline, window_order }
}
