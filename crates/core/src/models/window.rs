//! Airdrop and airdrop-window models

use crate::types::{deserialize_decimal_lenient, deserialize_timestamp_opt, deserialize_u64_lenient};
use crate::{AirdropId, WindowId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Phase of an airdrop window as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowStatus {
    Upcoming,
    Registration,
    Idle,
    Claim,
    LastClaim,
    /// Any value this client does not know about
    #[serde(other)]
    Unknown,
}

impl WindowStatus {
    /// Headline shown next to the countdown
    pub fn label(&self) -> &'static str {
        match self {
            WindowStatus::Upcoming => "Registration opens in",
            WindowStatus::Registration => "Registration closes in",
            WindowStatus::Idle => "Claim opens in",
            WindowStatus::Claim => "Claim closes in",
            WindowStatus::LastClaim => "Final claim closes in",
            WindowStatus::Unknown => "",
        }
    }

    /// Verb for the primary action in this phase
    pub fn action(&self) -> &'static str {
        match self {
            WindowStatus::Upcoming => "Get notified",
            WindowStatus::Registration => "Register",
            WindowStatus::Idle => "Registered",
            WindowStatus::Claim | WindowStatus::LastClaim => "Claim",
            WindowStatus::Unknown => "",
        }
    }
}

/// Snapshot of a single airdrop window
///
/// Windows are immutable once fetched; a change on the backend is picked up
/// by fetching a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropWindow {
    pub airdrop_id: AirdropId,
    pub airdrop_window_id: WindowId,
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub airdrop_window_order: u64,
    pub airdrop_window_status: WindowStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp_opt")]
    pub airdrop_window_registration_start_period: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp_opt")]
    pub airdrop_window_registration_end_period: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp_opt")]
    pub airdrop_window_claim_start_period: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp_opt")]
    pub next_window_start_period: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub airdrop_window_total_tokens: Decimal,
}

/// Airdrop details with all of its windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropDetails {
    pub airdrop_id: AirdropId,
    #[serde(default)]
    pub token_name: String,
    #[serde(default, deserialize_with = "deserialize_decimal_lenient")]
    pub total_airdrop_tokens: Decimal,
    #[serde(default)]
    pub airdrop_windows: Vec<AirdropWindow>,
}

/// Wallet eligibility verdict for the active window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserEligibility {
    #[default]
    Pending,
    Eligible,
    NotEligible,
}

/// Airdrop status banner shown above the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AirdropStatusMessage {
    Claim,
    ClaimOpenSoon,
    WalletAccountError,
}

impl AirdropStatusMessage {
    pub fn text(&self) -> &'static str {
        match self {
            AirdropStatusMessage::Claim => "Your wallet is registered. Claim opens with the claim window.",
            AirdropStatusMessage::ClaimOpenSoon => "The next claim window will open soon.",
            AirdropStatusMessage::WalletAccountError => "There was a problem with your wallet account.",
        }
    }
}
