//! Registration models

use crate::{AirdropId, WindowId};
use serde::{Deserialize, Serialize};

/// Request body for `POST airdrop/registration`
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub signature: String,
    pub address: String,
    pub airdrop_id: AirdropId,
    pub airdrop_window_id: WindowId,
    pub block_number: u64,
    pub cardano_address: String,
}

/// One registration receipt; the backend answers with one per window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub airdrop_window_id: WindowId,
    pub receipt: String,
}

/// Pick the receipt issued for `window_id`
pub fn receipt_for_window(receipts: &[RegistrationReceipt], window_id: WindowId) -> Option<&str> {
    receipts
        .iter()
        .find(|r| r.airdrop_window_id == window_id)
        .map(|r| r.receipt.as_str())
}
