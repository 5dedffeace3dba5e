//! Response envelopes used by the portal backend

use serde::{Deserialize, Serialize};

/// Successful responses are wrapped as `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Error responses carry `{ "error": { "message": ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Extract the backend's message from a raw error body, if it is structured
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Request body for the airdrop-details endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AirdropDetailsRequest {
    pub airdrop_id: String,
}

/// Request body for the claim-history endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ClaimHistoryRequest {
    pub address: String,
    pub airdrop_id: String,
}
