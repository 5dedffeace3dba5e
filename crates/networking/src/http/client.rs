//! Portal backend HTTP client
//!
//! Every endpoint is a JSON `POST`; successful bodies are wrapped in
//! `{ "data": ... }` and failures carry `{ "error": { "message": ... } }`.

use airdrop_core::{
    AirdropDetails, AirdropDetailsRequest, AirdropId, ApiEnvelope, ApiErrorBody, ApiPaths,
    ClaimHistoryData, ClaimHistoryRequest, ClaimSignatureBundle, ClaimSignatureRequest,
    ClaimTransaction, Error, PortalConfig, RegistrationReceipt, RegistrationRequest, Result,
    SaveClaimTxnRequest, StakeDetails, StakeDetailsData, StakeDetailsRequest, WindowId,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, instrument, warn};

/// HTTP client for the airdrop portal backend
pub struct PortalClient {
    http: Client,
    base_url: String,
    paths: ApiPaths,
}

impl PortalClient {
    /// Create a client from the portal configuration
    pub fn new(config: &PortalConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .default_headers(Self::default_headers())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            paths: config.paths.clone(),
        })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST `body` and unwrap the `data` field of the response
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(match ApiErrorBody::message_from(&text) {
                Some(message) => {
                    warn!("Backend rejected {}: {}", path, message);
                    Error::ApiError(message)
                }
                None => {
                    error!("Request to {} failed: HTTP {}", path, status);
                    Error::HttpError {
                        status: status.as_u16(),
                        body: text,
                    }
                }
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&text).map_err(|e| {
            error!(
                "Failed to parse {} response: {}. Body preview: {}",
                path,
                e,
                text.chars().take(500).collect::<String>()
            );
            Error::InvalidData(e.to_string())
        })?;

        Ok(envelope.data)
    }

    /// Fetch an airdrop and its windows
    #[instrument(skip(self))]
    pub async fn get_airdrop_details(&self, airdrop_id: AirdropId) -> Result<AirdropDetails> {
        let body = AirdropDetailsRequest {
            airdrop_id: airdrop_id.to_string(),
        };
        let details: AirdropDetails = self.post(&self.paths.airdrop_details, &body).await?;
        debug!("Airdrop {} has {} windows", airdrop_id, details.airdrop_windows.len());
        Ok(details)
    }

    /// Look up whether the account can stake in a window
    #[instrument(skip(self))]
    pub async fn get_stake_details(
        &self,
        address: &str,
        airdrop_id: AirdropId,
        window_id: WindowId,
    ) -> Result<StakeDetails> {
        let body = StakeDetailsRequest::new(address, airdrop_id, window_id);
        let data: StakeDetailsData = self.post(&self.paths.stake_details, &body).await?;
        Ok(data.stake_details)
    }

    /// All claim transactions of an account for an airdrop, oldest first
    #[instrument(skip(self))]
    pub async fn get_claim_history(
        &self,
        address: &str,
        airdrop_id: AirdropId,
    ) -> Result<Vec<ClaimTransaction>> {
        let body = ClaimHistoryRequest {
            address: address.to_string(),
            airdrop_id: airdrop_id.to_string(),
        };
        let data: ClaimHistoryData = self.post(&self.paths.claim_history, &body).await?;
        debug!("Fetched {} claim records", data.claim_history.len());
        Ok(data.claim_history)
    }

    /// Submit a signed registration; returns one receipt per registered window
    #[instrument(skip(self, request), fields(window = %request.airdrop_window_id))]
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Vec<RegistrationReceipt>> {
        let data: serde_json::Value = self.post(&self.paths.registration, request).await?;
        match data {
            serde_json::Value::Array(_) => Ok(serde_json::from_value(data)?),
            other => {
                debug!("Registration returned no receipt list: {}", other);
                Ok(Vec::new())
            }
        }
    }

    /// Ask the backend signer for a claim signature
    #[instrument(skip(self))]
    pub async fn get_claim_signature(
        &self,
        address: &str,
        airdrop_id: AirdropId,
        window_id: WindowId,
    ) -> Result<ClaimSignatureBundle> {
        let body = ClaimSignatureRequest::new(address, airdrop_id, window_id);
        self.post(&self.paths.claim_signature, &body).await
    }

    /// Persist the hash of a submitted claim transaction
    #[instrument(skip(self, request), fields(txn = %request.txn_hash))]
    pub async fn save_claim_txn(&self, request: &SaveClaimTxnRequest) -> Result<()> {
        let _: serde_json::Value = self.post(&self.paths.save_claim_txn, request).await?;
        debug!("Claim transaction saved");
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
