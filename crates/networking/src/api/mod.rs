//! Backend capability used by the portal workflows
//!
//! The engine only talks to the backend through [`AirdropBackend`], so the
//! workflows can run against [`PortalClient`] or an in-memory stand-in.

use crate::PortalClient;
use airdrop_core::{
    AirdropDetails, AirdropId, ClaimSignatureBundle, ClaimTransaction, RegistrationReceipt,
    RegistrationRequest, Result, SaveClaimTxnRequest, StakeDetails, WindowId,
};
use std::future::Future;

/// Portal backend REST operations
pub trait AirdropBackend: Send + Sync {
    fn airdrop_details(&self, airdrop_id: AirdropId) -> impl Future<Output = Result<AirdropDetails>> + Send;

    fn stake_details(
        &self,
        address: &str,
        airdrop_id: AirdropId,
        window_id: WindowId,
    ) -> impl Future<Output = Result<StakeDetails>> + Send;

    fn claim_history(
        &self,
        address: &str,
        airdrop_id: AirdropId,
    ) -> impl Future<Output = Result<Vec<ClaimTransaction>>> + Send;

    fn register(
        &self,
        request: &RegistrationRequest,
    ) -> impl Future<Output = Result<Vec<RegistrationReceipt>>> + Send;

    /// Backend-reported refusals come back as `Error::ApiError`
    fn claim_signature(
        &self,
        address: &str,
        airdrop_id: AirdropId,
        window_id: WindowId,
    ) -> impl Future<Output = Result<ClaimSignatureBundle>> + Send;

    fn save_claim_txn(&self, request: &SaveClaimTxnRequest) -> impl Future<Output = Result<()>> + Send;
}

impl AirdropBackend for PortalClient {
    async fn airdrop_details(&self, airdrop_id: AirdropId) -> Result<AirdropDetails> {
        self.get_airdrop_details(airdrop_id).await
    }

    async fn stake_details(
        &self,
        address: &str,
        airdrop_id: AirdropId,
        window_id: WindowId,
    ) -> Result<StakeDetails> {
        self.get_stake_details(address, airdrop_id, window_id).await
    }

    async fn claim_history(&self, address: &str, airdrop_id: AirdropId) -> Result<Vec<ClaimTransaction>> {
        self.get_claim_history(address, airdrop_id).await
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<Vec<RegistrationReceipt>> {
        PortalClient::register(self, request).await
    }

    async fn claim_signature(
        &self,
        address: &str,
        airdrop_id: AirdropId,
        window_id: WindowId,
    ) -> Result<ClaimSignatureBundle> {
        self.get_claim_signature(address, airdrop_id, window_id).await
    }

    async fn save_claim_txn(&self, request: &SaveClaimTxnRequest) -> Result<()> {
        PortalClient::save_claim_txn(self, request).await
    }
}
